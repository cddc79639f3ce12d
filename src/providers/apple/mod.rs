//! iTunes (Apple Music) catalog integration
//!
//! Source-metadata lookup for Apple Music links and free-text search
//! when Apple Music is the conversion target.
//!
//! API docs: https://performance-partners.apple.com/search-api

pub mod dto;
mod adapter;
mod client;

pub use client::AppleClient;
