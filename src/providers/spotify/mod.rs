//! Spotify Web API integration
//!
//! Detail-by-id lookup for Spotify links and free-text search when
//! Spotify is the conversion target.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;

pub use client::SpotifyClient;
