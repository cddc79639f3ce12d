//! Platform catalog clients.
//!
//! # Architecture
//!
//! Each platform integration follows the same split:
//! - **DTOs** (`apple/dto.rs`, `spotify/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to the canonical metadata shape
//! - **Clients** - HTTP clients for the platform APIs
//! - **Traits** (`traits.rs`) - The seams the matching engine depends
//!   on, so tests run against canned catalogs
//! - **Credentials** (`credentials.rs`) - Bearer-token acquisition as
//!   an injected dependency
//!
//! This decoupling means an API change touches one dto/adapter pair,
//! and nothing in the matching engine knows which platform it is
//! talking to.

pub mod apple;
pub mod credentials;
pub mod spotify;
pub mod traits;

pub use apple::AppleClient;
pub use credentials::{ClientCredentials, CredentialProvider, StaticToken};
pub use spotify::SpotifyClient;
pub use traits::{CatalogLookup, CatalogSearch};
