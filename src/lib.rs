//! Songbridge - cross-platform music link conversion.
//!
//! Takes an Apple Music or Spotify share link, pulls the canonical
//! metadata from the source platform, and fuzzy-matches it against
//! the other platform's catalog search to find the same track, album,
//! or artist there.
//!
//! The crate is the matching engine only. The HTTP surface, UI, and
//! history belong to whatever embeds it; this library exposes
//! [`Converter::convert`] and a handful of injectable seams
//! (credential provider, catalog traits) so embedders and tests can
//! substitute their own collaborators.
//!
//! # Usage
//!
//! ```ignore
//! use songbridge::{config, Converter};
//!
//! let config = config::load();
//! let converter = Converter::from_config(&config)?;
//! let result = converter.convert("https://music.apple.com/us/album/x/123?i=456").await?;
//! println!("{} ({}% confident)", result.matched_url, result.confidence);
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod link;
pub mod matching;
pub mod model;
pub mod providers;
pub mod text;

pub use convert::Converter;
pub use error::{ConvertError, Result};
pub use matching::SearchPolicy;
pub use model::{
    ContentMetadata, ContentType, ConversionResult, Direction, ParsedLink, Platform,
    ScoredCandidate,
};
