//! Core data models for link conversion.
//!
//! These are OUR types. Provider responses get converted into
//! [`ContentMetadata`] by the adapters in `providers::*`; nothing
//! downstream of an adapter ever sees a provider DTO.
//!
//! [`ContentMetadata`] is the single exchange shape for both the source
//! record (what the link pointed at) and every search candidate, so the
//! scorer compares like with like. Which optional fields are meaningful
//! is determined by [`ContentType`].

use serde::{Deserialize, Serialize};

/// A supported streaming platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    AppleMusic,
    Spotify,
}

impl Platform {
    /// The platform a conversion from this platform targets.
    pub fn other(self) -> Platform {
        match self {
            Platform::AppleMusic => Platform::Spotify,
            Platform::Spotify => Platform::AppleMusic,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::AppleMusic => write!(f, "Apple Music"),
            Platform::Spotify => write!(f, "Spotify"),
        }
    }
}

/// Kind of catalog content a link points at.
///
/// Determines which metadata fields are meaningful and which scoring
/// branch applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Track,
    Album,
    Artist,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Track => "track",
            ContentType::Album => "album",
            ContentType::Artist => "artist",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    AppleToSpotify,
    SpotifyToApple,
}

/// Typed identifiers extracted from a source platform URL.
///
/// Immutable once parsed. Construction happens only in the `link`
/// module; an unparseable URL never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub platform: Platform,
    pub content_type: ContentType,
    /// Platform-native catalog id.
    pub id: String,
    /// Two-letter storefront region, "us" when the URL carries none.
    pub region: String,
    /// Original URL path segments, for diagnostics.
    pub path_segments: Vec<String>,
}

/// Canonical catalog metadata, platform-independent.
///
/// Optional fields are populated when the platform exposes them:
/// iTunes has no popularity (left at 0) and no ISRC; Spotify carries
/// both. Value-comparable, not identity-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub content_type: ContentType,
    /// Track title, album title, or artist name depending on type.
    pub title: String,
    /// Artist credit as the platform formats it ("A & B", "A, B").
    pub artist: String,
    /// Containing album, for tracks.
    pub album: Option<String>,
    /// International Standard Recording Code, when the platform has it.
    pub isrc: Option<String>,
    pub artwork_url: Option<String>,
    /// Release date as the platform formats it (precision varies).
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    pub track_number: Option<u32>,
    pub total_tracks: Option<u32>,
    pub disc_number: Option<u32>,
    pub total_discs: Option<u32>,
    pub duration_ms: Option<u64>,
    /// Platform-native popularity, 0-100. 0 when the platform has no
    /// such concept.
    pub popularity: u8,
    pub preview_url: Option<String>,
    /// Public web URL for this record on its platform.
    pub external_url: String,
}

impl Default for ContentMetadata {
    fn default() -> Self {
        Self {
            content_type: ContentType::Track,
            title: String::new(),
            artist: String::new(),
            album: None,
            isrc: None,
            artwork_url: None,
            release_date: None,
            genres: Vec::new(),
            track_number: None,
            total_tracks: None,
            disc_number: None,
            total_discs: None,
            duration_ms: None,
            popularity: 0,
            preview_url: None,
            external_url: String::new(),
        }
    }
}

/// A search result paired with its scores.
///
/// Ephemeral: created and consumed within one selector invocation.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: ContentMetadata,
    /// Raw field-weighted similarity signal, roughly [0, 1].
    pub raw_score: f32,
    /// Raw score adjusted by originality and popularity preferences;
    /// this is what the selector ranks by.
    pub boosted_score: f32,
}

/// Final output handed back to the caller. The caller owns any
/// persistence (history, caching); the engine keeps nothing.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub direction: Direction,
    pub source: ContentMetadata,
    pub matched_url: String,
    pub matched: ContentMetadata,
    /// User-facing confidence, 0-100.
    pub confidence: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_other_is_symmetric() {
        assert_eq!(Platform::AppleMusic.other(), Platform::Spotify);
        assert_eq!(Platform::Spotify.other(), Platform::AppleMusic);
    }

    #[test]
    fn test_content_type_display() {
        assert_eq!(ContentType::Track.to_string(), "track");
        assert_eq!(ContentType::Artist.to_string(), "artist");
    }

    #[test]
    fn test_metadata_default_is_empty_track() {
        let meta = ContentMetadata::default();
        assert_eq!(meta.content_type, ContentType::Track);
        assert_eq!(meta.popularity, 0);
        assert!(meta.album.is_none());
    }
}
