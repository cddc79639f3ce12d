//! Spotify Web API Data Transfer Objects
//!
//! These types match EXACTLY what the Spotify Web API returns.
//! DO NOT use these types outside the spotify module - convert to the
//! canonical metadata shape via the adapter.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! Search responses wrap each content type in its own paging object;
//! detail lookups return the bare object.

use serde::{Deserialize, Serialize};

/// Search response: one paging object per requested type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Option<Page<TrackObject>>,
    pub albums: Option<Page<AlbumObject>>,
    pub artists: Option<Page<ArtistObject>>,
}

/// Paging wrapper. We only ever read the first page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

/// A full track object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub duration_ms: Option<u64>,
    /// 0-100, Spotify's own play-count-derived metric.
    pub popularity: Option<u8>,
    pub preview_url: Option<String>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub external_ids: Option<ExternalIds>,
    pub external_urls: Option<ExternalUrls>,
}

/// Artist credit on a track or album.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Simplified album on a track object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AlbumRef {
    pub name: String,
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
}

/// A full album object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    /// Only present on detail lookups, not search results.
    pub popularity: Option<u8>,
    pub genres: Vec<String>,
    pub external_urls: Option<ExternalUrls>,
}

/// A full artist object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub images: Vec<Image>,
    pub popularity: Option<u8>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExternalIds {
    pub isrc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Error envelope the Web API wraps failures in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_track_object() {
        let json = r#"{
            "id": "0VjIjW4GlUZAMYd2vXMi3b",
            "name": "Blinding Lights",
            "duration_ms": 200040,
            "popularity": 90,
            "preview_url": null,
            "track_number": 9,
            "disc_number": 1,
            "artists": [{"id": "1Xyo4u8uXC1ZmMpatF05PJ", "name": "The Weeknd"}],
            "album": {
                "name": "After Hours",
                "release_date": "2020-03-20",
                "total_tracks": 14,
                "images": [
                    {"url": "https://i.scdn.co/image/640", "width": 640, "height": 640},
                    {"url": "https://i.scdn.co/image/300", "width": 300, "height": 300}
                ]
            },
            "external_ids": {"isrc": "USUG11904206"},
            "external_urls": {"spotify": "https://open.spotify.com/track/0VjIjW4GlUZAMYd2vXMi3b"}
        }"#;

        let track: TrackObject = serde_json::from_str(json).expect("should parse track");
        assert_eq!(track.name, "Blinding Lights");
        assert_eq!(track.popularity, Some(90));
        assert_eq!(track.artists[0].name, "The Weeknd");
        assert_eq!(
            track.external_ids.and_then(|ids| ids.isrc).as_deref(),
            Some("USUG11904206")
        );
        assert_eq!(track.album.unwrap().images.len(), 2);
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "tracks": {
                "href": "https://api.spotify.com/v1/search?query=x",
                "items": [{"id": "abc", "name": "Song", "artists": []}],
                "limit": 10,
                "offset": 0,
                "total": 1
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("should parse search");
        assert_eq!(response.tracks.unwrap().items.len(), 1);
        assert!(response.albums.is_none());
    }

    #[test]
    fn test_parse_artist_object() {
        let json = r#"{
            "id": "1Xyo4u8uXC1ZmMpatF05PJ",
            "name": "The Weeknd",
            "genres": ["canadian contemporary r&b", "pop"],
            "popularity": 95,
            "images": [{"url": "https://i.scdn.co/image/a", "width": 640, "height": 640}],
            "external_urls": {"spotify": "https://open.spotify.com/artist/1Xyo4u8uXC1ZmMpatF05PJ"}
        }"#;

        let artist: ArtistObject = serde_json::from_str(json).expect("should parse artist");
        assert_eq!(artist.genres.len(), 2);
        assert_eq!(artist.popularity, Some(95));
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        let err: ApiError = serde_json::from_str(json).expect("should parse error");
        assert_eq!(err.error.status, 401);
        assert!(err.error.message.contains("expired"));
    }

    #[test]
    fn test_parse_minimal_album_search_item() {
        // Album search results have no popularity or genres.
        let json = r#"{
            "id": "4yP0hdKOZPNshxUOjY0cZj",
            "name": "After Hours",
            "artists": [{"id": "1Xyo4u8uXC1ZmMpatF05PJ", "name": "The Weeknd"}],
            "release_date": "2020-03-20",
            "total_tracks": 14,
            "images": []
        }"#;

        let album: AlbumObject = serde_json::from_str(json).expect("should parse album");
        assert_eq!(album.name, "After Hours");
        assert!(album.popularity.is_none());
        assert!(album.genres.is_empty());
    }
}
