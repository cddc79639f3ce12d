//! iTunes Search API Data Transfer Objects
//!
//! These types match EXACTLY what the iTunes API returns.
//! DO NOT use these types outside the apple module - convert to the
//! canonical metadata shape via the adapter.
//!
//! API Reference: https://performance-partners.apple.com/search-api
//!
//! Both /lookup and /search return the same envelope: a result count
//! and a flat list of loosely-typed items discriminated by
//! `wrapperType` (and `kind` for tracks).

use serde::{Deserialize, Serialize};

/// Envelope for both lookup and search responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesResponse {
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<ItunesItem>,
}

/// One lookup/search result. Which fields are populated depends on
/// `wrapperType`: "track", "collection", or "artist".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItunesItem {
    /// "track", "collection", or "artist"
    pub wrapper_type: Option<String>,
    /// For tracks: "song", "music-video", ...
    pub kind: Option<String>,

    pub track_id: Option<u64>,
    pub collection_id: Option<u64>,
    pub artist_id: Option<u64>,

    pub track_name: Option<String>,
    pub collection_name: Option<String>,
    pub artist_name: Option<String>,

    /// 100x100 artwork thumbnail; larger sizes come from URL surgery.
    pub artwork_url_100: Option<String>,
    pub track_time_millis: Option<u64>,
    /// ISO 8601, e.g. "2019-11-29T12:00:00Z"
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,

    pub track_number: Option<u32>,
    pub track_count: Option<u32>,
    pub disc_number: Option<u32>,
    pub disc_count: Option<u32>,

    pub preview_url: Option<String>,
    pub track_view_url: Option<String>,
    pub collection_view_url: Option<String>,
    pub artist_view_url: Option<String>,
    /// Artist results carry their web URL here instead.
    pub artist_link_url: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
