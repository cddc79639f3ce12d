//! Adapter layer: Convert iTunes DTOs to canonical metadata
//!
//! This is the ONLY place where iTunes response shapes turn into
//! [`ContentMetadata`]. The API's loosely-typed items are
//! discriminated here by `wrapperType`/`kind`; anything we cannot
//! classify is dropped rather than guessed at.

use super::dto;
use crate::model::{ContentMetadata, ContentType};

/// Thumbnail size iTunes returns artwork at.
const ARTWORK_SMALL: &str = "100x100";
/// Size we rewrite artwork URLs to.
const ARTWORK_LARGE: &str = "600x600";

/// Convert one iTunes item, or None when the item is not a song,
/// album, or artist (iTunes mixes audiobooks and videos into search
/// results).
pub fn to_metadata(item: &dto::ItunesItem) -> Option<ContentMetadata> {
    match item.wrapper_type.as_deref() {
        Some("track") if item.kind.as_deref() == Some("song") => Some(track_metadata(item)),
        Some("collection") => Some(album_metadata(item)),
        Some("artist") => Some(artist_metadata(item)),
        _ => None,
    }
}

/// Convert a response to metadata of the expected type, preferring a
/// result of that type when the platform returns several.
pub fn to_metadata_of_type(
    response: &dto::ItunesResponse,
    content_type: ContentType,
) -> Option<ContentMetadata> {
    response
        .results
        .iter()
        .filter_map(to_metadata)
        .find(|meta| meta.content_type == content_type)
        .or_else(|| response.results.iter().filter_map(to_metadata).next())
}

fn track_metadata(item: &dto::ItunesItem) -> ContentMetadata {
    ContentMetadata {
        content_type: ContentType::Track,
        title: item.track_name.clone().unwrap_or_default(),
        artist: item.artist_name.clone().unwrap_or_default(),
        album: item.collection_name.clone(),
        // iTunes does not expose ISRCs or popularity.
        isrc: None,
        artwork_url: item.artwork_url_100.as_deref().map(upgrade_artwork),
        release_date: item.release_date.clone(),
        genres: genre_list(item),
        track_number: item.track_number,
        total_tracks: item.track_count,
        disc_number: item.disc_number,
        total_discs: item.disc_count,
        duration_ms: item.track_time_millis,
        popularity: 0,
        preview_url: item.preview_url.clone(),
        external_url: item.track_view_url.clone().unwrap_or_default(),
    }
}

fn album_metadata(item: &dto::ItunesItem) -> ContentMetadata {
    ContentMetadata {
        content_type: ContentType::Album,
        title: item.collection_name.clone().unwrap_or_default(),
        artist: item.artist_name.clone().unwrap_or_default(),
        album: None,
        isrc: None,
        artwork_url: item.artwork_url_100.as_deref().map(upgrade_artwork),
        release_date: item.release_date.clone(),
        genres: genre_list(item),
        track_number: None,
        total_tracks: item.track_count,
        disc_number: None,
        total_discs: None,
        duration_ms: None,
        popularity: 0,
        preview_url: None,
        external_url: item.collection_view_url.clone().unwrap_or_default(),
    }
}

fn artist_metadata(item: &dto::ItunesItem) -> ContentMetadata {
    let name = item.artist_name.clone().unwrap_or_default();
    ContentMetadata {
        content_type: ContentType::Artist,
        title: name.clone(),
        artist: name,
        genres: genre_list(item),
        external_url: item
            .artist_link_url
            .clone()
            .or_else(|| item.artist_view_url.clone())
            .unwrap_or_default(),
        ..Default::default()
    }
}

fn genre_list(item: &dto::ItunesItem) -> Vec<String> {
    item.primary_genre_name
        .clone()
        .into_iter()
        .collect()
}

/// Swap the fixed-size thumbnail token for the largest rendition the
/// image server offers at that path.
fn upgrade_artwork(url: &str) -> String {
    url.replace(ARTWORK_SMALL, ARTWORK_LARGE)
}
