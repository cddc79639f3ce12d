//! Adapter layer: Convert Spotify DTOs to canonical metadata
//!
//! The ONLY place Spotify response shapes turn into
//! [`ContentMetadata`]. Artist credits collapse to one comma-joined
//! string; artwork picks the largest rendition; a missing external
//! URL is rebuilt from the object id so the caller always gets a
//! usable link.

use super::dto;
use crate::model::{ContentMetadata, ContentType};

pub fn track_to_metadata(track: &dto::TrackObject) -> ContentMetadata {
    ContentMetadata {
        content_type: ContentType::Track,
        title: track.name.clone(),
        artist: join_artists(&track.artists),
        album: track.album.as_ref().map(|album| album.name.clone()),
        isrc: track
            .external_ids
            .as_ref()
            .and_then(|ids| ids.isrc.clone()),
        artwork_url: track
            .album
            .as_ref()
            .and_then(|album| largest_image(&album.images)),
        release_date: track
            .album
            .as_ref()
            .and_then(|album| album.release_date.clone()),
        genres: Vec::new(),
        track_number: track.track_number,
        total_tracks: track.album.as_ref().and_then(|album| album.total_tracks),
        disc_number: track.disc_number,
        total_discs: None,
        duration_ms: track.duration_ms,
        popularity: track.popularity.unwrap_or(0),
        preview_url: track.preview_url.clone(),
        external_url: external_url(&track.external_urls, "track", &track.id),
    }
}

pub fn album_to_metadata(album: &dto::AlbumObject) -> ContentMetadata {
    ContentMetadata {
        content_type: ContentType::Album,
        title: album.name.clone(),
        artist: join_artists(&album.artists),
        album: None,
        isrc: None,
        artwork_url: largest_image(&album.images),
        release_date: album.release_date.clone(),
        genres: album.genres.clone(),
        track_number: None,
        total_tracks: album.total_tracks,
        disc_number: None,
        total_discs: None,
        duration_ms: None,
        popularity: album.popularity.unwrap_or(0),
        preview_url: None,
        external_url: external_url(&album.external_urls, "album", &album.id),
    }
}

pub fn artist_to_metadata(artist: &dto::ArtistObject) -> ContentMetadata {
    ContentMetadata {
        content_type: ContentType::Artist,
        title: artist.name.clone(),
        artist: artist.name.clone(),
        genres: artist.genres.clone(),
        artwork_url: largest_image(&artist.images),
        popularity: artist.popularity.unwrap_or(0),
        external_url: external_url(&artist.external_urls, "artist", &artist.id),
        ..Default::default()
    }
}

/// "A, B, C" in credit order. Matching relies on the order-free
/// normalized form, so the join separator is cosmetic.
fn join_artists(artists: &[dto::ArtistRef]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn largest_image(images: &[dto::Image]) -> Option<String> {
    images
        .iter()
        .max_by_key(|image| image.width.unwrap_or(0))
        .map(|image| image.url.clone())
}

fn external_url(urls: &Option<dto::ExternalUrls>, kind: &str, id: &str) -> String {
    urls.as_ref()
        .and_then(|u| u.spotify.clone())
        .unwrap_or_else(|| format!("https://open.spotify.com/{kind}/{id}"))
}
