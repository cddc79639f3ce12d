//! Source URL parsing.
//!
//! Turns a pasted share link into a [`ParsedLink`]: which platform,
//! which kind of content, which catalog id, which storefront region.
//! Anything that is not an Apple Music or Spotify catalog URL fails
//! with [`ConvertError::InvalidLink`]; nothing downstream ever sees an
//! unvalidated URL.
//!
//! Apple Music paths look like `/<region>/<type>/<name>/<id>`, with
//! one quirk: an album page URL can point at a single track through
//! the `i` query parameter, which then overrides both the path type
//! and the path id.
//!
//! Spotify paths are `/<type>/<id>`, sometimes behind an `/intl-xx/`
//! locale prefix, with tracking parameters (`si`) we ignore.

use reqwest::Url;

use crate::error::{ConvertError, Result};
use crate::model::{ContentType, ParsedLink, Platform};

const DEFAULT_REGION: &str = "us";

/// Parse a raw share URL into typed identifiers.
pub fn parse(raw_url: &str) -> Result<ParsedLink> {
    let url = Url::parse(raw_url.trim())
        .map_err(|e| ConvertError::InvalidLink(format!("{raw_url}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| ConvertError::InvalidLink(format!("{raw_url}: no host")))?;

    if host == "open.spotify.com" {
        parse_spotify(&url)
    } else if host == "music.apple.com" || host.ends_with(".music.apple.com") {
        parse_apple(&url)
    } else {
        Err(ConvertError::InvalidLink(format!(
            "unsupported host: {host}"
        )))
    }
}

fn path_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_apple(url: &Url) -> Result<ParsedLink> {
    let segments = path_segments(url);
    let mut rest = segments.as_slice();

    // A leading two-letter segment is the storefront region.
    let region = match rest.first() {
        Some(seg) if seg.len() == 2 && seg.chars().all(|c| c.is_ascii_alphabetic()) => {
            let region = seg.to_lowercase();
            rest = &rest[1..];
            region
        }
        _ => DEFAULT_REGION.to_string(),
    };

    let [type_segment, .., id_segment] = rest else {
        return Err(ConvertError::InvalidLink(format!(
            "Apple Music link is missing path segments: {url}"
        )));
    };

    let mut content_type = match type_segment.as_str() {
        "album" => ContentType::Album,
        "artist" => ContentType::Artist,
        "song" => ContentType::Track,
        other => {
            return Err(ConvertError::InvalidLink(format!(
                "unrecognized Apple Music content type: {other}"
            )));
        }
    };
    let mut id = id_segment.trim_start_matches("id").to_string();

    // Album page URLs address a single track via ?i=<track id>, which
    // wins over the path-derived id.
    if let Some((_, track_id)) = url.query_pairs().find(|(key, _)| key == "i") {
        if !track_id.is_empty() {
            content_type = ContentType::Track;
            id = track_id.into_owned();
        }
    }

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConvertError::InvalidLink(format!(
            "Apple Music link has no usable id: {url}"
        )));
    }

    Ok(ParsedLink {
        platform: Platform::AppleMusic,
        content_type,
        id,
        region,
        path_segments: segments,
    })
}

fn parse_spotify(url: &Url) -> Result<ParsedLink> {
    let segments = path_segments(url);
    let mut rest = segments.as_slice();

    // Locale prefix from region-targeted share links, e.g. /intl-de/.
    if matches!(rest.first(), Some(seg) if seg.starts_with("intl-")) {
        rest = &rest[1..];
    }

    let [type_segment, id_segment, ..] = rest else {
        return Err(ConvertError::InvalidLink(format!(
            "Spotify link is missing path segments: {url}"
        )));
    };

    let content_type = match type_segment.as_str() {
        "track" => ContentType::Track,
        "album" => ContentType::Album,
        "artist" => ContentType::Artist,
        other => {
            return Err(ConvertError::InvalidLink(format!(
                "unrecognized Spotify content type: {other}"
            )));
        }
    };

    if id_segment.is_empty() || !id_segment.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConvertError::InvalidLink(format!(
            "Spotify link has no usable id: {url}"
        )));
    }

    Ok(ParsedLink {
        platform: Platform::Spotify,
        content_type,
        // Spotify links carry no storefront; search is region-free.
        region: DEFAULT_REGION.to_string(),
        id: id_segment.clone(),
        path_segments: segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spotify_track() {
        let link = parse("https://open.spotify.com/track/6rqhFgbbKwnb9MLmUQDhG6").unwrap();
        assert_eq!(link.platform, Platform::Spotify);
        assert_eq!(link.content_type, ContentType::Track);
        assert_eq!(link.id, "6rqhFgbbKwnb9MLmUQDhG6");
    }

    #[test]
    fn test_parse_spotify_ignores_tracking_params() {
        let link =
            parse("https://open.spotify.com/album/4yP0hdKOZPNshxUOjY0cZj?si=abc123").unwrap();
        assert_eq!(link.content_type, ContentType::Album);
        assert_eq!(link.id, "4yP0hdKOZPNshxUOjY0cZj");
    }

    #[test]
    fn test_parse_spotify_intl_prefix() {
        let link = parse("https://open.spotify.com/intl-de/track/6rqhFgbbKwnb9MLmUQDhG6").unwrap();
        assert_eq!(link.content_type, ContentType::Track);
        assert_eq!(link.id, "6rqhFgbbKwnb9MLmUQDhG6");
    }

    #[test]
    fn test_parse_apple_album() {
        let link = parse("https://music.apple.com/us/album/after-hours/1499378108").unwrap();
        assert_eq!(link.platform, Platform::AppleMusic);
        assert_eq!(link.content_type, ContentType::Album);
        assert_eq!(link.id, "1499378108");
        assert_eq!(link.region, "us");
    }

    #[test]
    fn test_parse_apple_track_query_param_wins() {
        let link =
            parse("https://music.apple.com/us/album/some-song/1440857781?i=1440857782").unwrap();
        assert_eq!(link.content_type, ContentType::Track);
        assert_eq!(link.id, "1440857782");
        assert_eq!(link.region, "us");
    }

    #[test]
    fn test_parse_apple_artist() {
        let link = parse("https://music.apple.com/gb/artist/the-weeknd/479756766").unwrap();
        assert_eq!(link.content_type, ContentType::Artist);
        assert_eq!(link.id, "479756766");
        assert_eq!(link.region, "gb");
    }

    #[test]
    fn test_parse_apple_without_region_defaults_to_us() {
        let link = parse("https://music.apple.com/album/after-hours/1499378108").unwrap();
        assert_eq!(link.region, "us");
        assert_eq!(link.id, "1499378108");
    }

    #[test]
    fn test_parse_apple_geo_subdomain() {
        let link = parse("https://geo.music.apple.com/us/album/x/1499378108").unwrap();
        assert_eq!(link.platform, Platform::AppleMusic);
    }

    #[test]
    fn test_rejects_unknown_host() {
        let err = parse("https://example.com/track/123").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidLink(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("not a url").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_rejects_missing_segments() {
        assert!(parse("https://open.spotify.com/track").is_err());
        assert!(parse("https://music.apple.com/us/album").is_err());
    }

    #[test]
    fn test_rejects_unknown_content_type() {
        assert!(parse("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M").is_err());
        assert!(parse("https://music.apple.com/us/playlist/x/pl.123").is_err());
    }
}
