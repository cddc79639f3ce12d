//! User-facing confidence score.
//!
//! Separate from match selection: the selector has already committed
//! to a candidate, and this number only tells the user how sure we
//! are. A shared ISRC is identity, full stop, and short-circuits to
//! 100 no matter how differently the two platforms format the text.
//!
//! Otherwise the score is a weighted blend of per-field similarities,
//! renormalized over the fields both sides actually have, so a
//! missing album neither helps nor hurts.

use crate::model::ContentMetadata;
use crate::text;

const TITLE_WEIGHT: f32 = 0.4;
const ARTIST_WEIGHT: f32 = 0.4;
const ALBUM_WEIGHT: f32 = 0.2;

/// Confidence that `matched` is the same content as `source`, 0-100.
pub fn confidence(source: &ContentMetadata, matched: &ContentMetadata) -> u8 {
    if let (Some(a), Some(b)) = (source.isrc.as_deref(), matched.isrc.as_deref()) {
        if !a.trim().is_empty() && a.trim().eq_ignore_ascii_case(b.trim()) {
            return 100;
        }
    }

    let mut weighted = 0.0f32;
    let mut total_weight = 0.0f32;

    if !source.title.is_empty() && !matched.title.is_empty() {
        weighted += TITLE_WEIGHT * text::similarity(&source.title, &matched.title);
        total_weight += TITLE_WEIGHT;
    }
    if !source.artist.is_empty() && !matched.artist.is_empty() {
        weighted += ARTIST_WEIGHT * text::similarity(&source.artist, &matched.artist);
        total_weight += ARTIST_WEIGHT;
    }
    if let (Some(a), Some(b)) = (source.album.as_deref(), matched.album.as_deref()) {
        if !a.is_empty() && !b.is_empty() {
            weighted += ALBUM_WEIGHT * text::similarity(a, b);
            total_weight += ALBUM_WEIGHT;
        }
    }

    if total_weight == 0.0 {
        return 0;
    }
    ((weighted / total_weight) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;

    fn track(title: &str, artist: &str) -> ContentMetadata {
        ContentMetadata {
            content_type: ContentType::Track,
            title: title.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matching_isrc_is_always_100() {
        let mut source = track("Completely Different Title", "Artist A");
        source.isrc = Some("USRC17607839".to_string());
        let mut matched = track("Another Title Entirely", "Artist B");
        matched.isrc = Some("usrc17607839".to_string());

        assert_eq!(confidence(&source, &matched), 100);
    }

    #[test]
    fn test_differing_isrc_falls_through_to_text() {
        let mut source = track("Same Song", "Same Artist");
        source.isrc = Some("USRC17607839".to_string());
        let mut matched = track("Same Song", "Same Artist");
        matched.isrc = Some("GBUM71029604".to_string());

        assert_eq!(confidence(&source, &matched), 100);
    }

    #[test]
    fn test_exact_text_without_isrc_is_100() {
        let source = track("Blinding Lights", "The Weeknd");
        let matched = track("blinding lights", "the weeknd");
        assert_eq!(confidence(&source, &matched), 100);
    }

    #[test]
    fn test_missing_album_excluded_from_both_sides() {
        let mut source = track("Song", "Artist");
        source.album = Some("The Album".to_string());
        let matched = track("Song", "Artist");

        // Title and artist agree exactly; the absent album must not
        // dilute the score.
        assert_eq!(confidence(&source, &matched), 100);
    }

    #[test]
    fn test_album_mismatch_lowers_score_when_both_present() {
        let mut source = track("Song", "Artist");
        source.album = Some("Album One".to_string());
        let mut matched = track("Song", "Artist");
        matched.album = Some("Completely Other Record".to_string());

        let with_mismatch = confidence(&source, &matched);
        assert!(with_mismatch < 100);
        assert!(with_mismatch >= 80);
    }

    #[test]
    fn test_feature_stripped_equality_scores_95_band() {
        let source = track("Lonely (feat. Benny Blanco)", "Justin Bieber");
        let matched = track("Lonely", "Justin Bieber");
        let score = confidence(&source, &matched);
        // Title contributes 0.95, artist 1.0 at equal weights, which
        // lands at 97.5 before rounding.
        assert!((97..=98).contains(&score), "got {score}");
    }

    #[test]
    fn test_empty_sides_are_zero() {
        let source = track("", "");
        let matched = track("", "");
        assert_eq!(confidence(&source, &matched), 0);
    }
}
