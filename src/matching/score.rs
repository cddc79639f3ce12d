//! Candidate scoring.
//!
//! [`score`] produces the raw field-weighted similarity between one
//! search candidate and the source record. It is a ranking signal in
//! roughly [0, 1], not a probability; [`boost`] layers the selector's
//! originality and popularity preferences on top and can push the
//! combined value past 1.0.
//!
//! ISRC equality is deliberately not scored here. It is decisive, and
//! the confidence calculator short-circuits on it; mixing it into the
//! text signal would only mask scoring regressions.

use crate::model::{ContentMetadata, ContentType};
use crate::text;

/// Title/artist weight for tracks and albums.
const FIELD_WEIGHT: f32 = 0.4;
/// Bonus when candidate and source durations agree within 2 seconds.
const DURATION_BONUS: f32 = 0.1;
/// Bonus when the album names are clean-equal.
const ALBUM_BONUS: f32 = 0.1;
/// Multiplier applied when the candidate looks like a tribute act.
const TRIBUTE_PENALTY: f32 = 0.1;

const DURATION_TOLERANCE_MS: u64 = 2_000;

/// Raw similarity between a candidate and the source.
pub fn score(candidate: &ContentMetadata, source: &ContentMetadata) -> f32 {
    let raw = match source.content_type {
        ContentType::Artist => score_artist(candidate, source),
        ContentType::Track | ContentType::Album => score_recording(candidate, source),
    };
    if text::is_tribute_band(&candidate.artist, &source.artist) {
        raw * TRIBUTE_PENALTY
    } else {
        raw
    }
}

/// Ranking score: raw plus originality and popularity preferences.
///
/// An exact artist match adds 0.15 and platform popularity up to 0.05,
/// so an original recording outranks a cover whose text happens to
/// score marginally higher, and popular candidates break remaining
/// ties.
pub fn boost(raw: f32, candidate: &ContentMetadata, source: &ContentMetadata) -> f32 {
    let mut boosted = raw;
    if !source.artist.is_empty()
        && text::normalize_artist(&candidate.artist) == text::normalize_artist(&source.artist)
    {
        boosted += 0.15;
    }
    boosted += f32::from(candidate.popularity.min(100)) / 100.0 * 0.05;
    boosted
}

fn score_recording(candidate: &ContentMetadata, source: &ContentMetadata) -> f32 {
    let mut total = FIELD_WEIGHT * title_tier(&candidate.title, &source.title);
    total += FIELD_WEIGHT * artist_tier(&candidate.artist, &source.artist);

    if let (Some(a), Some(b)) = (candidate.duration_ms, source.duration_ms) {
        if a.abs_diff(b) <= DURATION_TOLERANCE_MS {
            total += DURATION_BONUS;
        }
    }

    if let (Some(a), Some(b)) = (candidate.album.as_deref(), source.album.as_deref()) {
        if !text::clean(a).is_empty() && text::clean(a) == text::clean(b) {
            total += ALBUM_BONUS;
        }
    }

    total
}

/// Title tiers: clean-equal is a full match, equal after stripping
/// featured credits is most of one, substring containment half.
fn title_tier(candidate: &str, source: &str) -> f32 {
    let clean_candidate = text::clean(candidate);
    let clean_source = text::clean(source);
    if clean_candidate.is_empty() || clean_source.is_empty() {
        return 0.0;
    }
    if clean_candidate == clean_source {
        return 1.0;
    }
    let defeat_candidate = text::clean(&text::remove_featuring(candidate));
    let defeat_source = text::clean(&text::remove_featuring(source));
    if !defeat_candidate.is_empty() && defeat_candidate == defeat_source {
        return 0.75;
    }
    if clean_candidate.contains(&clean_source) || clean_source.contains(&clean_candidate) {
        return 0.5;
    }
    0.0
}

/// Artist tiers mirror the title tiers but compare on the order-free
/// normalized form, so "A & B" matches "B, A" at full strength.
fn artist_tier(candidate: &str, source: &str) -> f32 {
    let norm_candidate = text::normalize_artist(candidate);
    let norm_source = text::normalize_artist(source);
    if norm_candidate.is_empty() || norm_source.is_empty() {
        return 0.0;
    }
    if norm_candidate == norm_source {
        return 1.0;
    }
    let defeat_candidate = text::clean(&text::remove_featuring(candidate));
    let defeat_source = text::clean(&text::remove_featuring(source));
    if !defeat_candidate.is_empty() && defeat_candidate == defeat_source {
        return 0.75;
    }
    if norm_candidate.contains(&norm_source) || norm_source.contains(&norm_candidate) {
        return 0.5;
    }
    0.0
}

fn score_artist(candidate: &ContentMetadata, source: &ContentMetadata) -> f32 {
    let candidate_name = text::clean(&candidate.artist);
    let source_name = text::clean(&source.artist);

    let mut total = if candidate_name.is_empty() || source_name.is_empty() {
        0.0
    } else if candidate_name == source_name {
        0.8
    } else if candidate_name.contains(&source_name) || source_name.contains(&candidate_name) {
        0.4
    } else {
        0.0
    };

    total += 0.2 * text::genre_overlap(&candidate.genres, &source.genres);
    total
}
