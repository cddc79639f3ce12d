//! Text normalization and similarity primitives.
//!
//! Catalog text is noisy: "(feat. X)" suffixes, remaster tags, curly
//! quotes, reordered artist credits. Everything here canonicalizes
//! free text for comparison; nothing mutates the metadata the caller
//! sees.
//!
//! Every function is pure and total over any input string, including
//! the empty string. Matching happens on lowercased text throughout;
//! display strings are never built from these outputs.

use std::collections::HashSet;

/// Parenthetical keywords that mark an alternate version of a
/// recording rather than a different work.
const VERSION_KEYWORDS: &[&str] = &[
    "remaster",
    "remastered",
    "remix",
    "version",
    "edit",
    "deluxe",
    "anniversary",
    "edition",
    "super",
    "mono",
    "stereo",
    "expanded",
    "live",
    "acoustic",
    "demo",
    "single",
];

/// Markers that introduce a featured-artist credit.
const FEATURE_MARKERS: &[&str] = &["featuring", "feat.", "feat", "ft.", "ft", "with"];

/// Phrases that give away a tribute or cover act.
const TRIBUTE_KEYWORDS: &[&str] = &[
    "tribute",
    "covers",
    "performs",
    "plays",
    "karaoke",
    "in the style of",
    "ukulele",
    "instrumental",
    "orchestra",
    "string quartet",
    "lullaby",
    "piano version",
    "jazz version",
];

/// Lowercase, strip punctuation to spaces, collapse whitespace, trim.
///
/// Punctuation covers ASCII punctuation plus the Unicode general
/// punctuation block (curly quotes, en/em dashes, ellipsis), which is
/// where most cross-platform formatting differences live.
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mapped: String = lowered
        .chars()
        .map(|c| if is_stripped_punctuation(c) { ' ' } else { c })
        .collect();
    collapse_whitespace(&mapped)
}

fn is_stripped_punctuation(c: char) -> bool {
    if c.is_ascii_punctuation() {
        return true;
    }
    // U+2000..U+206F is the general punctuation block. U+00A1..U+00BF
    // catches inverted punctuation and guillemets from Latin-1.
    matches!(c as u32, 0x2000..=0x206F | 0x00A1..=0x00BF)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip featured-artist credits and any remaining parenthetical
/// content.
///
/// Handles both bracketed credits ("Song (feat. X)") and trailing
/// unbracketed ones ("Song feat. X"). A marker as the very first word
/// is left alone so titles like "With or Without You" survive.
pub fn remove_featuring(text: &str) -> String {
    let without_parens = strip_bracketed(text, |_| true);
    let words: Vec<&str> = without_parens.split_whitespace().collect();
    let cut = words.iter().position(|w| {
        let lower = w.to_lowercase();
        FEATURE_MARKERS.contains(&lower.as_str())
    });
    match cut {
        Some(idx) if idx > 0 => words[..idx].join(" "),
        _ => words.join(" "),
    }
}

/// Remove bracketed segments that tag an alternate version, plus
/// bracketed four-digit years. Idempotent: removing a segment never
/// creates a new bracket pair.
pub fn strip_version_tags(text: &str) -> String {
    let stripped = strip_bracketed(text, |inner| {
        let lower = inner.to_lowercase();
        if lower.trim().len() == 4 && lower.trim().chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        VERSION_KEYWORDS
            .iter()
            .any(|kw| lower.split_whitespace().any(|word| word.trim_matches(|c: char| !c.is_alphanumeric()) == *kw))
    });
    collapse_whitespace(&stripped)
}

/// Remove `(...)` and `[...]` segments whose content satisfies
/// `should_remove`. Unbalanced brackets are left untouched.
fn strip_bracketed(text: &str, should_remove: impl Fn(&str) -> bool) -> String {
    let mut out = text.to_string();
    for (open, close) in [('(', ')'), ('[', ']')] {
        let mut search_from = 0;
        while let Some(rel_start) = out[search_from..].find(open) {
            let start = search_from + rel_start;
            let Some(rel_end) = out[start..].find(close) else {
                break;
            };
            let end = start + rel_end;
            let inner = &out[start + open.len_utf8()..end];
            if should_remove(inner) {
                out = format!("{}{}", &out[..start], &out[end + close.len_utf8()..]);
                search_from = start;
            } else {
                search_from = end + close.len_utf8();
            }
        }
    }
    collapse_whitespace(&out)
}

/// Canonical, order-free form of an artist credit.
///
/// "A & B" and "B & A" normalize to the same string: split on the
/// common credit delimiters, clean and de-feature each name, sort,
/// rejoin. Used for equality comparison only, never display.
pub fn normalize_artist(text: &str) -> String {
    let mut segments: Vec<String> = text
        .split(['&', ','])
        .map(|part| clean(&remove_featuring(part)))
        .filter(|part| !part.is_empty())
        .collect();
    segments.sort();
    segments.join(" ")
}

/// Heuristic for cover/tribute acts masquerading as the original.
///
/// Fires when the candidate artist is not exactly the source artist
/// but either embeds it ("The Beatles Tribute Band" contains "The
/// Beatles") or carries a known tribute phrase. Pure penalty signal;
/// the scorer never hard-filters on it.
pub fn is_tribute_band(candidate_artist: &str, source_artist: &str) -> bool {
    let candidate = clean(candidate_artist);
    let source = clean(source_artist);
    if candidate.is_empty() || candidate == source {
        return false;
    }
    if !source.is_empty() && candidate.contains(&source) {
        return true;
    }
    TRIBUTE_KEYWORDS.iter().any(|kw| candidate.contains(kw))
}

/// Continuous similarity between two strings, in [0, 1].
///
/// Clean-equality scores 1.0 and feature-stripped equality 0.95. Below
/// that, token overlap (Jaccard) interpolates between 0.5 and 0.95, so
/// any non-garbage partial match keeps the floor the old step function
/// had while near-misses rank above distant ones.
pub fn similarity(a: &str, b: &str) -> f32 {
    let clean_a = clean(a);
    let clean_b = clean(b);
    if clean_a == clean_b {
        return 1.0;
    }
    if clean(&remove_featuring(a)) == clean(&remove_featuring(b)) {
        return 0.95;
    }
    let tokens_a: HashSet<&str> = clean_a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = clean_b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.5;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    0.5 + 0.45 * (intersection as f32 / union as f32)
}

/// Fraction of shared genres between two genre lists, in [0, 1].
/// Comparison is on cleaned names; Jaccard over the union.
pub fn genre_overlap(a: &[String], b: &[String]) -> f32 {
    let set_a: HashSet<String> = a.iter().map(|g| clean(g)).collect();
    let set_b: HashSet<String> = b.iter().map(|g| clean(g)).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f32 / union as f32
}

/// Replace standalone integers 0 through 20 with their English words.
///
/// Targets display differences like "7 rings" vs "seven rings".
/// Operates word-wise, so "2046" and "u2" are untouched.
pub fn spell_out_numbers(text: &str) -> String {
    const WORDS: [&str; 21] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty",
    ];
    text.split_whitespace()
        .map(|word| match word.parse::<usize>() {
            Ok(n) if n <= 20 => WORDS[n].to_string(),
            _ => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
