//! Search query generation.
//!
//! One source record fans out into an ordered list of query strings,
//! most specific first. Early queries are precise enough that a hit
//! lets the selector stop before burning more search calls; late
//! queries trade precision for recall against catalogs that format
//! the same recording differently.
//!
//! Generation is deterministic: the same metadata always yields the
//! same sequence. It is also platform-independent; a target that does
//! not understand a query form (iTunes has no `isrc:` field syntax)
//! simply returns nothing for it and the selector moves on.

use crate::model::{ContentMetadata, ContentType};
use crate::text;

/// Produce the ordered, deduplicated query list for a source record.
pub fn generate(source: &ContentMetadata) -> Vec<String> {
    let queries = match source.content_type {
        ContentType::Artist => artist_queries(source),
        ContentType::Track | ContentType::Album => recording_queries(source),
    };
    dedup_preserving_order(queries)
}

/// For artists there is no title to vary; the name itself, quoted and
/// unquoted, is the whole strategy.
fn artist_queries(source: &ContentMetadata) -> Vec<String> {
    let name = if source.artist.is_empty() {
        text::clean(&source.title)
    } else {
        text::clean(&source.artist)
    };
    if name.is_empty() {
        return Vec::new();
    }
    vec![format!("\"{name}\""), name]
}

fn recording_queries(source: &ContentMetadata) -> Vec<String> {
    let mut queries = Vec::new();

    // Exact-identifier query first; nothing text-based beats it.
    if let Some(isrc) = source.isrc.as_deref().filter(|s| !s.is_empty()) {
        queries.push(format!("isrc:{isrc}"));
    }

    let title = text::clean(&source.title);
    let artist = text::clean(&source.artist);
    if title.is_empty() {
        return queries;
    }

    push_pair(&mut queries, &title, &artist, true);

    let defeatured_title = text::clean(&text::remove_featuring(&source.title));
    let defeatured_artist = text::clean(&text::remove_featuring(&source.artist));
    push_pair(&mut queries, &defeatured_title, &defeatured_artist, true);

    let stripped_title =
        text::clean(&text::strip_version_tags(&text::remove_featuring(&source.title)));
    push_pair(&mut queries, &stripped_title, &defeatured_artist, true);

    if let Some(album) = source.album.as_deref() {
        let album_clean = text::clean(album);
        push_pair(&mut queries, &title, &album_clean, false);
        let album_stripped = text::clean(&text::strip_version_tags(album));
        push_pair(&mut queries, &title, &album_stripped, false);
    }

    // Loose fallback, no quoting at all.
    push_pair(&mut queries, &title, &artist, false);

    // Catalogs disagree on how collaborations are delimited.
    for variant in artist_delimiter_variants(&source.artist) {
        push_pair(&mut queries, &title, &variant, false);
    }

    // "7 rings" vs "seven rings" style display differences.
    let worded_title = text::spell_out_numbers(&title);
    if worded_title != title {
        push_pair(&mut queries, &worded_title, &artist, false);
    }

    queries
}

/// Append a title+qualifier query, quoted or loose. Empty qualifiers
/// degrade to a title-only query rather than a dangling pair.
fn push_pair(queries: &mut Vec<String>, first: &str, second: &str, quoted: bool) {
    if first.is_empty() {
        return;
    }
    let query = match (second.is_empty(), quoted) {
        (true, true) => format!("\"{first}\""),
        (true, false) => first.to_string(),
        (false, true) => format!("\"{first}\" \"{second}\""),
        (false, false) => format!("{first} {second}"),
    };
    queries.push(query);
}

/// Alternate renderings of a multi-artist credit: ampersand, comma,
/// and plain space joins. Single artists produce nothing.
fn artist_delimiter_variants(artist: &str) -> Vec<String> {
    let names: Vec<String> = artist
        .split(['&', ','])
        .map(|part| text::clean(part))
        .filter(|part| !part.is_empty())
        .collect();
    if names.len() < 2 {
        return Vec::new();
    }
    vec![
        names.join(" & "),
        names.join(", "),
        names.join(" "),
    ]
}

fn dedup_preserving_order(queries: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    queries
        .into_iter()
        .filter(|q| !q.is_empty() && seen.insert(q.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, artist: &str) -> ContentMetadata {
        ContentMetadata {
            content_type: ContentType::Track,
            title: title.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_isrc_query_comes_first() {
        let mut source = track("Blinding Lights", "The Weeknd");
        source.isrc = Some("USRC17607839".to_string());
        let queries = generate(&source);
        assert_eq!(queries[0], "isrc:USRC17607839");
    }

    #[test]
    fn test_quoted_pair_before_loose_pair() {
        let queries = generate(&track("Blinding Lights", "The Weeknd"));
        let quoted = queries
            .iter()
            .position(|q| q == "\"blinding lights\" \"the weeknd\"")
            .unwrap();
        let loose = queries
            .iter()
            .position(|q| q == "blinding lights the weeknd")
            .unwrap();
        assert!(quoted < loose);
    }

    #[test]
    fn test_featured_variant_included_when_different() {
        let queries = generate(&track("Lonely (feat. Benny Blanco)", "Justin Bieber"));
        assert!(queries.contains(&"\"lonely\" \"justin bieber\"".to_string()));
        // The full form stays in front of the de-featured form.
        let full = queries
            .iter()
            .position(|q| q.contains("feat"))
            .unwrap();
        let stripped = queries
            .iter()
            .position(|q| q == "\"lonely\" \"justin bieber\"")
            .unwrap();
        assert!(full < stripped);
    }

    #[test]
    fn test_album_queries_present() {
        let mut source = track("Blinding Lights", "The Weeknd");
        source.album = Some("After Hours (Deluxe)".to_string());
        let queries = generate(&source);
        assert!(queries.contains(&"blinding lights after hours deluxe".to_string()));
        assert!(queries.contains(&"blinding lights after hours".to_string()));
    }

    #[test]
    fn test_delimiter_variants_for_collaborations() {
        let queries = generate(&track("Under Pressure", "Queen & David Bowie"));
        assert!(queries.contains(&"under pressure queen & david bowie".to_string()));
        assert!(queries.contains(&"under pressure queen, david bowie".to_string()));
        assert!(queries.contains(&"under pressure queen david bowie".to_string()));
    }

    #[test]
    fn test_number_transliteration_variant() {
        let queries = generate(&track("7 rings", "Ariana Grande"));
        assert!(queries.contains(&"seven rings ariana grande".to_string()));
    }

    #[test]
    fn test_artist_content_skips_title_logic() {
        let source = ContentMetadata {
            content_type: ContentType::Artist,
            title: "The Weeknd".to_string(),
            artist: "The Weeknd".to_string(),
            ..Default::default()
        };
        let queries = generate(&source);
        assert_eq!(queries, vec!["\"the weeknd\"", "the weeknd"]);
    }

    #[test]
    fn test_no_duplicates_and_deterministic() {
        let source = track("Same Title", "Same Title");
        let first = generate(&source);
        let second = generate(&source);
        assert_eq!(first, second);
        let unique: std::collections::HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_empty_metadata_yields_no_queries() {
        let queries = generate(&track("", ""));
        assert!(queries.is_empty());
    }
}
