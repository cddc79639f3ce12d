//! Query iteration and winner selection.
//!
//! Runs the generated queries against the target catalog in order,
//! scoring every candidate. Two exits:
//!
//! - High-confidence short-circuit: a query whose best raw score beats
//!   the policy cutoff wins immediately, skipping the remaining
//!   (costly) search calls.
//! - Exhaustion: after all queries, the best boosted candidate wins if
//!   its raw score clears the acceptance floor.
//!
//! Candidates are ranked by boosted score, so an exact-artist original
//! beats a cover with marginally better text, and popularity breaks
//! what remains. Per-query search failures are logged and treated as
//! empty result sets; a failure only reaches the caller when no query
//! produced any candidate at all.

use crate::error::{ConvertError, Result};
use crate::matching::score::{boost, score};
use crate::matching::SearchPolicy;
use crate::model::{ContentMetadata, ScoredCandidate};
use crate::providers::traits::CatalogSearch;

/// Run every query against `target` and pick the best candidate under
/// `policy`.
pub async fn select_best(
    target: &dyn CatalogSearch,
    source: &ContentMetadata,
    queries: &[String],
    policy: &SearchPolicy,
) -> Result<ScoredCandidate> {
    let mut best: Option<ScoredCandidate> = None;
    let mut saw_candidates = false;
    let mut last_error: Option<ConvertError> = None;

    for query in queries {
        let results = match target
            .search(query, source.content_type, policy.limit)
            .await
        {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "search query failed, trying next");
                last_error = Some(err);
                continue;
            }
        };

        let mut query_best: Option<ScoredCandidate> = None;
        for candidate in results {
            saw_candidates = true;
            let raw = score(&candidate, source);
            let boosted = boost(raw, &candidate, source);
            let scored = ScoredCandidate {
                candidate,
                raw_score: raw,
                boosted_score: boosted,
            };

            if query_best
                .as_ref()
                .is_none_or(|current| scored.raw_score > current.raw_score)
            {
                query_best = Some(scored.clone());
            }
            // Only candidates clearing the floor compete overall.
            if scored.raw_score > policy.accept
                && best
                    .as_ref()
                    .is_none_or(|current| scored.boosted_score > current.boosted_score)
            {
                best = Some(scored);
            }
        }

        if let Some(top) = query_best {
            tracing::debug!(query = %query, raw = top.raw_score, "scored query results");
            if top.raw_score > policy.high_confidence {
                tracing::debug!(
                    query = %query,
                    raw = top.raw_score,
                    "high-confidence hit, skipping remaining queries"
                );
                return Ok(top);
            }
        }
    }

    if let Some(best) = best {
        return Ok(best);
    }

    // Every query came back empty. If the searches themselves were
    // failing, that is the more useful error to surface.
    if !saw_candidates {
        if let Some(err) = last_error {
            return Err(err);
        }
    }
    Err(ConvertError::NoMatchFound {
        platform: target.platform(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentType, Platform};
    use crate::providers::traits::mocks::{MockCatalog, SequencedCatalog};

    fn track(title: &str, artist: &str) -> ContentMetadata {
        ContentMetadata {
            content_type: ContentType::Track,
            title: title.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        }
    }

    fn queries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("query {i}")).collect()
    }

    #[tokio::test]
    async fn test_high_confidence_short_circuits() {
        let mut source = track("Blinding Lights", "The Weeknd");
        source.duration_ms = Some(200_040);
        let mut hit = track("Blinding Lights", "The Weeknd");
        hit.duration_ms = Some(200_000);
        let catalog = MockCatalog::returning(vec![hit]);

        let best = select_best(&catalog, &source, &queries(5), &SearchPolicy::for_spotify())
            .await
            .unwrap();

        assert!(best.raw_score > 0.8);
        assert_eq!(catalog.call_count(), 1);
    }

    #[tokio::test]
    async fn test_exhausts_queries_below_high_confidence() {
        let source = track("Blinding Lights", "The Weeknd");
        // Same title, different artist: decent but not high confidence.
        let catalog =
            MockCatalog::returning(vec![track("Blinding Lights", "The Weeknd Orchestra")]);

        let _ = select_best(&catalog, &source, &queries(4), &SearchPolicy::for_spotify()).await;

        assert_eq!(catalog.call_count(), 4);
    }

    #[tokio::test]
    async fn test_original_artist_beats_popular_tribute() {
        let source = track("Blinding Lights", "The Weeknd");
        let original = track("Blinding Lights", "The Weeknd");
        let mut tribute = track("Blinding Lights", "The Weeknd Tribute");
        tribute.popularity = 100;

        let catalog = MockCatalog::returning(vec![tribute, original]);
        let best = select_best(&catalog, &source, &queries(1), &SearchPolicy::for_spotify())
            .await
            .unwrap();

        assert_eq!(best.candidate.artist, "The Weeknd");
    }

    #[tokio::test]
    async fn test_popularity_breaks_ties_between_equal_candidates() {
        let source = track("Song", "Queen & David Bowie");
        // Neither candidate matches the source credit exactly, so the
        // originality bonus stays out of the picture.
        let mut quiet = track("Song", "Queen");
        quiet.popularity = 5;
        quiet.external_url = "quiet".to_string();
        let mut popular = quiet.clone();
        popular.popularity = 95;
        popular.external_url = "popular".to_string();

        let catalog = MockCatalog::returning(vec![quiet, popular]);
        let best = select_best(&catalog, &source, &queries(1), &SearchPolicy::for_apple())
            .await
            .unwrap();

        assert_eq!(best.candidate.external_url, "popular");
    }

    #[tokio::test]
    async fn test_cross_query_best_wins() {
        let source = track("Song Title", "First Aid Kit & Conor Oberst");
        // First query surfaces a weak partial, second a decent one.
        let weak = track("Song Title Extended Club Megamix", "Somebody");
        let decent = track("Song Title", "First Aid Kit");
        let catalog = SequencedCatalog::new(vec![vec![weak], vec![decent]]);

        let best = select_best(&catalog, &source, &queries(3), &SearchPolicy::for_apple())
            .await
            .unwrap();

        assert_eq!(best.candidate.artist, "First Aid Kit");
        assert_eq!(catalog.call_count(), 3);
    }

    #[tokio::test]
    async fn test_no_match_when_nothing_clears_floor() {
        let source = track("Blinding Lights", "The Weeknd");
        let catalog = MockCatalog::returning(vec![track("Unrelated", "Someone")]);

        let err = select_best(&catalog, &source, &queries(2), &SearchPolicy::for_spotify())
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::NoMatchFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_results_give_no_match() {
        let source = track("Blinding Lights", "The Weeknd");
        let catalog = MockCatalog::empty();

        let err = select_best(&catalog, &source, &queries(3), &SearchPolicy::for_spotify())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::NoMatchFound {
                platform: Platform::Spotify
            }
        ));
        assert_eq!(catalog.call_count(), 3);
    }

    #[tokio::test]
    async fn test_search_errors_surface_only_when_nothing_matched() {
        let source = track("Blinding Lights", "The Weeknd");
        let catalog = MockCatalog::failing(ConvertError::http(502, "bad gateway"));

        let err = select_best(&catalog, &source, &queries(3), &SearchPolicy::for_spotify())
            .await
            .unwrap_err();

        // All queries failed, so the transport error is surfaced.
        assert!(matches!(err, ConvertError::ExternalApi { .. }));
        assert_eq!(catalog.call_count(), 3);
    }

    #[tokio::test]
    async fn test_no_queries_is_no_match() {
        let source = track("Blinding Lights", "The Weeknd");
        let catalog = MockCatalog::empty();

        let err = select_best(&catalog, &source, &[], &SearchPolicy::for_spotify())
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::NoMatchFound { .. }));
    }
}
