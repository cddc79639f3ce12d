//! The cross-platform matching engine.
//!
//! Four stages, each its own module:
//! 1. [`query`] turns source metadata into an ordered list of search
//!    queries, most specific first.
//! 2. [`score`] rates one search candidate against the source.
//! 3. [`select`] drives the queries against a target catalog and picks
//!    the winner under [`SearchPolicy`].
//! 4. [`confidence`] produces the user-facing 0-100 score for the
//!    final pair.

pub mod confidence;
pub mod query;
pub mod score;
pub mod select;

/// Thresholds governing when the selector stops searching and what it
/// is willing to return.
///
/// Both target platforms share the high-confidence cutoff but carry
/// their own acceptance floors; the two floors were tuned separately
/// against each platform's search behavior and are deliberately kept
/// as named constructors of one struct rather than scattered literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPolicy {
    /// Raw score at which a single query's best hit is returned
    /// immediately, skipping the remaining queries.
    pub high_confidence: f32,
    /// Minimum raw score a candidate needs to be returned at all.
    pub accept: f32,
    /// Results requested per search call.
    pub limit: u32,
}

impl SearchPolicy {
    pub const DEFAULT_HIGH_CONFIDENCE: f32 = 0.8;
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Policy for searches against the Spotify catalog.
    pub fn for_spotify() -> Self {
        Self {
            high_confidence: Self::DEFAULT_HIGH_CONFIDENCE,
            accept: 0.6,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Policy for searches against the iTunes catalog, whose term
    /// matching is coarser and needs a looser floor.
    pub fn for_apple() -> Self {
        Self {
            high_confidence: Self::DEFAULT_HIGH_CONFIDENCE,
            accept: 0.3,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::for_spotify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_platform_floors_differ() {
        assert!(SearchPolicy::for_spotify().accept > SearchPolicy::for_apple().accept);
        assert_eq!(
            SearchPolicy::for_spotify().high_confidence,
            SearchPolicy::for_apple().high_confidence
        );
    }
}
