//! Conversion service - orchestrates the whole pipeline.
//!
//! This is the high-level API for converting a link:
//! 1. Parse the URL into platform + content type + id
//! 2. Fetch canonical metadata from the source platform
//! 3. Generate search queries, most specific first
//! 4. Drive them against the target platform and select the winner
//! 5. Compute the user-facing confidence for the final pair
//!
//! One call, one sequential pipeline. Concurrent conversions are
//! independent; the only shared state is the cached Spotify token
//! inside the credential provider.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::link;
use crate::matching::{confidence, query, select, SearchPolicy};
use crate::model::{ContentMetadata, ConversionResult, Direction, ParsedLink, Platform};
use crate::providers::credentials::{ClientCredentials, CredentialProvider};
use crate::providers::traits::{CatalogLookup, CatalogSearch};
use crate::providers::{AppleClient, SpotifyClient};

/// Link conversion service.
///
/// Holds one client per platform; either can play source or target
/// depending on which way the link points.
pub struct Converter {
    apple: AppleClient,
    spotify: SpotifyClient,
    spotify_policy: SearchPolicy,
    apple_policy: SearchPolicy,
}

impl Converter {
    /// Create a converter from loaded configuration.
    ///
    /// Fails with [`crate::ConvertError::CredentialsMissing`] when the
    /// Spotify application credentials are absent; an engine that can
    /// only ever serve half its conversions is better off refusing to
    /// start.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = Arc::new(ClientCredentials::from_config(config)?);
        Ok(Self::with_credentials(credentials, config))
    }

    /// Create a converter with an explicit credential provider.
    pub fn with_credentials(
        credentials: Arc<dyn CredentialProvider>,
        config: &Config,
    ) -> Self {
        Self {
            apple: AppleClient::new(),
            spotify: SpotifyClient::new(credentials),
            spotify_policy: config.matching.spotify_policy(),
            apple_policy: config.matching.apple_policy(),
        }
    }

    /// Convert a link to its counterpart on the other platform.
    pub async fn convert(&self, raw_url: &str) -> Result<ConversionResult> {
        let parsed = link::parse(raw_url)?;
        tracing::info!(
            platform = %parsed.platform,
            content_type = %parsed.content_type,
            id = %parsed.id,
            "converting link"
        );

        match parsed.platform {
            Platform::AppleMusic => {
                run_pipeline(
                    &parsed,
                    &self.apple,
                    &self.spotify,
                    &self.spotify_policy,
                    Direction::AppleToSpotify,
                )
                .await
            }
            Platform::Spotify => {
                run_pipeline(
                    &parsed,
                    &self.spotify,
                    &self.apple,
                    &self.apple_policy,
                    Direction::SpotifyToApple,
                )
                .await
            }
        }
    }
}

/// Fetch the source record, then match it on the target catalog. Both
/// collaborators come in as traits so tests can run the whole pipeline
/// against canned catalogs.
async fn run_pipeline(
    parsed: &ParsedLink,
    source_catalog: &dyn CatalogLookup,
    target: &dyn CatalogSearch,
    policy: &SearchPolicy,
    direction: Direction,
) -> Result<ConversionResult> {
    let source = source_catalog.lookup(parsed).await?;
    match_on_target(source, target, policy, direction).await
}

/// Search the target catalog for the source record and assemble the
/// final result. Split out from [`Converter`] so tests can drive it
/// with canned catalogs.
async fn match_on_target(
    source: ContentMetadata,
    target: &dyn CatalogSearch,
    policy: &SearchPolicy,
    direction: Direction,
) -> Result<ConversionResult> {
    let queries = query::generate(&source);
    tracing::debug!(count = queries.len(), "generated search queries");

    let best = select::select_best(target, &source, &queries, policy).await?;
    let confidence = confidence::confidence(&source, &best.candidate);
    tracing::info!(
        matched_url = %best.candidate.external_url,
        raw_score = best.raw_score,
        confidence,
        "selected match"
    );

    Ok(ConversionResult {
        direction,
        matched_url: best.candidate.external_url.clone(),
        source,
        matched: best.candidate,
        confidence,
    })
}
