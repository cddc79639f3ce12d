//! Trait definitions for platform catalog clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! substitute canned catalogs and never touch the network.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{ContentMetadata, ContentType, ParsedLink, Platform};

/// A catalog that can be searched with free-text queries.
///
/// The selector drives this one query at a time; implementations
/// return results in the platform's own relevance order.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Which platform this catalog belongs to.
    fn platform(&self) -> Platform;

    /// Run one search query, returning up to `limit` candidates.
    async fn search(
        &self,
        query: &str,
        content_type: ContentType,
        limit: u32,
    ) -> Result<Vec<ContentMetadata>>;
}

/// A catalog that can resolve a parsed link to its canonical record.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetch canonical metadata for the id a link points at.
    async fn lookup(&self, link: &ParsedLink) -> Result<ContentMetadata>;
}
