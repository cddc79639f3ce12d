//! iTunes catalog HTTP client
//!
//! Handles communication with the iTunes Search API, which backs both
//! the source-metadata lookup for Apple Music links and the search
//! side when Apple Music is the conversion target.
//!
//! The API is public: no credentials, generous rate limits, JSON out.
//! Lookups are keyed by the numeric catalog id plus the storefront
//! country; searches take free text. The API has no field query
//! syntax, so an `isrc:`-style query simply matches nothing, which the
//! selector treats like any other miss.

use async_trait::async_trait;

use super::{adapter, dto};
use crate::error::{ConvertError, Result};
use crate::model::{ContentMetadata, ContentType, ParsedLink, Platform};
use crate::providers::traits::{CatalogLookup, CatalogSearch};

/// iTunes API client.
pub struct AppleClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AppleClient {
    /// Create a new client.
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://itunes.apple.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::new();
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the canonical record for a catalog id in a storefront.
    pub async fn lookup_id(
        &self,
        id: &str,
        region: &str,
        content_type: ContentType,
    ) -> Result<ContentMetadata> {
        let url = format!(
            "{}/lookup?id={}&country={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(region)
        );
        let response = self.send(&url).await?;

        adapter::to_metadata_of_type(&response, content_type).ok_or_else(|| {
            ConvertError::MetadataNotFound {
                platform: Platform::AppleMusic,
                id: id.to_string(),
            }
        })
    }

    async fn send(&self, url: &str) -> Result<dto::ItunesResponse> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ConvertError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConvertError::http(
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        response
            .json::<dto::ItunesResponse>()
            .await
            .map_err(ConvertError::parse)
    }

    fn entity_for(content_type: ContentType) -> &'static str {
        match content_type {
            ContentType::Track => "song",
            ContentType::Album => "album",
            ContentType::Artist => "musicArtist",
        }
    }
}

impl Default for AppleClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSearch for AppleClient {
    fn platform(&self) -> Platform {
        Platform::AppleMusic
    }

    async fn search(
        &self,
        query: &str,
        content_type: ContentType,
        limit: u32,
    ) -> Result<Vec<ContentMetadata>> {
        let url = format!(
            "{}/search?term={}&country=us&media=music&entity={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            Self::entity_for(content_type),
            limit
        );
        let response = self.send(&url).await?;

        Ok(response
            .results
            .iter()
            .filter_map(adapter::to_metadata)
            .filter(|meta| meta.content_type == content_type)
            .collect())
    }
}

#[async_trait]
impl CatalogLookup for AppleClient {
    async fn lookup(&self, link: &ParsedLink) -> Result<ContentMetadata> {
        self.lookup_id(&link.id, &link.region, link.content_type)
            .await
    }
}
