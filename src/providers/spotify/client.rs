//! Spotify Web API HTTP client
//!
//! Handles communication with the Spotify Web API: detail lookups for
//! the reverse conversion direction and free-text search when Spotify
//! is the conversion target.
//!
//! Every request carries a bearer token from the injected
//! [`CredentialProvider`]; the client itself never sees application
//! secrets. Search supports field filters, which is what makes the
//! `isrc:` query the highest-precision strategy on this platform.

use std::sync::Arc;

use async_trait::async_trait;

use super::{adapter, dto};
use crate::error::{ConvertError, Result};
use crate::model::{ContentMetadata, ContentType, ParsedLink, Platform};
use crate::providers::credentials::CredentialProvider;
use crate::providers::traits::{CatalogLookup, CatalogSearch};

/// Spotify Web API client.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    base_url: String,
}

impl SpotifyClient {
    /// Create a new client backed by the given credential provider.
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
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
            credentials,
            base_url: "https://api.spotify.com/v1".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(
        credentials: Arc<dyn CredentialProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            credentials,
            base_url: base_url.into(),
        }
    }

    /// Fetch the canonical record for a catalog id.
    pub async fn get_by_id(
        &self,
        id: &str,
        content_type: ContentType,
    ) -> Result<ContentMetadata> {
        let endpoint = match content_type {
            ContentType::Track => "tracks",
            ContentType::Album => "albums",
            ContentType::Artist => "artists",
        };
        let url = format!("{}/{}/{}", self.base_url, endpoint, urlencoding::encode(id));
        let response = self.send(&url).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ConvertError::MetadataNotFound {
                platform: Platform::Spotify,
                id: id.to_string(),
            });
        }
        let response = Self::check_status(response).await?;

        match content_type {
            ContentType::Track => {
                let track: dto::TrackObject =
                    response.json().await.map_err(ConvertError::parse)?;
                Ok(adapter::track_to_metadata(&track))
            }
            ContentType::Album => {
                let album: dto::AlbumObject =
                    response.json().await.map_err(ConvertError::parse)?;
                Ok(adapter::album_to_metadata(&album))
            }
            ContentType::Artist => {
                let artist: dto::ArtistObject =
                    response.json().await.map_err(ConvertError::parse)?;
                Ok(adapter::artist_to_metadata(&artist))
            }
        }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        let token = self.credentials.bearer_token().await?;
        self.http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ConvertError::network)
    }

    /// Turn a non-2xx response into an error, preferring the API's own
    /// error message over the raw body.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<dto::ApiError>(&body)
            .map(|err| err.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        Err(ConvertError::http(status.as_u16(), message))
    }
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    async fn search(
        &self,
        query: &str,
        content_type: ContentType,
        limit: u32,
    ) -> Result<Vec<ContentMetadata>> {
        let url = format!(
            "{}/search?q={}&type={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            content_type.as_str(),
            limit
        );
        let response = self.send(&url).await?;
        let response = Self::check_status(response).await?;
        let parsed: dto::SearchResponse = response.json().await.map_err(ConvertError::parse)?;

        let results = match content_type {
            ContentType::Track => parsed
                .tracks
                .map(|page| {
                    page.items
                        .iter()
                        .map(adapter::track_to_metadata)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            ContentType::Album => parsed
                .albums
                .map(|page| {
                    page.items
                        .iter()
                        .map(adapter::album_to_metadata)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            ContentType::Artist => parsed
                .artists
                .map(|page| {
                    page.items
                        .iter()
                        .map(adapter::artist_to_metadata)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
        };
        Ok(results)
    }
}

#[async_trait]
impl CatalogLookup for SpotifyClient {
    async fn lookup(&self, link: &ParsedLink) -> Result<ContentMetadata> {
        self.get_by_id(&link.id, link.content_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::credentials::StaticToken;

    fn test_client() -> SpotifyClient {
        SpotifyClient::with_base_url(Arc::new(StaticToken::new("token")), "http://localhost:1")
    }

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new(Arc::new(StaticToken::new("token")));
        assert_eq!(client.base_url, "https://api.spotify.com/v1");
    }

    #[test]
    fn test_client_with_custom_url() {
        assert_eq!(test_client().base_url, "http://localhost:1");
    }

    #[tokio::test]
    async fn test_search_surfaces_transport_errors() {
        // Nothing listens on the test port; the failure must come back
        // as an external API error, not a panic.
        let err = test_client()
            .search("query", ContentType::Track, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::ExternalApi { .. }));
    }
}
