//! Credential acquisition for platform APIs.
//!
//! The engine never reads secrets itself; it asks a
//! [`CredentialProvider`] for a bearer token whenever it needs one.
//! Production uses [`ClientCredentials`], the Spotify
//! client-credentials OAuth flow with an expiry-aware cache; tests use
//! [`StaticToken`]. Either way the provider is an explicit dependency
//! of the client that needs it, never ambient global state.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{ConvertError, Result};

/// Something that can hand out a bearer token on demand.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// A currently-valid bearer token, or
    /// [`ConvertError::CredentialsMissing`] when one cannot be had.
    async fn bearer_token(&self) -> Result<String>;
}

/// Fixed token, for tests and short-lived tooling.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// How long before actual expiry we treat a token as stale, so a
/// token never dies mid-pipeline.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Spotify client-credentials flow with a cached token.
///
/// Concurrent conversions share one instance. The cache check and the
/// refresh are not atomic; two pipelines racing past an expired token
/// both fetch a fresh one and the loser's write is simply redundant.
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Token endpoint response shape.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl ClientCredentials {
    /// Create a provider from an application id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ConvertError::CredentialsMissing(
                "Spotify client id/secret not configured".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client_id,
            client_secret,
            http_client,
            token_url: TOKEN_URL.to_string(),
            cached: RwLock::new(None),
        })
    }

    /// Create a provider from loaded configuration, environment
    /// variables winning over the config file.
    pub fn from_config(config: &Config) -> Result<Self> {
        let id = config.credentials.resolved_client_id().ok_or_else(|| {
            ConvertError::CredentialsMissing("SPOTIFY_CLIENT_ID not configured".to_string())
        })?;
        let secret = config.credentials.resolved_client_secret().ok_or_else(|| {
            ConvertError::CredentialsMissing("SPOTIFY_CLIENT_SECRET not configured".to_string())
        })?;
        Self::new(id, secret)
    }

    /// Create a provider for testing with a custom token endpoint.
    #[cfg(test)]
    pub fn with_token_url(
        client_id: &str,
        client_secret: &str,
        token_url: impl Into<String>,
    ) -> Result<Self> {
        let mut provider = Self::new(client_id, client_secret)?;
        provider.token_url = token_url.into();
        Ok(provider)
    }

    fn cached_token(&self) -> Option<String> {
        let guard = self.cached.read();
        guard
            .as_ref()
            .filter(|cached| cached.expires_at > Instant::now())
            .map(|cached| cached.token.clone())
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(ConvertError::network)?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            // The endpoint rejected our application credentials; no
            // amount of retrying fixes that.
            return Err(ConvertError::CredentialsMissing(format!(
                "token endpoint rejected client credentials (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConvertError::http(
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(ConvertError::parse)?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        Ok(CachedToken {
            token: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}

#[async_trait]
impl CredentialProvider for ClientCredentials {
    async fn bearer_token(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *self.cached.write() = Some(fresh);
        tracing::debug!("refreshed Spotify access token");
        Ok(token)
    }
}
