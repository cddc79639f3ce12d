//! Crate-wide error types.
//!
//! One `thiserror` enum covers the whole conversion pipeline. The
//! variants match the ways a conversion can fail from the caller's
//! point of view, so the embedding layer can map them to status codes
//! without string-matching.
//!
//! Propagation policy: link-parse and credential errors abort a
//! conversion immediately. Individual search failures do not; the
//! selector logs them and tries the next query, and only surfaces
//! [`ConvertError::ExternalApi`] when every query came back empty.

use crate::model::Platform;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Top-level conversion error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConvertError {
    /// The input URL is not a recognizable Apple Music or Spotify link.
    #[error("invalid link: {0}")]
    InvalidLink(String),

    /// The credential provider could not supply a bearer token.
    /// This is a configuration problem, not a transient failure.
    #[error("missing credentials: {0}")]
    CredentialsMissing(String),

    /// The source platform's catalog has no record for the parsed id.
    #[error("no metadata found on {platform} for id {id}")]
    MetadataNotFound { platform: Platform, id: String },

    /// Every generated query was tried and nothing cleared the
    /// acceptance threshold.
    #[error("no match found on {platform}")]
    NoMatchFound { platform: Platform },

    /// A collaborator API failed (network, HTTP error, or a response
    /// body we could not parse).
    #[error("external API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    ExternalApi {
        status: Option<u16>,
        message: String,
    },
}

impl ConvertError {
    /// Network/transport failure from a collaborator.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::ExternalApi {
            status: None,
            message: err.to_string(),
        }
    }

    /// HTTP-level failure with a status code.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::ExternalApi {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Response body that did not match the expected shape.
    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::ExternalApi {
            status: None,
            message: format!("unparseable response: {err}"),
        }
    }
}
