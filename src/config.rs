//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\songbridge\config.toml
//! - macOS: ~/Library/Application Support/songbridge/config.toml
//! - Linux: ~/.config/songbridge/config.toml
//!
//! Carries the Spotify application credentials and the matching
//! thresholds. Environment variables `SPOTIFY_CLIENT_ID` and
//! `SPOTIFY_CLIENT_SECRET` override whatever the file says, so
//! deployments can keep secrets out of the filesystem.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::matching::SearchPolicy;

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Matching thresholds
    pub matching: MatchingConfig,
}

/// API credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify application client id (client-credentials flow)
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret
    pub spotify_client_secret: Option<String>,
}

impl Credentials {
    /// Resolve the Spotify client id, environment winning over file.
    pub fn resolved_client_id(&self) -> Option<String> {
        std::env::var("SPOTIFY_CLIENT_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.spotify_client_id.clone())
    }

    /// Resolve the Spotify client secret, environment winning over file.
    pub fn resolved_client_secret(&self) -> Option<String> {
        std::env::var("SPOTIFY_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.spotify_client_secret.clone())
    }
}

/// Matching thresholds, per target platform.
///
/// The two targets ship different acceptance floors: Spotify search is
/// precise enough to demand 0.6, while iTunes search needs the looser
/// 0.3 floor to cope with its coarser term matching. Both live here so
/// tuning one direction cannot silently drift the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Raw score at which a single query's top hit wins immediately
    pub high_confidence: f32,

    /// Acceptance floor when Spotify is the search target
    pub spotify_accept: f32,

    /// Acceptance floor when Apple Music is the search target
    pub apple_accept: f32,

    /// Results requested per search query
    pub search_limit: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            high_confidence: SearchPolicy::DEFAULT_HIGH_CONFIDENCE,
            spotify_accept: SearchPolicy::for_spotify().accept,
            apple_accept: SearchPolicy::for_apple().accept,
            search_limit: SearchPolicy::DEFAULT_LIMIT,
        }
    }
}

impl MatchingConfig {
    /// Policy applied when Spotify is the search target.
    pub fn spotify_policy(&self) -> SearchPolicy {
        SearchPolicy {
            high_confidence: self.high_confidence,
            accept: self.spotify_accept,
            limit: self.search_limit,
        }
    }

    /// Policy applied when Apple Music is the search target.
    pub fn apple_policy(&self) -> SearchPolicy {
        SearchPolicy {
            high_confidence: self.high_confidence,
            accept: self.apple_accept,
            limit: self.search_limit,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songbridge"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk.
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk.
///
/// Creates the config directory if it doesn't exist. Writes to a temp
/// file and renames so a crash never leaves a half-written config.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir.join("config.toml"))
}

fn save_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}
