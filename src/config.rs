//! Configuration management for previewfm.
//!
//! Configuration is read once at startup into an explicit [`Config`] value that
//! is handed to the discovery pipeline. Nothing below this module looks at the
//! process environment.
//!
//! Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`previewfm/.env`)
//! 4. Built-in defaults (everything except the client credentials)

use std::{env, fmt, path::PathBuf};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_EMBED_URL: &str = "https://open.spotify.com/embed";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_PORT: u16 = 3000;

/// Loads `.env` files into the process environment.
///
/// A `.env` in the working directory is read first, then the one in the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/previewfm/.env`
/// - macOS: `~/Library/Application Support/previewfm/.env`
/// - Windows: `%LOCALAPPDATA%/previewfm/.env`
///
/// Variables that are already set are never overwritten, and missing files
/// are not an error. The data directory is created if it does not exist so
/// users have an obvious place to drop their credentials.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        debug!("Loaded environment from {}", path.display());
    }

    Ok(())
}

/// Builds the log filter from a `RUST_LOG` value, defaulting to `info`.
///
/// The value is used as-is, so a bare level such as `debug` applies to
/// every target.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("previewfm/.env");
    path
}

/// Client id/secret pair for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Runtime configuration of the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SPOTIFY_CLIENT_ID`
    pub client_id: Option<String>,
    /// `SPOTIFY_CLIENT_SECRET`
    pub client_secret: Option<String>,
    /// `SPOTIFY_API_URL`, base of the Web API without trailing slash.
    pub api_url: String,
    /// `SPOTIFY_API_TOKEN_URL`
    pub token_url: String,
    /// `SPOTIFY_EMBED_URL`, base of the public embed player pages.
    pub embed_url: String,
    /// `SPOTIFY_MARKET`, region code used for top tracks.
    pub market: String,
    /// `SERVER_ADDRESS`, or `0.0.0.0:$PORT`.
    pub server_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            server_address: format!("0.0.0.0:{DEFAULT_PORT}"),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let server_address = get("SERVER_ADDRESS")
            .or_else(|| get("PORT").map(|port| format!("0.0.0.0:{port}")))
            .unwrap_or(defaults.server_address);

        Self {
            client_id: get("SPOTIFY_CLIENT_ID"),
            client_secret: get("SPOTIFY_CLIENT_SECRET"),
            api_url: trim_base(get("SPOTIFY_API_URL").unwrap_or(defaults.api_url)),
            token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.token_url),
            embed_url: trim_base(get("SPOTIFY_EMBED_URL").unwrap_or(defaults.embed_url)),
            market: get("SPOTIFY_MARKET").unwrap_or(defaults.market),
            server_address,
        }
    }

    /// Returns the client credentials, or a configuration error when either
    /// half is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => Err(Error::Config("missing credentials".to_string())),
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
