//! Error taxonomy shared by the token provider, the catalog client, the
//! discovery pipeline and the HTTP layer.
//!
//! Only the boundary (HTTP handlers and CLI commands) logs errors. Everything
//! below it returns them as values.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, e.g. absent client credentials.
    #[error("{0}")]
    Config(String),

    /// The client-credentials exchange failed.
    #[error("token request failed: {0}")]
    Auth(String),

    /// A catalog API call failed (transport, non-2xx status or bad payload).
    #[error("{0}")]
    Upstream(String),

    /// A preview lookup failed. Never surfaced past the preview resolver.
    #[error("preview lookup failed: {0}")]
    Preview(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}
