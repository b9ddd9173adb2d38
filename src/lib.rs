//! previewfm - artist discovery proxy with track previews
//!
//! This library authenticates against the Spotify Web API with the
//! client-credentials grant, picks an artist (filtered by genre or at random),
//! fetches the artist's top tracks and enriches each one with preview clip
//! URLs. The same pipeline backs an HTTP service and a small CLI.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and response mapping
//! - `cli` - One-shot command implementations
//! - `config` - Configuration loading from `.env` and environment variables
//! - `discovery` - The discovery and enrichment pipeline
//! - `error` - Error taxonomy
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Token provider, catalog client and preview resolver
//! - `types` - Upstream payloads and response bodies
//! - `utils` - Randomisation and formatting helpers
//!
//! # Example
//!
//! ```
//! use previewfm::{config::{self, Config}, discovery::Discovery};
//!
//! #[tokio::main]
//! async fn main() -> previewfm::error::Result<()> {
//!     config::load_env().await?;
//!     let discovery = Discovery::from_config(Config::from_env());
//!     let genres = discovery.genres().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching artists for genre {}", genre);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the CLI commands, where a failed request leaves nothing
/// else to do. It must never be used on the server path.
///
/// # Example
///
/// ```
/// fatal!("Failed to fetch genres: {}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! fatal {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
