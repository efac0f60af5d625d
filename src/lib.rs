//! xkcd-bot: slash-command comic lookups for Discord
//!
//! This crate resolves xkcd comics (by number, latest, random, or a named
//! alias) by fetching the comic site and extracting permalinks from the page
//! markup, and serves the results as Discord slash-command replies.

pub mod bot;
pub mod comic;
pub mod config;
pub mod state;

use thiserror::Error;

/// Main error type for xkcd-bot operations
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("No bot token supplied (use --token, XKCD_BOT_TOKEN or [bot] token)")]
    MissingToken,
}

/// Errors from a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Failed to read body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Result type alias for xkcd-bot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use comic::{ComicInfo, ComicRequest, Extractor, Fetcher, HttpFetcher, Resolution, Resolver};
pub use config::Config;
pub use state::ResolveState;
