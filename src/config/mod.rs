//! Configuration module for xkcd-bot
//!
//! This module handles loading, parsing, and validating the TOML configuration
//! file. Every section has defaults, so running without a file is valid.
//!
//! # Example
//!
//! ```no_run
//! use xkcd_bot::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("xkcd-bot.toml")).unwrap();
//! println!("Comics live under: {}", config.site.comic_prefix);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BotConfig, Config, HttpConfig, ReplyConfig, ReplyFormat, SiteConfig, FALLBACK_LATEST_ID,
    STANDARDS_COMIC_ID,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_token};
pub use validation::{is_valid_command_name, validate};
