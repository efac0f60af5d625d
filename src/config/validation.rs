use crate::config::types::{BotConfig, Config, HttpConfig, ReplyConfig, SiteConfig};
use crate::ConfigError;
use std::collections::BTreeMap;
use url::Url;

/// Longest slash-command name Discord accepts
const MAX_COMMAND_NAME_LEN: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_bot_config(&config.bot)?;
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_reply_config(&config.replies)?;
    validate_aliases(&config.bot.command_prefix, &config.aliases)?;
    Ok(())
}

/// Checks a name against Discord's slash-command naming rules
///
/// Lowercase ASCII letters, digits, `-` and `_`, 1 to 32 characters.
pub fn is_valid_command_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_COMMAND_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Validates bot configuration
fn validate_bot_config(config: &BotConfig) -> Result<(), ConfigError> {
    if !is_valid_command_name(&config.command_prefix) {
        return Err(ConfigError::Validation(format!(
            "command-prefix '{}' is not a valid command name",
            config.command_prefix
        )));
    }

    if config.guild_id == Some(0) {
        return Err(ConfigError::Validation(
            "guild-id cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("comic-prefix", &config.comic_prefix)?;
    validate_http_url("random-url", &config.random_url)?;

    // Comic N is addressed by appending N to the prefix
    if !config.comic_prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "comic-prefix must end with '/', got '{}'",
            config.comic_prefix
        )));
    }

    if config.image_host.is_empty()
        || !config
            .image_host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':')
    {
        return Err(ConfigError::Validation(format!(
            "image-host '{}' is not a valid host",
            config.image_host
        )));
    }

    if config.fallback_latest_id < 1 {
        return Err(ConfigError::Validation(
            "fallback-latest-id must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates reply messages; Discord rejects empty message content
fn validate_reply_config(config: &ReplyConfig) -> Result<(), ConfigError> {
    let messages = [
        ("not-yet-written", &config.not_yet_written),
        ("not-found", &config.not_found),
        ("unknown-alias", &config.unknown_alias),
        ("unavailable", &config.unavailable),
    ];

    for (key, message) in messages {
        if message.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "replies.{} cannot be empty",
                key
            )));
        }
    }

    Ok(())
}

/// Validates alias entries; each becomes a `<prefix>-<alias>` command
fn validate_aliases(prefix: &str, aliases: &BTreeMap<String, u32>) -> Result<(), ConfigError> {
    for (name, id) in aliases {
        if *id < 1 {
            return Err(ConfigError::Validation(format!(
                "alias '{}' must point at a comic >= 1",
                name
            )));
        }

        if matches!(name.as_str(), "latest" | "random") {
            return Err(ConfigError::Validation(format!(
                "alias '{}' clashes with a built-in command",
                name
            )));
        }

        let command = format!("{}-{}", prefix, name);
        if !is_valid_command_name(name) || !is_valid_command_name(&command) {
            return Err(ConfigError::Validation(format!(
                "alias '{}' does not form a valid command name",
                name
            )));
        }
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}
