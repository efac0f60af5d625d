use serde::Deserialize;
use std::collections::BTreeMap;

/// Comic number of "Standards" (how standards proliferate)
pub const STANDARDS_COMIC_ID: u32 = 927;

/// Latest comic number assumed when the front page cannot be read
pub const FALLBACK_LATEST_ID: u32 = 2976;

/// Main configuration structure for xkcd-bot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub replies: ReplyConfig,

    /// Extra named comics, merged over the built-in `standards` alias
    #[serde(default)]
    pub aliases: BTreeMap<String, u32>,
}

impl Config {
    /// Returns the full alias table: built-ins first, then configured entries
    ///
    /// Configured entries with the same name replace the built-in ones.
    pub fn alias_table(&self) -> BTreeMap<String, u32> {
        let mut table = BTreeMap::new();
        table.insert("standards".to_string(), STANDARDS_COMIC_ID);
        for (name, id) in &self.aliases {
            table.insert(name.clone(), *id);
        }
        table
    }
}

/// Discord connection and command registration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot token; `--token` / `XKCD_BOT_TOKEN` take precedence
    pub token: Option<String>,

    /// Register commands to this guild only instead of globally
    #[serde(rename = "guild-id")]
    pub guild_id: Option<u64>,

    /// Name of the by-id command and prefix of all other commands
    #[serde(rename = "command-prefix")]
    pub command_prefix: String,

    /// Delete the commands this process registered when shutting down
    #[serde(rename = "remove-commands-on-shutdown")]
    pub remove_commands_on_shutdown: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            guild_id: None,
            command_prefix: "xkcd".to_string(),
            remove_commands_on_shutdown: true,
        }
    }
}

/// Where comics live and how the latest one is discovered
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Comic URL prefix; comic N lives at `{comic-prefix}{N}` and the
    /// front page at the prefix itself
    #[serde(rename = "comic-prefix")]
    pub comic_prefix: String,

    /// Endpoint that redirects to a random comic
    #[serde(rename = "random-url")]
    pub random_url: String,

    /// Host serving comic images
    #[serde(rename = "image-host")]
    pub image_host: String,

    /// Latest comic number used when live discovery fails
    #[serde(rename = "fallback-latest-id")]
    pub fallback_latest_id: u32,

    /// Refuse by-id requests past the latest comic without fetching them
    #[serde(rename = "check-latest")]
    pub check_latest: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            comic_prefix: "https://xkcd.com/".to_string(),
            random_url: "https://c.xkcd.com/random/comic/".to_string(),
            image_host: "imgs.xkcd.com".to_string(),
            fallback_latest_id: FALLBACK_LATEST_ID,
            check_latest: true,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: format!("xkcd-bot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// How resolved comics are rendered as reply text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyFormat {
    /// The bare permalink URL
    #[default]
    Permalink,
    /// Bold title line followed by the image URL
    TitleAndImage,
}

/// Reply rendering and the fixed messages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub format: ReplyFormat,

    #[serde(rename = "not-yet-written")]
    pub not_yet_written: String,

    #[serde(rename = "not-found")]
    pub not_found: String,

    #[serde(rename = "unknown-alias")]
    pub unknown_alias: String,

    pub unavailable: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            format: ReplyFormat::Permalink,
            not_yet_written: "Randall hasn't written that one yet!".to_string(),
            not_found: "Couldn't find that comic.".to_string(),
            unknown_alias: "I don't know that comic.".to_string(),
            unavailable: "The comic service is unavailable right now, try again later."
                .to_string(),
        }
    }
}
