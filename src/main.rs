//! xkcd-bot main entry point
//!
//! This is the command-line interface for the xkcd Discord bot.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xkcd_bot::bot::{self, CommandKind, CommandSet};
use xkcd_bot::comic::{ComicRequest, HttpFetcher, Resolver};
use xkcd_bot::config::{load_config_with_hash, resolve_token, validate, Config};

/// xkcd-bot: xkcd comics as Discord slash commands
///
/// Answers /xkcd, /xkcd-latest, /xkcd-random and one command per configured
/// alias (such as /xkcd-standards) with the comic's permalink.
#[derive(Parser, Debug)]
#[command(name = "xkcd-bot")]
#[command(version)]
#[command(about = "xkcd comics as Discord slash commands", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Bot access token
    #[arg(long, env = "XKCD_BOT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the command table without connecting
    #[arg(long, conflicts_with = "resolve")]
    dry_run: bool,

    /// Resolve one request (latest, random, a number or an alias), print the
    /// reply and exit
    #[arg(long, value_name = "REQUEST", conflicts_with = "dry_run")]
    resolve: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            let cfg = Config::default();
            validate(&cfg)?;
            cfg
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(request) = &cli.resolve {
        handle_resolve(&config, request).await?;
    } else {
        handle_bot(config, cli.token.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("xkcd_bot=info,warn"),
            1 => EnvFilter::new("xkcd_bot=debug,info"),
            2 => EnvFilter::new("xkcd_bot=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective config and command table
fn handle_dry_run(config: &Config) {
    println!("=== xkcd-bot Dry Run ===\n");

    println!("Site:");
    println!("  Comic prefix: {}", config.site.comic_prefix);
    println!("  Random endpoint: {}", config.site.random_url);
    println!("  Image host: {}", config.site.image_host);
    println!("  Fallback latest: #{}", config.site.fallback_latest_id);
    println!("  Latest guard: {}", config.site.check_latest);

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nBot:");
    match config.bot.guild_id {
        Some(guild_id) => println!("  Commands registered to guild {}", guild_id),
        None => println!("  Commands registered globally"),
    }
    println!(
        "  Remove commands on shutdown: {}",
        config.bot.remove_commands_on_shutdown
    );
    println!("  Reply format: {:?}", config.replies.format);

    let commands = CommandSet::new(&config.bot.command_prefix, &config.alias_table());
    println!("\nCommands ({}):", commands.specs().len());
    for spec in commands.specs() {
        let target = match &spec.kind {
            CommandKind::ById => "comic by id".to_string(),
            CommandKind::Latest => "latest comic".to_string(),
            CommandKind::Random => "random comic".to_string(),
            CommandKind::Alias { id, .. } => format!("comic #{}", id),
        };
        println!("  /{:<24} {} - {}", spec.name, target, spec.description);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --resolve mode: one request against the live site
async fn handle_resolve(config: &Config, request: &str) -> Result<(), Box<dyn std::error::Error>> {
    let request: ComicRequest = request.parse()?;

    let fetcher = HttpFetcher::new(&config.http)?;
    let resolver = Resolver::new(fetcher, config);

    println!("{}", resolver.reply(&request).await);

    Ok(())
}

/// Handles the main bot operation
async fn handle_bot(config: Config, cli_token: Option<&str>) -> xkcd_bot::Result<()> {
    let token = match resolve_token(cli_token, &config) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    match bot::run(config, &token).await {
        Ok(()) => {
            tracing::info!("Bot stopped");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Bot failed: {}", e);
            Err(e)
        }
    }
}
