//! Discord front end
//!
//! Thin glue between the gateway and the comic resolver:
//! - `commands`: the slash-command table and its registration schema
//! - `dispatcher`: command name + arguments to reply text
//! - `handler`: gateway events (ready, interactions)
//!
//! [`run`] owns the client lifecycle: connect, serve until Ctrl+C, then
//! optionally remove the commands this process registered.

mod commands;
mod dispatcher;
mod handler;

pub use commands::{CommandError, CommandKind, CommandSet, CommandSpec, ID_OPTION};
pub use dispatcher::Dispatcher;
pub use handler::Handler;

use crate::comic::{HttpFetcher, Resolver};
use crate::config::Config;
use serenity::all::{Client, Command, CommandId, GatewayIntents, GuildId, Http};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Runs the bot until interrupted
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `token` - Discord bot token
///
/// # Returns
///
/// * `Ok(())` - The bot shut down cleanly
/// * `Err(BotError)` - The client could not be built or the gateway failed
pub async fn run(config: Config, token: &str) -> crate::Result<()> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let resolver = Arc::new(Resolver::new(fetcher, &config));
    let commands = CommandSet::new(&config.bot.command_prefix, resolver.aliases());
    let dispatcher = Arc::new(Dispatcher::new(resolver, commands));

    let guild_id = config.bot.guild_id.map(GuildId::new);
    let registered = Arc::new(Mutex::new(Vec::new()));
    let handler = Handler::new(dispatcher, guild_id, Arc::clone(&registered));

    // Slash commands arrive as interactions; no privileged intents needed
    let mut client = Client::builder(token, GatewayIntents::empty())
        .event_handler(handler)
        .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Gracefully shutting down.");
                shard_manager.shutdown_all().await;
            }
            Err(e) => tracing::error!("Cannot listen for Ctrl+C: {}", e),
        }
    });

    tracing::info!("Press Ctrl+C to exit");
    client.start().await?;

    if config.bot.remove_commands_on_shutdown {
        let ids = registered.lock().await.clone();
        remove_commands(&client.http, guild_id, &ids).await;
    }

    Ok(())
}

/// Deletes registered commands, logging failures
async fn remove_commands(http: &Arc<Http>, guild_id: Option<GuildId>, ids: &[CommandId]) {
    tracing::info!("Removing {} commands...", ids.len());

    for id in ids {
        let result = match guild_id {
            Some(guild_id) => guild_id.delete_command(http, *id).await,
            None => Command::delete_global_command(http, *id).await,
        };

        if let Err(e) = result {
            tracing::warn!("Cannot delete command {}: {}", id, e);
        }
    }
}
