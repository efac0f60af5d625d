use crate::bot::commands::ID_OPTION;
use crate::bot::dispatcher::Dispatcher;
use crate::comic::Fetcher;
use serenity::all::{
    Command, CommandId, CommandInteraction, Context, EditInteractionResponse, EventHandler,
    GuildId, Interaction, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Gateway event handler: registers commands on ready and answers them
pub struct Handler<F> {
    dispatcher: Arc<Dispatcher<F>>,
    guild_id: Option<GuildId>,
    registered: Arc<Mutex<Vec<CommandId>>>,
}

impl<F: Fetcher> Handler<F> {
    /// `registered` receives the IDs of the commands created on ready
    pub fn new(
        dispatcher: Arc<Dispatcher<F>>,
        guild_id: Option<GuildId>,
        registered: Arc<Mutex<Vec<CommandId>>>,
    ) -> Self {
        Self {
            dispatcher,
            guild_id,
            registered,
        }
    }

    async fn register_commands(&self, ctx: &Context) {
        // The id option is bounded by the live latest comic
        let latest = self.dispatcher.resolver().latest_id().await;
        let builders = self.dispatcher.commands().builders(latest.id);

        tracing::info!("Adding {} commands...", builders.len());
        let result = match self.guild_id {
            Some(guild_id) => guild_id.set_commands(&ctx.http, builders).await,
            None => Command::set_global_commands(&ctx.http, builders).await,
        };

        match result {
            Ok(commands) => {
                for command in &commands {
                    tracing::debug!("Registered /{} ({})", command.name, command.id);
                }
                *self.registered.lock().await = commands.iter().map(|c| c.id).collect();
            }
            Err(e) => tracing::error!("Cannot create commands: {}", e),
        }
    }

    async fn answer(&self, ctx: &Context, command: &CommandInteraction) {
        let name = command.data.name.as_str();
        let id = command
            .data
            .options
            .iter()
            .find(|option| option.name == ID_OPTION)
            .and_then(|option| option.value.as_i64());

        // Fetching can outlast the interaction's initial response window
        if let Err(e) = command.defer(&ctx.http).await {
            tracing::warn!("Cannot defer /{}: {}", name, e);
            return;
        }

        let reply = self.dispatcher.dispatch(name, id).await;

        let response = EditInteractionResponse::new().content(reply);
        if let Err(e) = command.edit_response(&ctx.http, response).await {
            tracing::warn!("Cannot respond to /{}: {}", name, e);
        }
    }
}

#[async_trait]
impl<F: Fetcher + 'static> EventHandler for Handler<F> {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("Logged in as: {}", ready.user.name);
        self.register_commands(&ctx).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.answer(&ctx, &command).await;
        }
    }
}
