use crate::bot::commands::CommandSet;
use crate::comic::{Fetcher, Resolver};
use std::sync::Arc;

/// Routes a command name and its arguments to the resolver
///
/// This is the platform-independent half of the bot: text in, text out.
pub struct Dispatcher<F> {
    resolver: Arc<Resolver<F>>,
    commands: CommandSet,
}

impl<F: Fetcher> Dispatcher<F> {
    pub fn new(resolver: Arc<Resolver<F>>, commands: CommandSet) -> Self {
        Self { resolver, commands }
    }

    pub fn resolver(&self) -> &Resolver<F> {
        &self.resolver
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Produces the reply for one command invocation
    ///
    /// Bad command names or arguments become a reply explaining the problem.
    pub async fn dispatch(&self, name: &str, id: Option<i64>) -> String {
        match self.commands.request_for(name, id) {
            Ok(request) => {
                tracing::info!("/{} -> {}", name, request);
                self.resolver.reply(&request).await
            }
            Err(e) => {
                tracing::warn!("Rejected /{}: {}", name, e);
                e.to_string()
            }
        }
    }
}
