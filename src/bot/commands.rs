//! Slash-command table
//!
//! Maps command names to comic requests and builds the schema registered
//! with Discord. With the default `xkcd` prefix the table is:
//!
//! | Command | Arguments | Request |
//! |---------|-----------|---------|
//! | `/xkcd` | `id` (1..=latest) | `ById(id)` |
//! | `/xkcd-latest` | | `Latest` |
//! | `/xkcd-random` | | `Random` |
//! | `/xkcd-<alias>` | | `Alias(alias)` |

use crate::comic::{ComicRequest, RequestError};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};
use std::collections::BTreeMap;
use thiserror::Error;

/// Name of the integer option on the by-id command
pub const ID_OPTION: &str = "id";

/// Errors turning an incoming command into a request
///
/// The messages are shown to the user as the reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command /{0}")]
    UnknownCommand(String),

    #[error("/{0} needs a comic number")]
    MissingId(String),

    #[error("Comic numbers start at 1")]
    InvalidId(#[from] RequestError),
}

/// What a command resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    ById,
    Latest,
    Random,
    Alias { name: String, id: u32 },
}

/// One registered slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
}

impl CommandSpec {
    /// Builds the registration payload for this command
    ///
    /// `max_id` bounds the by-id command's `id` option.
    pub fn builder(&self, max_id: u32) -> CreateCommand {
        let command = CreateCommand::new(&self.name).description(&self.description);

        match self.kind {
            CommandKind::ById => command.add_option(
                CreateCommandOption::new(CommandOptionType::Integer, ID_OPTION, "Comic ID")
                    .required(true)
                    .min_int_value(1)
                    .max_int_value(u64::from(max_id)),
            ),
            _ => command,
        }
    }
}

/// The full command table for one bot
#[derive(Debug, Clone)]
pub struct CommandSet {
    specs: Vec<CommandSpec>,
}

impl CommandSet {
    /// Builds the table for `prefix` and the given alias table
    pub fn new(prefix: &str, aliases: &BTreeMap<String, u32>) -> Self {
        let mut specs = vec![
            CommandSpec {
                name: prefix.to_string(),
                description: "xkcd comics".to_string(),
                kind: CommandKind::ById,
            },
            CommandSpec {
                name: format!("{}-latest", prefix),
                description: "The latest comic".to_string(),
                kind: CommandKind::Latest,
            },
            CommandSpec {
                name: format!("{}-random", prefix),
                description: "A random comic".to_string(),
                kind: CommandKind::Random,
            },
        ];

        for (name, id) in aliases {
            let description = match name.as_str() {
                "standards" => "14 + 1 standards".to_string(),
                _ => format!("Comic #{} ({})", id, name),
            };
            specs.push(CommandSpec {
                name: format!("{}-{}", prefix, name),
                description,
                kind: CommandKind::Alias {
                    name: name.clone(),
                    id: *id,
                },
            });
        }

        Self { specs }
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Maps a command name and its optional `id` argument to a request
    pub fn request_for(&self, name: &str, id: Option<i64>) -> Result<ComicRequest, CommandError> {
        let spec = self
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        match &spec.kind {
            CommandKind::ById => {
                let id = id.ok_or_else(|| CommandError::MissingId(name.to_string()))?;
                Ok(ComicRequest::by_id(id)?)
            }
            CommandKind::Latest => Ok(ComicRequest::Latest),
            CommandKind::Random => Ok(ComicRequest::Random),
            CommandKind::Alias { name: alias, .. } => Ok(ComicRequest::Alias(alias.clone())),
        }
    }

    /// Registration payloads for every command
    pub fn builders(&self, max_id: u32) -> Vec<CreateCommand> {
        self.specs.iter().map(|spec| spec.builder(max_id)).collect()
    }
}
