use crate::comic::info::ComicInfo;
use crate::config::{ReplyConfig, ReplyFormat};
use crate::FetchError;

/// Outcome of resolving one request, before it is rendered as text
#[derive(Debug)]
pub enum Resolution {
    /// The comic page was fetched and had the fields the reply needs
    Found(ComicInfo),

    /// The requested number is past the latest comic; nothing was fetched
    NotYetWritten { requested: u32, latest: u32 },

    /// The page was fetched but the expected markup was missing
    NotFound,

    /// The alias is not in the alias table; nothing was fetched
    UnknownAlias(String),

    /// The comic page could not be fetched
    Unavailable(FetchError),
}

impl Resolution {
    /// Renders the reply text sent back to the chat platform
    pub fn render(&self, replies: &ReplyConfig) -> String {
        match self {
            Self::Found(info) => {
                format_comic(replies.format, info).unwrap_or_else(|| replies.not_found.clone())
            }
            Self::NotYetWritten { .. } => replies.not_yet_written.clone(),
            Self::NotFound => replies.not_found.clone(),
            Self::UnknownAlias(_) => replies.unknown_alias.clone(),
            Self::Unavailable(_) => replies.unavailable.clone(),
        }
    }
}

/// Formats extracted fields, or `None` if the format's fields are missing
///
/// `TitleAndImage` falls back to the permalink when either the title or the
/// image URL was not found.
pub fn format_comic(format: ReplyFormat, info: &ComicInfo) -> Option<String> {
    match format {
        ReplyFormat::Permalink => info.permalink.clone(),
        ReplyFormat::TitleAndImage => match (&info.title, &info.image_url) {
            (Some(title), Some(image_url)) => Some(format!("**{}**\n{}", title, image_url)),
            _ => info.permalink.clone(),
        },
    }
}
