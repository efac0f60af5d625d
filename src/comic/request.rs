use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single comic lookup, built per incoming command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComicRequest {
    /// A specific comic number (always >= 1)
    ById(u32),

    /// The most recently published comic
    Latest,

    /// Whatever the site's random endpoint redirects to
    Random,

    /// A comic known by name, e.g. "standards"
    Alias(String),
}

/// Why a piece of text or a number could not become a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("comic number {0} is out of range (expected 1..={})", u32::MAX)]
    InvalidId(i64),

    #[error("empty comic request")]
    Empty,
}

impl ComicRequest {
    /// Builds a by-id request from a raw integer argument
    pub fn by_id(id: i64) -> Result<Self, RequestError> {
        u32::try_from(id)
            .ok()
            .filter(|id| *id >= 1)
            .map(Self::ById)
            .ok_or(RequestError::InvalidId(id))
    }
}

impl FromStr for ComicRequest {
    type Err = RequestError;

    /// Parses `latest`, `random`, a comic number, or any other word as an alias
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RequestError::Empty);
        }

        let lowered = s.to_ascii_lowercase();
        match lowered.as_str() {
            "latest" => Ok(Self::Latest),
            "random" => Ok(Self::Random),
            _ => match s.parse::<i64>() {
                Ok(id) => Self::by_id(id),
                Err(_) => Ok(Self::Alias(lowered)),
            },
        }
    }
}

impl fmt::Display for ComicRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "#{}", id),
            Self::Latest => write!(f, "latest"),
            Self::Random => write!(f, "random"),
            Self::Alias(name) => write!(f, "alias '{}'", name),
        }
    }
}
