/// Resolution state definitions for a single comic request
///
/// A request starts in `Start` and ends in `Done` or `Failed`. Only requests
/// that need the latest comic number pass through `ResolvingLatestId`.
use std::fmt;

/// Represents where a comic request is in its resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveState {
    /// Request received, nothing done yet
    Start,

    /// Fetching the front page to learn the latest comic number
    ResolvingLatestId,

    /// Fetching the comic page
    Fetching,

    /// Pulling fields out of the fetched page
    Extracting,

    /// Rendering the reply text
    Formatting,

    // ===== Terminal States =====
    /// A reply was produced
    Done,

    /// The comic page could not be fetched
    Failed,
}

impl ResolveState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the transition `self -> next` is legal
    ///
    /// `Formatting` and `Done` are reachable early: a by-id request past the
    /// latest comic or an unknown alias is answered without any fetch.
    pub fn can_transition_to(&self, next: ResolveState) -> bool {
        use ResolveState::*;

        matches!(
            (self, next),
            (Start, ResolvingLatestId)
                | (Start, Fetching)
                | (Start, Formatting)
                | (ResolvingLatestId, Fetching)
                | (ResolvingLatestId, Formatting)
                | (Fetching, Extracting)
                | (Fetching, Failed)
                | (Extracting, Formatting)
                | (Formatting, Done)
        )
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ResolvingLatestId => "resolving_latest_id",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Formatting => "formatting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Moves to `next`, tracing the transition
    ///
    /// Illegal transitions are a resolver bug: they trip a debug assertion
    /// and are logged, but the state still advances so a reply is produced.
    pub fn advance(&mut self, next: ResolveState) {
        debug_assert!(
            self.can_transition_to(next),
            "illegal resolve transition {} -> {}",
            self,
            next
        );
        if !self.can_transition_to(next) {
            tracing::error!("Illegal resolve transition {} -> {}", self, next);
        }
        tracing::trace!("Resolve state {} -> {}", self, next);
        *self = next;
    }
}

impl fmt::Display for ResolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
