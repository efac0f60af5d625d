//! State module for tracking request resolution
//!
//! # Components
//!
//! - `ResolveState`: where a single comic request is in its resolution, with
//!   the legal transitions between states

mod resolve_state;

pub use resolve_state::ResolveState;
