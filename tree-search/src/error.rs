//! Errors surfaced by the search engines.
//!
//! Search is pure computation: none of these conditions are retried or
//! recovered locally, they all propagate to the top-level caller. An engine
//! call either returns a value/move or fails; partial results are never
//! returned.

use game_core::{IllegalMove, PlayerId};
use thiserror::Error;

/// Everything a search engine call can fail with.
#[derive(Debug, Error)]
pub enum SearchError {
    /// `moves()` returned an empty sequence on a non-terminal state. This is
    /// a contract violation of the backing game and should be treated as
    /// fatal: it indicates a malformed game description, not a dead end.
    #[error("no legal moves in a non-terminal position")]
    NoLegalMoves,

    /// A joint move taken from `moves()` was rejected by `next()`.
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    /// Memoization is enabled but the state provides no stable hash. The
    /// game state is not touched before this is raised.
    #[error("cannot memoize '{engine}' call: state provides no stable hash")]
    Memoization { engine: &'static str },

    /// The player order passed to a search was empty.
    #[error("player order is empty")]
    EmptyPlayerOrder,

    /// A joint move chosen by the search carries no action for the player
    /// who was supposed to act.
    #[error("joint move carries no action for player '{0}'")]
    MissingAction(PlayerId),

    /// The configured maximizing player is not part of the player order.
    #[error("player '{0}' is not in the player order")]
    UnknownPlayer(PlayerId),

    /// A move was requested from a root that is terminal or has a zero depth
    /// bound; there is no acting move to report (scores are still available
    /// through the score-returning entry points).
    #[error("root position is terminal or depth bound is zero: no move to report")]
    NoRootMove,
}
