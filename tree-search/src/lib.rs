//! Game-tree search engines over the `game-core` contract.
//!
//! Three engines share the same abstract game interface:
//!
//! 1. [`Minimax`]: N-player, depth-bounded, turn-rotating search. By default
//!    it is "paranoid" — every non-maximizing player is assumed to act
//!    against the one designated player — with a "selfish" mode where each
//!    player maximizes their own utility instead.
//! 2. [`AlphaBeta`]: strictly 2-player minimax with alpha/beta pruning.
//!    Pruning never changes the computed value, only the work done.
//! 3. [`MonteCarlo`]: randomized rollout averaging for positions where
//!    exhaustive search is infeasible.
//!
//! The minimax-style engines memoize whole node results in an explicit,
//! per-engine [`MemoCache`]; there is no global state, so engines are
//! reentrant and independently testable.
//!
//! # Usage
//!
//! ```rust,ignore
//! use game_core::PlayerOrder;
//! use tree_search::{Minimax, SearchConfig};
//!
//! let order = PlayerOrder::from_names(["x", "o"]);
//! let mut engine = Minimax::new(SearchConfig::default());
//! let best = engine.best_move(&state, &order)?;
//! ```

pub mod alphabeta;
pub mod config;
pub mod error;
pub mod memo;
pub mod minimax;
pub mod montecarlo;

// Re-export main types
pub use alphabeta::AlphaBeta;
pub use config::{MinimaxMode, SearchConfig};
pub use error::SearchError;
pub use memo::{CacheStats, KeyBuilder, MemoCache};
pub use minimax::Minimax;
pub use montecarlo::MonteCarlo;
