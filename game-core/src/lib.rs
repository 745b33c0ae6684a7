//! Core traits and types for turn-based game-tree search
//!
//! This crate provides the abstractions every search engine programs against:
//! - `GameTree`: the contract a concrete game must implement
//! - `PlayerId` / `PlayerOrder`: player identity and round-robin turn order
//! - `JointMove`: the combined action selection for one ply
//! - `Score` / `ScoreTable`: per-player utilities in the [0, 100] range
//!
//! No search logic lives here; concrete games implement `GameTree` and the
//! engines in the `tree-search` crate drive it.

pub mod joint_move;
pub mod player;
pub mod score;
pub mod tree;

// Re-export main types for convenience
pub use joint_move::JointMove;
pub use player::{PlayerId, PlayerOrder};
pub use score::{Score, ScoreTable};
pub use tree::{GameTree, IllegalMove};
