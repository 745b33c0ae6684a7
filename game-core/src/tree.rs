//! The game-tree contract every search engine programs against.

use std::fmt::Debug;
use std::hash::Hash;

use crate::joint_move::JointMove;
use crate::player::PlayerId;
use crate::score::Score;

/// A joint move that is not a member of the current legal move set.
///
/// Detected by the game implementation inside [`GameTree::next`]. Search
/// engines only ever pass back entries of [`GameTree::moves`], so seeing this
/// error from a search means the game's own `moves`/`next` disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal joint move: {detail}")]
pub struct IllegalMove {
    pub detail: String,
}

impl IllegalMove {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// One position of an abstract, turn-based multi-player game.
///
/// Implementations are immutable from the algorithms' perspective: `next`
/// returns a logically new state and every previously returned state must
/// remain valid while other branches are explored.
pub trait GameTree: Sized {
    /// A single player's action for one ply. Must hash structurally so joint
    /// moves can participate in memoization keys.
    type Action: Clone + Eq + Hash + Debug;

    /// True iff no further moves are legal.
    fn terminal(&self) -> bool;

    /// This player's utility at this state, in [0, 100].
    ///
    /// Must be defined for every state, including non-terminal ones (it
    /// doubles as the depth-cutoff estimate), and must be game-theoretically
    /// exact at terminal states: the minimax engines treat terminal utilities
    /// as ground truth.
    fn utility(&self, player: &PlayerId) -> Score;

    /// All legal joint moves at this state.
    ///
    /// Must be non-empty unless [`terminal`](Self::terminal) is true; an
    /// empty result on a non-terminal state is a contract violation that the
    /// engines surface as a fatal error.
    fn moves(&self) -> Vec<JointMove<Self::Action>>;

    /// The state reached by applying `joint`, which must be an entry of
    /// [`moves`](Self::moves).
    fn next(&self, joint: &JointMove<Self::Action>) -> Result<Self, IllegalMove>;

    /// A deterministic hash over the state's logical content, or `None` if
    /// the state cannot provide one.
    ///
    /// The hash must encode everything that distinguishes positions (board,
    /// side to move, remaining counters): memoization treats hash-equal
    /// states as interchangeable, so a false hit is a correctness bug, not a
    /// performance bug. States returning `None` can still be searched with
    /// memoization disabled; a memoizing engine fails fast on them.
    fn state_hash(&self) -> Option<u64>;
}
