//! Scores and per-player score tables.
//!
//! By convention of the backing game, every utility lies in [0, 100]:
//! 0 is the worst outcome for a player and 100 the best. The bounds double
//! as the initial best-score values in the minimax-style engines.

use crate::player::PlayerId;
use crate::tree::GameTree;

/// A utility value in the [`MIN`], [`MAX`] range.
pub type Score = f64;

/// Worst possible outcome for a player.
pub const MIN: Score = 0.0;

/// Best possible outcome for a player.
pub const MAX: Score = 100.0;

/// Whether `score` lies inside the legal utility range.
pub fn in_bounds(score: Score) -> bool {
    (MIN..=MAX).contains(&score)
}

/// Utilities for a set of players at one state, in player order.
///
/// This is the "mapping player -> score" form of the utility contract. The
/// N-player engine propagates whole tables so that the selfish mode can read
/// any acting player's own score out of a child result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    entries: Vec<(PlayerId, Score)>,
}

impl ScoreTable {
    pub fn new(entries: Vec<(PlayerId, Score)>) -> Self {
        Self { entries }
    }

    /// Query every player's utility at `state`.
    pub fn from_state<'a, G: GameTree>(
        state: &G,
        players: impl IntoIterator<Item = &'a PlayerId>,
    ) -> Self {
        let entries = players
            .into_iter()
            .map(|p| (p.clone(), state.utility(p)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, player: &PlayerId) -> Option<Score> {
        self.entries
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Score)> {
        self.entries.iter().map(|(p, s)| (p, *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
