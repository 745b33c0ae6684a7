//! The combined action selection across all players for one ply.

use crate::player::PlayerId;

/// One action per active player for a single ply.
///
/// Games with strictly alternating turns give the acting player a real action
/// and every other player a pass/no-op action; the game implementation is
/// responsible for that shape, the search engines only read entries back out.
///
/// Entries are kept in insertion order so the value hashes structurally and
/// can participate in memoization keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JointMove<A> {
    entries: Vec<(PlayerId, A)>,
}

impl<A> JointMove<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style: append one player's action.
    pub fn with(mut self, player: PlayerId, action: A) -> Self {
        self.entries.push((player, action));
        self
    }

    /// The action this joint move assigns to `player`, if any.
    pub fn action_for(&self, player: &PlayerId) -> Option<&A> {
        self.entries
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &A)> {
        self.entries.iter().map(|(p, a)| (p, a))
    }
}

impl<A> Default for JointMove<A> {
    fn default() -> Self {
        Self::new()
    }
}
