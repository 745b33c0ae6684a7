//! Player identity and turn order.
//!
//! `PlayerOrder` is a value type with structural equality and hashing so it
//! can participate in memoization keys: two orders listing the same players
//! in the same sequence are the same key component, regardless of how they
//! were produced.

use std::fmt;
use std::sync::Arc;

/// Identifier for one player. Cheap to clone; search engines clone these
/// freely while threading the maximizing player through recursion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(Arc<str>);

impl PlayerId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of players defining whose turn is next.
///
/// The head is the current player. Rotation moves the head to the tail and
/// returns a new order, so previously captured orders stay valid; the set of
/// players never changes across rotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerOrder(Vec<PlayerId>);

impl PlayerOrder {
    pub fn new(players: Vec<PlayerId>) -> Self {
        Self(players)
    }

    /// Convenience constructor from player names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(PlayerId::from).collect())
    }

    /// The player whose turn it is, or `None` for an empty order.
    pub fn current(&self) -> Option<&PlayerId> {
        self.0.first()
    }

    /// A new order with the current player moved to the tail.
    pub fn rotated(&self) -> Self {
        if self.0.len() < 2 {
            return self.clone();
        }
        let mut players = Vec::with_capacity(self.0.len());
        players.extend_from_slice(&self.0[1..]);
        players.push(self.0[0].clone());
        Self(players)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.0.contains(player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.0
    }
}

impl From<Vec<PlayerId>> for PlayerOrder {
    fn from(players: Vec<PlayerId>) -> Self {
        Self::new(players)
    }
}
