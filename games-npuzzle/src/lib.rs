//! The 8-puzzle as a single-player [`GameTree`].
//!
//! Tiles 1..=8 slide on a 3x3 grid; 0 marks the blank. The tree is bounded
//! by a step budget so that depth-unbounded search terminates even from
//! unsolvable or far-from-goal positions; running out of steps is a terminal
//! outcome scored by how many tiles sit in their goal cell.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use game_core::{score, GameTree, IllegalMove, JointMove, PlayerId, Score};

/// The single participant of the puzzle.
pub fn player() -> PlayerId {
    PlayerId::from("player")
}

/// Slide the named tile into the blank cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Slide(u8),
}

const GOAL: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Grid adjacency, row-major.
const NEIGHBORS: [&[usize]; 9] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[4, 6, 8],
    &[5, 7],
];

/// A tile arrangement plus the step budget spent so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NPuzzle {
    tiles: [u8; 9],
    steps: u8,
    step_limit: u8,
}

impl NPuzzle {
    /// A puzzle from raw tiles with a fresh step budget. Returns `None`
    /// unless `tiles` is a permutation of 0..=8.
    pub fn new(tiles: [u8; 9], step_limit: u8) -> Option<Self> {
        let mut seen = [false; 9];
        for &tile in &tiles {
            if tile > 8 || seen[tile as usize] {
                return None;
            }
            seen[tile as usize] = true;
        }
        Some(Self {
            tiles,
            steps: 0,
            step_limit,
        })
    }

    pub fn tiles(&self) -> &[u8; 9] {
        &self.tiles
    }

    pub fn steps(&self) -> u8 {
        self.steps
    }

    pub fn solved(&self) -> bool {
        self.tiles == GOAL
    }

    fn blank(&self) -> usize {
        // A valid permutation always holds exactly one blank.
        self.tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    fn placed_tiles(&self) -> u32 {
        self.tiles
            .iter()
            .zip(GOAL.iter())
            .filter(|(t, g)| t == g && **t != 0)
            .count() as u32
    }
}

impl GameTree for NPuzzle {
    type Action = Move;

    fn terminal(&self) -> bool {
        self.solved() || self.steps >= self.step_limit
    }

    fn utility(&self, player_id: &PlayerId) -> Score {
        if *player_id != player() {
            return score::MIN;
        }
        if self.solved() {
            return score::MAX;
        }
        // Partial credit per correctly placed tile, eight tiles total.
        f64::from(self.placed_tiles()) * (score::MAX / 8.0)
    }

    fn moves(&self) -> Vec<JointMove<Move>> {
        if self.terminal() {
            return Vec::new();
        }
        let blank = self.blank();
        NEIGHBORS[blank]
            .iter()
            .map(|&cell| JointMove::new().with(player(), Move::Slide(self.tiles[cell])))
            .collect()
    }

    fn next(&self, joint: &JointMove<Move>) -> Result<Self, IllegalMove> {
        if self.terminal() {
            return Err(IllegalMove::new("puzzle is finished"));
        }
        let Move::Slide(tile) = *joint
            .action_for(&player())
            .ok_or_else(|| IllegalMove::new("no action for the puzzle player"))?;

        let from = self
            .tiles
            .iter()
            .position(|&t| t == tile && t != 0)
            .ok_or_else(|| IllegalMove::new(format!("tile {tile} is not on the board")))?;
        let blank = self.blank();
        if !NEIGHBORS[blank].contains(&from) {
            return Err(IllegalMove::new(format!(
                "tile {tile} is not adjacent to the blank"
            )));
        }

        let mut tiles = self.tiles;
        tiles.swap(from, blank);
        Ok(Self {
            tiles,
            steps: self.steps + 1,
            step_limit: self.step_limit,
        })
    }

    fn state_hash(&self) -> Option<u64> {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        Some(hasher.finish())
    }
}
