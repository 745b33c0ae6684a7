//! Monte Carlo rollout estimation.
//!
//! Approximates a state's utility for a player by averaging random playouts:
//! each probe samples one legal joint move per ply, uniformly, until it hits
//! a terminal state, and scores that state for the player. Useful where
//! exhaustive search is infeasible or as a lightweight leaf heuristic.
//!
//! There is deliberately no memoization here: probes are randomized, so
//! identical calls must stay free to sample independently. There is also no
//! depth bound; a game whose random playouts never terminate violates the
//! caller contract and is not detected.

use game_core::{GameTree, PlayerId, Score};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::error::SearchError;

/// Rollout-averaging estimator.
pub struct MonteCarlo {
    probes: u32,
    rng: ChaCha20Rng,
}

impl MonteCarlo {
    /// An estimator running `probes` rollouts per call, seeded from entropy.
    /// A probe count of zero is treated as one.
    pub fn new(probes: u32) -> Self {
        Self {
            probes,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible estimates.
    pub fn with_seed(probes: u32, seed: u64) -> Self {
        Self {
            probes,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn probes(&self) -> u32 {
        self.probes
    }

    /// The mean rollout value of `state` for `player`.
    ///
    /// Terminal states score exactly, with no sampling.
    pub fn estimate<G: GameTree>(
        &mut self,
        state: &G,
        player: &PlayerId,
    ) -> Result<Score, SearchError> {
        if state.terminal() {
            return Ok(state.utility(player));
        }

        let probes = self.probes.max(1);
        let mut total = 0.0;
        for probe in 0..probes {
            let value = self.rollout(state, player)?;
            trace!(probe, value, "rollout complete");
            total += value;
        }
        Ok(total / f64::from(probes))
    }

    fn rollout<G: GameTree>(&mut self, root: &G, player: &PlayerId) -> Result<Score, SearchError> {
        let mut owned: Option<G> = None;
        loop {
            let next = {
                let state = owned.as_ref().unwrap_or(root);
                if state.terminal() {
                    return Ok(state.utility(player));
                }
                let moves = state.moves();
                if moves.is_empty() {
                    return Err(SearchError::NoLegalMoves);
                }
                let pick = self.rng.gen_range(0..moves.len());
                state.next(&moves[pick])?
            };
            owned = Some(next);
        }
    }
}
