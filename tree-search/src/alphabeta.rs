//! Two-player minimax with alpha-beta pruning.
//!
//! Alpha tracks the best score the maximizing player is already guaranteed,
//! beta the best the minimizing player can hold them to; once `beta <= alpha`
//! the remaining siblings cannot affect the decision and are skipped. Pruning
//! never changes the computed value, only the work done, so the root score
//! always matches what [`Minimax`](crate::Minimax) computes for the same
//! position and depth.
//!
//! The same tie-break rules as minimax apply: first strict improvement wins,
//! and the first legal move stands in when nothing beats the initial bound.

use game_core::{score, GameTree, JointMove, PlayerId, Score};
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::memo::{CacheStats, KeyBuilder, MemoCache};

/// Depth-bounded 2-player alpha-beta search over any [`GameTree`].
pub struct AlphaBeta<G: GameTree> {
    config: SearchConfig,
    cache: MemoCache<(Score, Option<JointMove<G::Action>>)>,
}

impl<G: GameTree> AlphaBeta<G> {
    pub fn new(config: SearchConfig) -> Self {
        let cache = MemoCache::new(config.cache_capacity);
        Self { config, cache }
    }

    /// The best action for `player`, who must be the one to act at the root.
    pub fn best_move(&mut self, state: &G, player: &PlayerId) -> Result<G::Action, SearchError> {
        let (_, choice) = self.search(
            state,
            player,
            self.config.depth,
            true,
            score::MIN,
            score::MAX,
        )?;
        self.log_completion();
        let joint = choice.ok_or(SearchError::NoRootMove)?;
        joint
            .action_for(player)
            .cloned()
            .ok_or_else(|| SearchError::MissingAction(player.clone()))
    }

    /// `player`'s backed-up score at the root, over the full [0, 100] window.
    pub fn score(&mut self, state: &G, player: &PlayerId) -> Result<Score, SearchError> {
        self.evaluate(state, player, true, score::MIN, score::MAX)
    }

    /// Full-signature evaluation: explicit window and root orientation.
    ///
    /// `maximizing` says whether the root node maximizes `player`'s score;
    /// it flips at every ply below. Narrower windows prune more but are
    /// cached separately from wider ones.
    pub fn evaluate(
        &mut self,
        state: &G,
        player: &PlayerId,
        maximizing: bool,
        alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchError> {
        let (value, _) = self.search(state, player, self.config.depth, maximizing, alpha, beta)?;
        self.log_completion();
        Ok(value)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn log_completion(&self) {
        let stats = self.cache.stats();
        debug!(
            depth = self.config.depth,
            hits = stats.hits,
            misses = stats.misses,
            entries = stats.entries,
            "alpha-beta search complete"
        );
    }

    fn search(
        &mut self,
        state: &G,
        player: &PlayerId,
        depth: i32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<(Score, Option<JointMove<G::Action>>), SearchError> {
        // The window is part of the key: a position explored under different
        // pruning windows is a distinct entry.
        let key = if self.config.memoize {
            let hash = state
                .state_hash()
                .ok_or(SearchError::Memoization { engine: "alphabeta" })?;
            let key = KeyBuilder::new("alphabeta")
                .push_raw(hash)
                .push(player)
                .push(&depth)
                .push(&maximizing)
                .push_raw(alpha.to_bits())
                .push_raw(beta.to_bits())
                .finish();
            if let Some(hit) = self.cache.get(key) {
                return Ok(hit);
            }
            Some(key)
        } else {
            None
        };

        let result = self.expand(state, player, depth, maximizing, &mut alpha, &mut beta)?;
        if let Some(key) = key {
            self.cache.insert(key, result.clone());
        }
        Ok(result)
    }

    fn expand(
        &mut self,
        state: &G,
        player: &PlayerId,
        depth: i32,
        maximizing: bool,
        alpha: &mut Score,
        beta: &mut Score,
    ) -> Result<(Score, Option<JointMove<G::Action>>), SearchError> {
        if depth == 0 || state.terminal() {
            return Ok((state.utility(player), None));
        }

        let moves = state.moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut best_score = if maximizing { score::MIN } else { score::MAX };
        let mut best_move: Option<JointMove<G::Action>> = None;

        for joint in &moves {
            let child = state.next(joint)?;
            let (value, _) =
                self.search(&child, player, depth - 1, !maximizing, *alpha, *beta)?;

            if maximizing {
                if value > best_score {
                    best_score = value;
                    best_move = Some(joint.clone());
                }
                *alpha = alpha.max(best_score);
            } else {
                if value < best_score {
                    best_score = value;
                    best_move = Some(joint.clone());
                }
                *beta = beta.min(best_score);
            }

            if *beta <= *alpha {
                trace!(alpha = *alpha, beta = *beta, depth, "cutoff");
                break;
            }
        }

        let choice = best_move.unwrap_or_else(|| moves[0].clone());
        Ok((best_score, Some(choice)))
    }
}
