//! N-player minimax with turn rotation.
//!
//! One player is designated as the maximizing player; the default opponent
//! model is "paranoid": every other player is assumed to act against the
//! designated player, not for themselves. The selfish mode
//! ([`MinimaxMode::Selfish`]) flips that assumption and lets every acting
//! player maximize their own utility, which changes results in 3+ player
//! games.
//!
//! Ties break toward the earliest move in `moves()` order: a later move with
//! an equal score never replaces the current best, and when no move strictly
//! beats the initial bound (all children score exactly 0 for a maximizer, or
//! exactly 100 for a minimizer) the first legal move is returned rather than
//! no move at all.

use game_core::{score, GameTree, JointMove, PlayerId, PlayerOrder, Score, ScoreTable};
use tracing::{debug, trace};

use crate::config::{MinimaxMode, SearchConfig};
use crate::error::SearchError;
use crate::memo::{CacheStats, KeyBuilder, MemoCache};

/// Memoized result for one node: the propagated score table and the joint
/// move chosen there (`None` at depth-cutoff and terminal nodes).
#[derive(Debug, Clone)]
struct Node<A> {
    scores: ScoreTable,
    choice: Option<JointMove<A>>,
}

/// Depth-bounded N-player minimax over any [`GameTree`].
///
/// The engine owns its memo cache, so repeated calls on the same engine value
/// reuse subtree results and distinct engines never interfere.
pub struct Minimax<G: GameTree> {
    config: SearchConfig,
    cache: MemoCache<Node<G::Action>>,
}

impl<G: GameTree> Minimax<G> {
    pub fn new(config: SearchConfig) -> Self {
        let cache = MemoCache::new(config.cache_capacity);
        Self { config, cache }
    }

    /// The best action for the player at the head of `order`.
    ///
    /// Fails with [`SearchError::NoRootMove`] when the root is terminal or
    /// the depth bound is zero; use [`score`](Self::score) there instead.
    pub fn best_move(&mut self, state: &G, order: &PlayerOrder) -> Result<G::Action, SearchError> {
        let (_, node) = self.run(state, order)?;
        let joint = node.choice.ok_or(SearchError::NoRootMove)?;
        let actor = order.current().ok_or(SearchError::EmptyPlayerOrder)?;
        joint
            .action_for(actor)
            .cloned()
            .ok_or_else(|| SearchError::MissingAction(actor.clone()))
    }

    /// The maximizing player's backed-up score at the root.
    pub fn score(&mut self, state: &G, order: &PlayerOrder) -> Result<Score, SearchError> {
        let (max_player, node) = self.run(state, order)?;
        node.scores
            .get(&max_player)
            .ok_or(SearchError::UnknownPlayer(max_player))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn run(
        &mut self,
        state: &G,
        order: &PlayerOrder,
    ) -> Result<(PlayerId, Node<G::Action>), SearchError> {
        let head = order.current().ok_or(SearchError::EmptyPlayerOrder)?;
        let max_player = self
            .config
            .max_player
            .clone()
            .unwrap_or_else(|| head.clone());
        if !order.contains(&max_player) {
            return Err(SearchError::UnknownPlayer(max_player));
        }

        let node = self.search(state, order, self.config.depth, &max_player)?;

        let stats = self.cache.stats();
        debug!(
            depth = self.config.depth,
            hits = stats.hits,
            misses = stats.misses,
            entries = stats.entries,
            "minimax search complete"
        );
        Ok((max_player, node))
    }

    fn search(
        &mut self,
        state: &G,
        order: &PlayerOrder,
        depth: i32,
        max_player: &PlayerId,
    ) -> Result<Node<G::Action>, SearchError> {
        // The memo key is computed before any game operation: a state that
        // cannot be hashed fails here without being searched at all.
        let key = if self.config.memoize {
            let hash = state
                .state_hash()
                .ok_or(SearchError::Memoization { engine: "minimax" })?;
            let key = KeyBuilder::new("minimax")
                .push_raw(hash)
                .push(order)
                .push(&depth)
                .push(max_player)
                .push(&self.config.mode)
                .finish();
            if let Some(hit) = self.cache.get(key) {
                return Ok(hit);
            }
            Some(key)
        } else {
            None
        };

        let node = self.expand(state, order, depth, max_player)?;
        if let Some(key) = key {
            self.cache.insert(key, node.clone());
        }
        Ok(node)
    }

    fn expand(
        &mut self,
        state: &G,
        order: &PlayerOrder,
        depth: i32,
        max_player: &PlayerId,
    ) -> Result<Node<G::Action>, SearchError> {
        if depth == 0 || state.terminal() {
            return Ok(Node {
                scores: ScoreTable::from_state(state, order.iter()),
                choice: None,
            });
        }

        let player = order.current().ok_or(SearchError::EmptyPlayerOrder)?.clone();
        let rotated = order.rotated();
        let moves = state.moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let maximizing = match self.config.mode {
            MinimaxMode::Paranoid => player == *max_player,
            MinimaxMode::Selfish => true,
        };
        // Paranoid players fight over the designated player's score; selfish
        // players each read their own entry of the child table.
        let objective = match self.config.mode {
            MinimaxMode::Paranoid => max_player.clone(),
            MinimaxMode::Selfish => player.clone(),
        };

        let mut bound = if maximizing { score::MIN } else { score::MAX };
        let mut best: Option<(ScoreTable, JointMove<G::Action>)> = None;
        let mut first_scores: Option<ScoreTable> = None;

        for joint in &moves {
            let child = state.next(joint)?;
            let result = self.search(&child, &rotated, depth - 1, max_player)?;
            let value = result
                .scores
                .get(&objective)
                .ok_or_else(|| SearchError::UnknownPlayer(objective.clone()))?;
            if first_scores.is_none() {
                first_scores = Some(result.scores.clone());
            }

            let improved = match self.config.mode {
                MinimaxMode::Selfish if best.is_none() => true,
                _ if maximizing => value > bound,
                _ => value < bound,
            };
            if improved {
                bound = value;
                best = Some((result.scores, joint.clone()));
            }
        }

        let (scores, choice) = match best {
            Some((scores, joint)) => (scores, joint),
            None => {
                // Every child scored exactly the initial bound; tie-break to
                // the first legal move. `moves` is non-empty, so the first
                // child's table exists.
                trace!(player = %player, bound, "no strict improvement, using first move");
                let scores = match first_scores {
                    Some(scores) => scores,
                    None => return Err(SearchError::NoLegalMoves),
                };
                (scores, moves[0].clone())
            }
        };

        Ok(Node {
            scores,
            choice: Some(choice),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_npuzzle::{self as npuzzle, NPuzzle};
    use games_tictactoe::{self as tictactoe, TicTacToe};
    use std::cell::RefCell;
    use std::rc::Rc;

    use game_core::IllegalMove;

    #[test]
    fn test_puzzle_one_move_from_solved() {
        // Blank at position 7, the 8 tile one slide away.
        let state = NPuzzle::new([1, 2, 3, 4, 5, 6, 7, 0, 8], 2).unwrap();
        let order = PlayerOrder::from_names(["player"]);

        let mut engine = Minimax::new(SearchConfig::default());
        let best = engine.best_move(&state, &order).unwrap();
        assert_eq!(best, npuzzle::Move::Slide(8));

        let joint = JointMove::new().with(npuzzle::player(), best);
        let solved = state.next(&joint).unwrap();
        assert!(solved.terminal());
        assert_eq!(solved.utility(&npuzzle::player()), 100.0);
    }

    #[test]
    fn test_forced_win_is_found_and_scored() {
        // o: 0, 1 / x: 3, 4, o to move; marking 2 completes the top row.
        let state = TicTacToe::with_board([2, 2, 0, 1, 1, 0, 0, 0, 0], 2).unwrap();
        let order = PlayerOrder::from_names(["o", "x"]);

        let mut engine = Minimax::new(SearchConfig::default());
        assert_eq!(
            engine.best_move(&state, &order).unwrap(),
            tictactoe::Move::Mark(2)
        );
        assert_eq!(engine.score(&state, &order).unwrap(), 100.0);
    }

    #[test]
    fn test_terminal_root_scores_exactly_at_any_depth() {
        // x has won the top row.
        let state = TicTacToe::with_board([1, 1, 1, 2, 2, 0, 0, 0, 0], 2).unwrap();
        let order = PlayerOrder::from_names(["x", "o"]);

        for depth in [-1, 0, 3] {
            let mut engine = Minimax::new(SearchConfig::default().with_depth(depth));
            assert_eq!(engine.score(&state, &order).unwrap(), 100.0);
        }

        // A move request on a terminal root has nothing to return.
        let mut engine = Minimax::new(SearchConfig::default());
        assert!(matches!(
            engine.best_move(&state, &order),
            Err(SearchError::NoRootMove)
        ));
    }

    #[test]
    fn test_depth_zero_returns_cutoff_estimate() {
        let state = TicTacToe::new();
        let order = PlayerOrder::from_names(["x", "o"]);
        let mut engine = Minimax::new(SearchConfig::default().with_depth(0));

        // The ongoing-game estimate, not a searched value.
        assert_eq!(
            engine.score(&state, &order).unwrap(),
            state.utility(&tictactoe::xplayer())
        );
        assert!(matches!(
            engine.best_move(&state, &order),
            Err(SearchError::NoRootMove)
        ));
    }

    #[test]
    fn test_repeated_calls_are_idempotent_and_cached() {
        let state = TicTacToe::with_board([2, 2, 0, 1, 1, 0, 0, 0, 0], 2).unwrap();
        let order = PlayerOrder::from_names(["o", "x"]);
        let mut engine = Minimax::new(SearchConfig::default());

        let first = engine.best_move(&state, &order).unwrap();
        let hits_after_first = engine.cache_stats().hits;
        let second = engine.best_move(&state, &order).unwrap();

        assert_eq!(first, second);
        // The whole second call is served from the cache.
        assert!(engine.cache_stats().hits > hits_after_first);
    }

    // A game that cannot provide a stable hash; counts how often the engine
    // asks it for moves.
    #[derive(Debug, Clone)]
    struct Opaque {
        move_calls: Rc<RefCell<u32>>,
    }

    impl GameTree for Opaque {
        type Action = u8;

        fn terminal(&self) -> bool {
            false
        }

        fn utility(&self, _player: &PlayerId) -> Score {
            50.0
        }

        fn moves(&self) -> Vec<JointMove<u8>> {
            *self.move_calls.borrow_mut() += 1;
            vec![JointMove::new().with(PlayerId::from("p"), 0)]
        }

        fn next(&self, _joint: &JointMove<u8>) -> Result<Self, IllegalMove> {
            Ok(self.clone())
        }

        fn state_hash(&self) -> Option<u64> {
            None
        }
    }

    #[test]
    fn test_unhashable_state_fails_before_any_game_call() {
        let calls = Rc::new(RefCell::new(0));
        let state = Opaque {
            move_calls: Rc::clone(&calls),
        };
        let order = PlayerOrder::from_names(["p"]);

        let mut engine = Minimax::new(SearchConfig::default());
        let result = engine.best_move(&state, &order);

        assert!(matches!(
            result,
            Err(SearchError::Memoization { engine: "minimax" })
        ));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_unhashable_state_searchable_without_memoization() {
        let calls = Rc::new(RefCell::new(0));
        let state = Opaque {
            move_calls: Rc::clone(&calls),
        };
        let order = PlayerOrder::from_names(["p"]);

        let mut engine = Minimax::new(SearchConfig::default().with_memoize(false).with_depth(1));
        assert_eq!(engine.best_move(&state, &order).unwrap(), 0);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_empty_moves_on_nonterminal_state_is_fatal() {
        #[derive(Debug, Clone, Hash)]
        struct Stuck;

        impl GameTree for Stuck {
            type Action = u8;

            fn terminal(&self) -> bool {
                false
            }

            fn utility(&self, _player: &PlayerId) -> Score {
                0.0
            }

            fn moves(&self) -> Vec<JointMove<u8>> {
                Vec::new()
            }

            fn next(&self, joint: &JointMove<u8>) -> Result<Self, IllegalMove> {
                Err(IllegalMove::new(format!("{joint:?}")))
            }

            fn state_hash(&self) -> Option<u64> {
                Some(7)
            }
        }

        let order = PlayerOrder::from_names(["p"]);
        let mut engine = Minimax::new(SearchConfig::default());
        assert!(matches!(
            engine.best_move(&Stuck, &order),
            Err(SearchError::NoLegalMoves)
        ));
    }

    // A fixed 3-player tree where the paranoid and selfish models disagree:
    //
    //   root (a to move)
    //     L -> b chooses: b1 -> (a 50, b 100, c 0) | b2 -> (a 0, b 0, c 100)
    //     R -> b chooses: b3 -> (a 60, b 0, c 0)   | b4 -> (a 10, b 90, c 0)
    //
    // Paranoid: b minimizes a, so L is worth 0 and R is worth 10 -> pick R.
    // Selfish: b maximizes b, so L is worth 50 and R is worth 10 -> pick L.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Toy {
        Root,
        AfterL,
        AfterR,
        Leaf(u8),
    }

    impl Toy {
        fn leaf_scores(id: u8) -> (Score, Score, Score) {
            match id {
                1 => (50.0, 100.0, 0.0),
                2 => (0.0, 0.0, 100.0),
                3 => (60.0, 0.0, 0.0),
                _ => (10.0, 90.0, 0.0),
            }
        }
    }

    impl GameTree for Toy {
        type Action = &'static str;

        fn terminal(&self) -> bool {
            matches!(self, Toy::Leaf(_))
        }

        fn utility(&self, player: &PlayerId) -> Score {
            let Toy::Leaf(id) = self else {
                return 0.0;
            };
            let (a, b, c) = Toy::leaf_scores(*id);
            match player.as_str() {
                "a" => a,
                "b" => b,
                _ => c,
            }
        }

        fn moves(&self) -> Vec<JointMove<&'static str>> {
            let (actor, actions): (&str, &[&'static str]) = match self {
                Toy::Root => ("a", &["L", "R"]),
                Toy::AfterL => ("b", &["b1", "b2"]),
                Toy::AfterR => ("b", &["b3", "b4"]),
                Toy::Leaf(_) => return Vec::new(),
            };
            actions
                .iter()
                .map(|&action| JointMove::new().with(PlayerId::from(actor), action))
                .collect()
        }

        fn next(&self, joint: &JointMove<&'static str>) -> Result<Self, IllegalMove> {
            let action = joint
                .iter()
                .next()
                .map(|(_, a)| *a)
                .ok_or_else(|| IllegalMove::new("empty joint move"))?;
            let next = match (self, action) {
                (Toy::Root, "L") => Toy::AfterL,
                (Toy::Root, "R") => Toy::AfterR,
                (Toy::AfterL, "b1") => Toy::Leaf(1),
                (Toy::AfterL, "b2") => Toy::Leaf(2),
                (Toy::AfterR, "b3") => Toy::Leaf(3),
                (Toy::AfterR, "b4") => Toy::Leaf(4),
                _ => return Err(IllegalMove::new(format!("{action} from {self:?}"))),
            };
            Ok(next)
        }

        fn state_hash(&self) -> Option<u64> {
            Some(match self {
                Toy::Root => 0,
                Toy::AfterL => 1,
                Toy::AfterR => 2,
                Toy::Leaf(id) => 10 + u64::from(*id),
            })
        }
    }

    #[test]
    fn test_paranoid_and_selfish_modes_disagree() {
        let order = PlayerOrder::from_names(["a", "b", "c"]);

        let mut paranoid = Minimax::new(SearchConfig::default());
        assert_eq!(paranoid.best_move(&Toy::Root, &order).unwrap(), "R");
        assert_eq!(paranoid.score(&Toy::Root, &order).unwrap(), 10.0);

        let mut selfish = Minimax::new(SearchConfig::default().with_mode(MinimaxMode::Selfish));
        assert_eq!(selfish.best_move(&Toy::Root, &order).unwrap(), "L");
        assert_eq!(selfish.score(&Toy::Root, &order).unwrap(), 50.0);
    }

    #[test]
    fn test_pinned_max_player_must_be_in_order() {
        let state = TicTacToe::new();
        let order = PlayerOrder::from_names(["x", "o"]);
        let mut engine = Minimax::new(
            SearchConfig::default().with_max_player(PlayerId::from("ghost")),
        );
        assert!(matches!(
            engine.best_move(&state, &order),
            Err(SearchError::UnknownPlayer(_))
        ));
    }
}
