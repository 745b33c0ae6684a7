//! Tic-tac-toe as a two-player [`GameTree`].
//!
//! Cells are numbered 0..9 row-major; 0 is empty, 1 is x, 2 is o. Joint
//! moves carry a [`Move::Mark`] for the player to act and [`Move::Noop`]
//! for the opponent, so every participant appears in every joint move.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use game_core::{score, GameTree, IllegalMove, JointMove, PlayerId, Score};

/// The first player, playing mark 1.
pub fn xplayer() -> PlayerId {
    PlayerId::from("x")
}

/// The second player, playing mark 2.
pub fn oplayer() -> PlayerId {
    PlayerId::from("o")
}

/// One player's part of a joint move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Place the acting player's mark on an empty cell.
    Mark(u8),
    /// The non-acting player's placeholder.
    Noop,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A board position plus whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    board: [u8; 9],
    to_move: u8,
}

impl TicTacToe {
    /// The empty board, x to move.
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            to_move: 1,
        }
    }

    /// A position from raw cells. Returns `None` when a cell holds anything
    /// other than 0/1/2 or `to_move` is not a player mark.
    pub fn with_board(board: [u8; 9], to_move: u8) -> Option<Self> {
        if board.iter().any(|&c| c > 2) || !(1..=2).contains(&to_move) {
            return None;
        }
        Some(Self { board, to_move })
    }

    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// The mark of the player to act next.
    pub fn to_move(&self) -> u8 {
        self.to_move
    }

    /// 0 while the game is ongoing, the winning mark once a line is
    /// complete, 3 on a drawn full board.
    pub fn winner(&self) -> u8 {
        for line in &LINES {
            let mark = self.board[line[0]];
            if mark != 0 && line.iter().all(|&c| self.board[c] == mark) {
                return mark;
            }
        }
        if self.board.iter().all(|&c| c != 0) {
            return 3;
        }
        0
    }

    fn mark_of(player: &PlayerId) -> Option<u8> {
        match player.as_str() {
            "x" => Some(1),
            "o" => Some(2),
            _ => None,
        }
    }

    fn player_of(mark: u8) -> PlayerId {
        if mark == 1 {
            xplayer()
        } else {
            oplayer()
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTree for TicTacToe {
    type Action = Move;

    fn terminal(&self) -> bool {
        self.winner() != 0
    }

    fn utility(&self, player: &PlayerId) -> Score {
        let Some(mark) = Self::mark_of(player) else {
            return score::MIN;
        };
        match self.winner() {
            w if w == mark => score::MAX,
            // Draws and undecided positions are worth the midpoint.
            0 | 3 => 50.0,
            _ => score::MIN,
        }
    }

    fn moves(&self) -> Vec<JointMove<Move>> {
        if self.terminal() {
            return Vec::new();
        }
        let actor = Self::player_of(self.to_move);
        let waiter = Self::player_of(3 - self.to_move);
        self.board
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == 0)
            .map(|(i, _)| {
                JointMove::new()
                    .with(actor.clone(), Move::Mark(i as u8))
                    .with(waiter.clone(), Move::Noop)
            })
            .collect()
    }

    fn next(&self, joint: &JointMove<Move>) -> Result<Self, IllegalMove> {
        if self.terminal() {
            return Err(IllegalMove::new("game is over"));
        }

        let actor = Self::player_of(self.to_move);
        let mut cell = None;
        for (player, action) in joint.iter() {
            match action {
                Move::Mark(c) if *player == actor => cell = Some(*c as usize),
                Move::Mark(c) => {
                    return Err(IllegalMove::new(format!(
                        "player '{player}' marked cell {c} out of turn"
                    )));
                }
                Move::Noop if *player == actor => {
                    return Err(IllegalMove::new(format!(
                        "player '{player}' must mark a cell"
                    )));
                }
                Move::Noop => {}
            }
        }

        let cell = cell.ok_or_else(|| IllegalMove::new("no mark in joint move"))?;
        if cell >= 9 || self.board[cell] != 0 {
            return Err(IllegalMove::new(format!("cell {cell} is not open")));
        }

        let mut board = self.board;
        board[cell] = self.to_move;
        Ok(Self {
            board,
            to_move: 3 - self.to_move,
        })
    }

    fn state_hash(&self) -> Option<u64> {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        Some(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(state: &TicTacToe, cell: u8) -> JointMove<Move> {
        let actor = TicTacToe::player_of(state.to_move());
        let waiter = TicTacToe::player_of(3 - state.to_move());
        JointMove::new()
            .with(actor, Move::Mark(cell))
            .with(waiter, Move::Noop)
    }

    #[test]
    fn test_new_board_is_open() {
        let state = TicTacToe::new();
        assert!(!state.terminal());
        assert_eq!(state.winner(), 0);
        assert_eq!(state.to_move(), 1);
        assert_eq!(state.moves().len(), 9);
    }

    #[test]
    fn test_with_board_validates() {
        assert!(TicTacToe::with_board([0; 9], 1).is_some());
        assert!(TicTacToe::with_board([0; 9], 2).is_some());
        assert!(TicTacToe::with_board([0; 9], 0).is_none());
        assert!(TicTacToe::with_board([0; 9], 3).is_none());
        assert!(TicTacToe::with_board([4, 0, 0, 0, 0, 0, 0, 0, 0], 1).is_none());
    }

    #[test]
    fn test_rows_columns_and_diagonals_win() {
        let cases = [
            ([1, 1, 1, 0, 2, 2, 0, 0, 0], 1),
            ([2, 0, 1, 2, 1, 0, 2, 0, 1], 2),
            ([1, 2, 0, 0, 1, 2, 0, 0, 1], 1),
            ([0, 0, 2, 1, 2, 1, 2, 0, 1], 2),
        ];
        for (board, expect) in cases {
            let state = TicTacToe::with_board(board, 1).unwrap();
            assert_eq!(state.winner(), expect, "board {board:?}");
            assert!(state.terminal());
        }
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let state = TicTacToe::with_board([1, 2, 1, 1, 2, 2, 2, 1, 1], 1).unwrap();
        assert_eq!(state.winner(), 3);
        assert!(state.terminal());
        assert_eq!(state.utility(&xplayer()), 50.0);
        assert_eq!(state.utility(&oplayer()), 50.0);
    }

    #[test]
    fn test_utility_is_win_centric() {
        let state = TicTacToe::with_board([1, 1, 1, 2, 2, 0, 0, 0, 0], 2).unwrap();
        assert_eq!(state.utility(&xplayer()), 100.0);
        assert_eq!(state.utility(&oplayer()), 0.0);
        assert_eq!(state.utility(&PlayerId::from("spectator")), 0.0);
    }

    #[test]
    fn test_moves_cover_exactly_the_open_cells() {
        let state = TicTacToe::with_board([1, 0, 2, 0, 1, 0, 0, 2, 0], 1).unwrap();
        let moves = state.moves();
        let cells: Vec<Move> = moves
            .iter()
            .filter_map(|m| m.action_for(&xplayer()).copied())
            .collect();
        assert_eq!(
            cells,
            vec![
                Move::Mark(1),
                Move::Mark(3),
                Move::Mark(5),
                Move::Mark(6),
                Move::Mark(8)
            ]
        );
        for joint in &moves {
            assert_eq!(joint.action_for(&oplayer()), Some(&Move::Noop));
        }
    }

    #[test]
    fn test_next_alternates_turns() {
        let state = TicTacToe::new();
        let after = state.next(&mark(&state, 4)).unwrap();
        assert_eq!(after.board()[4], 1);
        assert_eq!(after.to_move(), 2);

        let after2 = after.next(&mark(&after, 0)).unwrap();
        assert_eq!(after2.board()[0], 2);
        assert_eq!(after2.to_move(), 1);
    }

    #[test]
    fn test_next_rejects_bad_moves() {
        let state = TicTacToe::with_board([1, 0, 0, 0, 0, 0, 0, 0, 0], 2).unwrap();

        // Occupied cell.
        assert!(state.next(&mark(&state, 0)).is_err());

        // Out-of-turn mark.
        let out_of_turn = JointMove::new()
            .with(xplayer(), Move::Mark(1))
            .with(oplayer(), Move::Noop);
        assert!(state.next(&out_of_turn).is_err());

        // Acting player sitting out.
        let sit_out = JointMove::new()
            .with(oplayer(), Move::Noop)
            .with(xplayer(), Move::Noop);
        assert!(state.next(&sit_out).is_err());

        // No move once the game is over.
        let done = TicTacToe::with_board([1, 1, 1, 2, 2, 0, 0, 0, 0], 2).unwrap();
        assert!(done.next(&mark(&done, 5)).is_err());
    }

    #[test]
    fn test_state_hash_distinguishes_turn() {
        let a = TicTacToe::with_board([1, 0, 0, 0, 0, 0, 0, 0, 0], 1).unwrap();
        let b = TicTacToe::with_board([1, 0, 0, 0, 0, 0, 0, 0, 0], 2).unwrap();
        assert_ne!(a.state_hash(), b.state_hash());
        assert_eq!(a.state_hash(), a.state_hash());
    }
}
