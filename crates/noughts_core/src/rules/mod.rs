//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the state machine, the
//! contracts and the search can all share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use super::{Board, GameStatus};
use tracing::instrument;

/// Derives the status of a board.
///
/// Any completed line wins, otherwise a full board is a draw, otherwise the
/// game is still in progress.
#[instrument]
pub fn compute_status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(compute_status(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_win_on_full_board_is_win_not_draw() {
        let board: Board = "XXX/OOX/OXO".parse().unwrap();
        assert_eq!(compute_status(&board), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX/OXO/OXO".parse().unwrap();
        assert_eq!(compute_status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_compute_status_is_repeatable() {
        for notation in ["XX./OO./...", "XOX/OXO/OXO", "O../.O./..O", "X../.../..."] {
            let board: Board = notation.parse().unwrap();
            assert_eq!(compute_status(&board), compute_status(&board));
        }
    }
}
