//! Draw detection logic for tic-tac-toe.

use super::super::Board;
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A draw is a full board on which nobody completed a line.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
