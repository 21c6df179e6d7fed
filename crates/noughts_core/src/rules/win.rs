//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player, Position};

/// The 8 winning lines, in scan order: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line (in [`LINES`] order) held entirely by one player.
pub fn winning_line(board: &Board) -> Option<(Player, [Position; 3])> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line;
        let player = board.get(a).owner()?;
        let held = Cell::Occupied(player);
        (board.get(b) == held && board.get(c) == held).then_some((player, line))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise. The first completed line found is authoritative.
///
/// Called at every node of the minimax search, so it opens no span.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
