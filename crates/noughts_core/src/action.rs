//! First-class move requests and the errors they can produce.
//!
//! A request is the caller's intent, `(row, col, player)`, exactly as it
//! arrives from input. It is validated by the move contract before the
//! state machine applies it.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A request for `player` to mark the cell at `(row, col)`.
///
/// Coordinates are unchecked here; out-of-range requests are rejected when
/// the request is validated against a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row, expected in `0..3`.
    pub row: usize,
    /// Column, expected in `0..3`.
    pub col: usize,
    /// The player making the move.
    pub player: Player,
}

impl MoveRequest {
    /// Creates a new move request.
    #[instrument]
    pub fn new(row: usize, col: usize, player: Player) -> Self {
        Self { row, col, player }
    }

    /// Creates a request for a known-valid position.
    pub fn at(position: Position, player: Player) -> Self {
        let (row, col) = position.coords();
        Self { row, col, player }
    }

    /// The addressed position, or `None` when off the board.
    pub fn position(&self) -> Option<Position> {
        Position::from_coords(self.row, self.col)
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> ({}, {})", self.player, self.row, self.col)
    }
}

/// Why a move was rejected as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMoveReason {
    /// Row or column outside `0..3`.
    #[display("outside the 3x3 board")]
    OutOfBounds,
    /// The cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,
}

/// An operation was invoked in a state where it is not defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Precondition {
    /// The game is already won or drawn.
    #[display("game is already over")]
    GameOver,

    /// The board's mark counts cannot arise from X-first alternation.
    #[display("board has {} X and {} O marks", x, o)]
    UnbalancedBoard {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },

    /// A move left the state inconsistent (debug-build postcondition).
    #[display("state invariant broken: {}", _0)]
    InvariantBroken(&'static str),
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell is occupied or off the board.
    #[display("Invalid move at ({}, {}): {}", row, col, reason)]
    InvalidMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// What made the move invalid.
        reason: InvalidMoveReason,
    },

    /// It's not this player's turn.
    #[display("It's not {}'s turn ({} to move)", attempted, expected)]
    OutOfTurn {
        /// The player whose turn it is.
        expected: Player,
        /// The player who tried to move.
        attempted: Player,
    },

    /// The operation is not defined in the current state.
    #[display("Precondition violated: {}", _0)]
    PreconditionViolation(Precondition),
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Builds an `InvalidMove` error for a request.
    pub fn invalid(request: &MoveRequest, reason: InvalidMoveReason) -> Self {
        MoveError::InvalidMove {
            row: request.row,
            col: request.col,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_position() {
        assert_eq!(
            MoveRequest::new(2, 1, Player::X).position(),
            Some(Position::BottomCenter)
        );
        assert_eq!(MoveRequest::new(1, 3, Player::X).position(), None);

        let at = MoveRequest::at(Position::MiddleRight, Player::O);
        assert_eq!(at, MoveRequest::new(1, 2, Player::O));
        assert_eq!(at.position(), Some(Position::MiddleRight));
    }

    #[test]
    fn test_error_messages() {
        let occupied = MoveError::invalid(
            &MoveRequest::new(0, 0, Player::O),
            InvalidMoveReason::Occupied,
        );
        assert_eq!(
            occupied.to_string(),
            "Invalid move at (0, 0): cell is already occupied"
        );

        let out_of_turn = MoveError::OutOfTurn {
            expected: Player::X,
            attempted: Player::O,
        };
        assert_eq!(out_of_turn.to_string(), "It's not O's turn (X to move)");

        let over = MoveError::PreconditionViolation(Precondition::GameOver);
        assert_eq!(over.to_string(), "Precondition violated: game is already over");
    }
}
