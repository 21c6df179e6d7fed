//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, request)} apply_move {Q(before, after)}`.

use super::action::{InvalidMoveReason, MoveError, MoveRequest, Precondition};
use super::invariants::{GameInvariants, InvariantSet};
use super::{Cell, GameState};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails once the game is won or drawn.
    pub fn check(game: &GameState) -> Result<(), MoveError> {
        if game.status().is_terminal() {
            Err(MoveError::PreconditionViolation(Precondition::GameOver))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the request addresses a cell on the board.
pub struct OnBoard;

impl OnBoard {
    /// Fails when row or column is outside `0..3`.
    pub fn check(request: &MoveRequest) -> Result<(), MoveError> {
        match request.position() {
            Some(_) => Ok(()),
            None => Err(MoveError::invalid(request, InvalidMoveReason::OutOfBounds)),
        }
    }
}

/// Precondition: the addressed cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails when the cell already holds a mark.
    pub fn check(request: &MoveRequest, game: &GameState) -> Result<(), MoveError> {
        match request.position() {
            Some(pos) if game.board().is_empty(pos) => Ok(()),
            Some(_) => Err(MoveError::invalid(request, InvalidMoveReason::Occupied)),
            None => Err(MoveError::invalid(request, InvalidMoveReason::OutOfBounds)),
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails when the requesting player is not the one to move.
    pub fn check(request: &MoveRequest, game: &GameState) -> Result<(), MoveError> {
        if request.player != game.current_player() {
            Err(MoveError::OutOfTurn {
                expected: game.current_player(),
                attempted: request.player,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition, checked in order: game running, on board,
/// cell empty, player's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(request: &MoveRequest, game: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(game)?;
        OnBoard::check(request)?;
        CellIsEmpty::check(request, game)?;
        PlayersTurn::check(request, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one empty cell gained a mark and nothing else changed.
pub struct MonotonicBoard;

impl MonotonicBoard {
    /// Compares the boards before and after a move.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let mut placed = 0;
        for (old, new) in before.board().cells().iter().zip(after.board().cells()) {
            match (old, new) {
                (a, b) if a == b => {}
                (Cell::Empty, Cell::Occupied(_)) => placed += 1,
                _ => return false,
            }
        }
        placed == 1
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move requests.
///
/// Preconditions: see [`LegalMove`].
///
/// Postconditions:
/// - Board grows by exactly one mark
/// - Mark counts match the player to move
/// - Status matches the board
pub struct MoveContract;

impl Contract<GameState, MoveRequest> for MoveContract {
    fn pre(game: &GameState, request: &MoveRequest) -> Result<(), MoveError> {
        LegalMove::check(request, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if !MonotonicBoard::holds(before, after) {
            warn!(before = %before.board(), after = %after.board(), "Board changed unexpectedly");
            return Err(MoveError::PreconditionViolation(
                Precondition::InvariantBroken("Exactly one empty cell gains a mark"),
            ));
        }

        GameInvariants::check_all(after).map_err(|violations| {
            warn!(?violations, "Postcondition failed");
            MoveError::PreconditionViolation(Precondition::InvariantBroken(violations[0]))
        })
    }
}
