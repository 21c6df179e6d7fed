//! First-class invariants for the game state.
//!
//! Invariants are logical properties that must hold for every reachable
//! [`GameState`]. They are checked after each move in debug builds and can
//! be tested independently.

use super::rules::compute_status;
use super::{GameState, Player};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns the description of every invariant that does not hold.
    fn check_all(state: &S) -> Result<(), Vec<&'static str>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<&'static str>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(I1::description());
        }

        if !I2::holds(state) {
            violations.push(I2::description());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: mark counts agree with whose turn it is.
///
/// X moves first, so X to move means the counts are equal and O to move
/// means X is exactly one ahead. The turn flips on every move, the final
/// one included, so this also holds for finished games.
pub struct MarkBalanceInvariant;

impl Invariant<GameState> for MarkBalanceInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);

        match state.current_player() {
            Player::X => x == o,
            Player::O => x == o + 1,
        }
    }

    fn description() -> &'static str {
        "X count equals O count on X's turn and exceeds it by one on O's turn"
    }
}

/// Invariant: the stored status is the one the board implies.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        compute_status(state.board()) == *state.status()
    }

    fn description() -> &'static str {
        "Status matches the board"
    }
}

/// All game-state invariants as a composable set.
pub type GameInvariants = (MarkBalanceInvariant, StatusConsistentInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, MoveRequest};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GameInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let moves = [
            MoveRequest::new(0, 0, Player::X),
            MoveRequest::new(1, 1, Player::O),
            MoveRequest::new(0, 2, Player::X),
        ];
        let game = GameState::replay(&moves).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_detects_unbalanced_board() {
        let mut game = GameState::new();
        game.board = "XX./.../...".parse::<Board>().unwrap();

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations, vec![MarkBalanceInvariant::description()]);
    }

    #[test]
    fn test_detects_stale_status() {
        let mut game = GameState::new();
        game.board = "XXX/OO./...".parse::<Board>().unwrap();
        game.current_player = Player::O;

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations, vec![StatusConsistentInvariant::description()]);
    }
}
