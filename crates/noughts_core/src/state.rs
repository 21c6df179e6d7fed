//! The game state machine.
//!
//! A [`GameState`] is a value. The only transition is
//! [`GameState::apply_move`], which validates a request against the move
//! contract and returns the successor state; the receiver is left untouched.
//! Starting over is [`GameState::reset`], which simply builds a fresh value.

use super::action::{InvalidMoveReason, MoveError, MoveRequest, Precondition};
use super::contracts::{Contract, MoveContract};
use super::rules::compute_status;
use super::{Board, Cell, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) status: GameStatus,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the initial state. Equivalent to [`GameState::new`].
    pub fn reset() -> Self {
        Self::new()
    }

    /// Builds a state from an arbitrary board.
    ///
    /// The player to move follows from the mark counts; the status is
    /// computed from the board, so finished positions are accepted.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation(UnbalancedBoard)` when the counts could not
    /// arise from X-first alternation.
    #[instrument]
    pub fn from_board(board: Board) -> Result<Self, MoveError> {
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        let current_player = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(MoveError::PreconditionViolation(
                Precondition::UnbalancedBoard { x, o },
            ));
        };

        Ok(Self {
            board,
            current_player,
            status: compute_status(&board),
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Places `player`'s mark at `(row, col)` and returns the next state.
    ///
    /// The returned state has the turn passed to the opponent and its status
    /// recomputed from the new board.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `PreconditionViolation(GameOver)` if the game already ended
    /// - `InvalidMove` if the cell is off the board or occupied
    /// - `OutOfTurn` if `player` is not the one to move
    #[instrument(skip(self), fields(to_move = %self.current_player, status = %self.status))]
    pub fn apply_move(&self, row: usize, col: usize, player: Player) -> Result<Self, MoveError> {
        let request = MoveRequest::new(row, col, player);
        MoveContract::pre(self, &request)?;

        let Some(position) = request.position() else {
            return Err(MoveError::invalid(&request, InvalidMoveReason::OutOfBounds));
        };

        let board = self.board.with(position, Cell::Occupied(player));
        let next = Self {
            board,
            current_player: player.opponent(),
            status: compute_status(&board),
        };

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        debug!(%request, status = %next.status, "Move applied");
        Ok(next)
    }

    /// Applies a validated request.
    pub fn apply(&self, request: MoveRequest) -> Result<Self, MoveError> {
        self.apply_move(request.row, request.col, request.player)
    }

    /// Replays moves from the initial state, stopping at the first error.
    #[instrument]
    pub fn replay(moves: &[MoveRequest]) -> Result<Self, MoveError> {
        moves
            .iter()
            .try_fold(Self::new(), |game, request| game.apply(*request))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(*game.status(), GameStatus::InProgress);
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn test_apply_move_flips_turn_and_leaves_receiver_alone() {
        let game = GameState::new();
        let next = game.apply_move(2, 0, Player::X).unwrap();

        assert_eq!(next.current_player(), Player::O);
        assert_eq!(
            next.board().get(Position::BottomLeft),
            Cell::Occupied(Player::X)
        );
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_out_of_range_is_invalid_move() {
        let game = GameState::new();
        assert_eq!(
            game.apply_move(3, 0, Player::X),
            Err(MoveError::InvalidMove {
                row: 3,
                col: 0,
                reason: InvalidMoveReason::OutOfBounds,
            })
        );
    }

    #[test]
    fn test_move_after_win_is_precondition_violation() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let game = GameState::from_board(board).unwrap();
        assert_eq!(*game.status(), GameStatus::Won(Player::X));
        assert_eq!(
            game.apply_move(2, 2, Player::O),
            Err(MoveError::PreconditionViolation(Precondition::GameOver))
        );
    }

    #[test]
    fn test_from_board_derives_player_to_move() {
        let x_to_move = GameState::from_board("XO./.../...".parse().unwrap()).unwrap();
        assert_eq!(x_to_move.current_player(), Player::X);

        let o_to_move = GameState::from_board("X../.../...".parse().unwrap()).unwrap();
        assert_eq!(o_to_move.current_player(), Player::O);
    }

    #[test]
    fn test_from_board_rejects_unbalanced() {
        let result = GameState::from_board("OO./.../...".parse().unwrap());
        assert_eq!(
            result,
            Err(MoveError::PreconditionViolation(
                Precondition::UnbalancedBoard { x: 0, o: 2 }
            ))
        );
    }

    #[test]
    fn test_reset_matches_new() {
        assert_eq!(GameState::reset(), GameState::new());
    }
}
