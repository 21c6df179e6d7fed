//! Perfect-play opponent using exhaustive minimax.
//!
//! The search scores every reachable position from O's point of view:
//! `+1` when O completes a line, `-1` when X does, `0` for a full board.
//! Nothing is pruned or cached; the 3x3 game tree is small enough to walk
//! completely on every turn. Boards are copied into each recursive call, so
//! no caller-visible state is ever touched during the search.

use super::action::{MoveError, Precondition};
use super::rules::{check_winner, compute_status};
use super::{Board, Cell, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Minimax score from O's point of view.
pub type Score = i8;

/// O has won.
pub const WIN: Score = 1;
/// Nobody has won.
pub const DRAW: Score = 0;
/// X has won.
pub const LOSS: Score = -1;

/// A candidate move together with its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Where O would play.
    pub position: Position,
    /// Value of the resulting position with best play from both sides.
    pub score: Score,
}

/// The computer opponent. Always plays O and holds no state between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiPlayer;

impl AiPlayer {
    /// The mark the AI plays.
    pub const MARK: Player = Player::O;

    /// Creates the AI player.
    pub fn new() -> Self {
        Self
    }

    /// Scores every empty cell as a move for O, in row-major order.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation(GameOver)` if the board is already won or full.
    #[instrument(skip(self), fields(board = %board))]
    pub fn score_moves(&self, board: &Board) -> Result<Vec<ScoredMove>, MoveError> {
        if compute_status(board).is_terminal() {
            return Err(MoveError::PreconditionViolation(Precondition::GameOver));
        }

        let mut search = Search::default();
        let scored: Vec<ScoredMove> = Position::valid_moves(board)
            .into_iter()
            .map(|position| ScoredMove {
                position,
                score: search.minimax(board.with(position, Cell::Occupied(Self::MARK)), false),
            })
            .collect();

        debug!(nodes = search.nodes, candidates = scored.len(), "Search complete");
        Ok(scored)
    }

    /// Chooses the best move for O.
    ///
    /// The highest score wins; among equal scores the first in row-major
    /// order is kept.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation(GameOver)` if the board is already won or full.
    #[instrument(skip(self), fields(board = %board))]
    pub fn choose_move(&self, board: &Board) -> Result<Position, MoveError> {
        let best = best_of(&self.score_moves(board)?)
            .ok_or(MoveError::PreconditionViolation(Precondition::GameOver))?;

        debug!(position = %best.position, score = best.score, "AI chose move");
        Ok(best.position)
    }
}

/// Picks the strictly greatest score, ties going to the earliest candidate.
pub fn best_of(candidates: &[ScoredMove]) -> Option<ScoredMove> {
    candidates.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if candidate.score <= b.score => Some(b),
        _ => Some(candidate),
    })
}

/// Value of `board` with `maximizing` telling whose turn it is (O when true).
pub fn minimax(board: &Board, maximizing: bool) -> Score {
    Search::default().minimax(*board, maximizing)
}

/// Node counter for one search.
#[derive(Debug, Default)]
struct Search {
    nodes: u64,
}

impl Search {
    fn minimax(&mut self, board: Board, maximizing: bool) -> Score {
        self.nodes += 1;

        match check_winner(&board) {
            Some(Player::O) => return WIN,
            Some(Player::X) => return LOSS,
            None if board.is_full() => return DRAW,
            None => {}
        }

        let (mark, mut best) = if maximizing {
            (Player::O, Score::MIN)
        } else {
            (Player::X, Score::MAX)
        };

        for position in board.empty_positions() {
            let score = self.minimax(board.with(position, Cell::Occupied(mark)), !maximizing);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}
