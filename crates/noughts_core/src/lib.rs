//! Tic-tac-toe game logic and a perfect-play opponent.
//!
//! # Architecture
//!
//! - **State**: [`GameState`] is an immutable value; [`GameState::apply_move`]
//!   validates a move against the [`MoveContract`] and returns the next state
//! - **Rules**: pure board evaluation ([`rules::compute_status`])
//! - **AI**: [`AiPlayer`] plays O using exhaustive minimax
//!
//! # Example
//!
//! ```
//! use noughts_core::{AiPlayer, GameState, GameStatus, Player, Position};
//!
//! # fn main() -> Result<(), noughts_core::MoveError> {
//! let game = GameState::new().apply_move(0, 0, Player::X)?;
//! let reply = AiPlayer::new().choose_move(game.board())?;
//! assert_eq!(reply, Position::Center);
//!
//! let (row, col) = reply.coords();
//! let game = game.apply_move(row, col, Player::O)?;
//! assert_eq!(*game.status(), GameStatus::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod ai;
pub mod contracts;
pub mod invariants;
mod position;
pub mod rules;
mod state;
mod types;

pub use action::{InvalidMoveReason, MoveError, MoveRequest, Precondition};
pub use ai::{AiPlayer, Score, ScoredMove};
pub use contracts::{Contract, MoveContract};
pub use position::Position;
pub use state::GameState;
pub use types::{Board, BoardParseError, Cell, GameStatus, Player};
