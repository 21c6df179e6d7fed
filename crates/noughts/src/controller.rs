//! Game controller: turns clicks and timer ticks into moves.
//!
//! The controller owns the only [`GameState`] and decides when the computer
//! plays. Time is passed in by the caller, so the whole flow can be driven
//! from tests without a terminal or a clock.

use std::time::{Duration, Instant};

use derive_getters::Getters;
use noughts_core::{AiPlayer, GameState, GameStatus, MoveError, MoveRequest, Player, Position};
use tracing::{debug, info, instrument, warn};

use crate::mode::GameMode;

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The move was applied.
    Played,
    /// The click was ignored (occupied cell, AI's turn, result on screen).
    Ignored,
}

/// Owns the game and the mode, and schedules the computer's replies.
#[derive(Debug, Getters)]
pub struct Controller {
    state: GameState,
    mode: GameMode,
    ai_delay: Duration,
    cursor: Position,
    /// When the pending AI move is due, if one is scheduled.
    ai_due: Option<Instant>,
    /// Final status of the last game, shown until acknowledged.
    result: Option<GameStatus>,
    #[getter(skip)]
    ai: AiPlayer,
}

impl Controller {
    /// Creates a controller with a fresh game.
    #[instrument]
    pub fn new(mode: GameMode, ai_delay: Duration) -> Self {
        info!(mode = mode.name(), "Creating controller");
        Self {
            state: GameState::new(),
            mode,
            ai_delay,
            cursor: Position::Center,
            ai_due: None,
            result: None,
            ai: AiPlayer::new(),
        }
    }

    /// True while the computer is about to move.
    pub fn ai_pending(&self) -> bool {
        self.ai_due.is_some()
    }

    fn is_ai_turn(&self) -> bool {
        self.mode.has_ai() && self.state.current_player() == AiPlayer::MARK
    }

    /// Handles a click on `position`.
    #[instrument(skip(self), fields(to_move = %self.state.current_player()))]
    pub fn click(&mut self, position: Position, now: Instant) -> ClickOutcome {
        if self.result.is_some() || self.ai_due.is_some() || self.is_ai_turn() {
            debug!("Click ignored: not accepting input");
            return ClickOutcome::Ignored;
        }
        if !self.state.board().is_empty(position) {
            debug!("Click ignored: cell occupied");
            return ClickOutcome::Ignored;
        }

        let player = self.state.current_player();
        match self.state.apply(MoveRequest::at(position, player)) {
            Ok(next) => {
                info!(%player, %position, "Human moved");
                self.state = next;
            }
            Err(e) => {
                warn!(error = %e, "Click rejected");
                return ClickOutcome::Ignored;
            }
        }

        if self.record_result() {
            return ClickOutcome::Played;
        }

        if self.is_ai_turn() {
            debug!(delay_ms = self.ai_delay.as_millis() as u64, "Scheduling AI move");
            self.ai_due = Some(now + self.ai_delay);
        }

        ClickOutcome::Played
    }

    /// Clicks the cell under the cursor.
    pub fn activate(&mut self, now: Instant) -> ClickOutcome {
        self.click(self.cursor, now)
    }

    /// Plays the scheduled AI move if it is due.
    ///
    /// Returns `Ok(true)` when a move was made.
    ///
    /// # Errors
    ///
    /// Propagates a `PreconditionViolation` from the AI; with a correctly
    /// scheduled turn this does not happen.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now: Instant) -> Result<bool, MoveError> {
        match self.ai_due {
            Some(due) if now >= due => {}
            _ => return Ok(false),
        }
        self.ai_due = None;

        let position = self.ai.choose_move(self.state.board())?;
        self.state = self.state.apply(MoveRequest::at(position, AiPlayer::MARK))?;
        info!(%position, "AI moved");

        self.record_result();
        Ok(true)
    }

    /// Stores the status once the game has ended. Returns true if it has.
    fn record_result(&mut self) -> bool {
        let status = *self.state.status();
        if status.is_terminal() {
            info!(%status, "Game over");
            self.result = Some(status);
            true
        } else {
            false
        }
    }

    /// Starts a new game in the current mode.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting game");
        self.state = GameState::reset();
        self.ai_due = None;
        self.result = None;
    }

    /// Acknowledges the result notification and starts over.
    pub fn dismiss_result(&mut self) {
        if self.result.is_some() {
            self.reset();
        }
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        info!(mode = self.mode.name(), "Mode changed");
        self.reset();
    }

    /// Moves the keyboard cursor by one cell, stopping at the edges.
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (row, col) = self.cursor.coords();
        let row = row.saturating_add_signed(d_row).min(2);
        let col = col.saturating_add_signed(d_col).min(2);
        if let Some(pos) = Position::from_coords(row, col) {
            self.cursor = pos;
        }
    }

    /// Places the cursor directly.
    pub fn set_cursor(&mut self, position: Position) {
        self.cursor = position;
    }

    /// One-line description of whose turn it is.
    pub fn status_line(&self) -> String {
        match self.state.status() {
            GameStatus::Won(player) => format!("Player {} wins!", player),
            GameStatus::Draw => "It's a draw!".to_string(),
            GameStatus::InProgress if self.ai_pending() => "AI is thinking...".to_string(),
            GameStatus::InProgress => {
                let player = self.state.current_player();
                match (self.mode, player) {
                    (GameMode::VsAi, Player::X) => "Your turn (X)".to_string(),
                    _ => format!("Player {}'s turn", player),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::Cell;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_two_player_alternates_without_ai() {
        let mut c = Controller::new(GameMode::TwoPlayer, DELAY);
        let now = Instant::now();

        assert_eq!(c.click(Position::Center, now), ClickOutcome::Played);
        assert!(!c.ai_pending());
        assert_eq!(c.click(Position::TopLeft, now), ClickOutcome::Played);

        let board = c.state().board();
        assert_eq!(board.get(Position::Center), Cell::Occupied(Player::X));
        assert_eq!(board.get(Position::TopLeft), Cell::Occupied(Player::O));
    }

    #[test]
    fn test_occupied_click_ignored() {
        let mut c = Controller::new(GameMode::TwoPlayer, DELAY);
        let now = Instant::now();
        c.click(Position::Center, now);

        let before = *c.state();
        assert_eq!(c.click(Position::Center, now), ClickOutcome::Ignored);
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_ai_answers_after_delay() {
        let mut c = Controller::new(GameMode::VsAi, DELAY);
        let start = Instant::now();

        assert_eq!(c.click(Position::TopLeft, start), ClickOutcome::Played);
        assert!(c.ai_pending());
        assert_eq!(c.status_line(), "AI is thinking...");

        // Human can't move again while the AI is pending.
        assert_eq!(c.click(Position::BottomRight, start), ClickOutcome::Ignored);

        // Not yet due.
        assert_eq!(c.tick(start + DELAY / 2), Ok(false));
        assert_eq!(c.state().current_player(), Player::O);

        assert_eq!(c.tick(start + DELAY), Ok(true));
        assert!(!c.ai_pending());
        assert_eq!(c.state().current_player(), Player::X);
        assert_eq!(
            c.state().board().get(Position::Center),
            Cell::Occupied(Player::O)
        );
    }

    #[test]
    fn test_tick_without_pending_move_does_nothing() {
        let mut c = Controller::new(GameMode::VsAi, DELAY);
        assert_eq!(c.tick(Instant::now()), Ok(false));
        assert_eq!(*c.state(), GameState::new());
    }

    #[test]
    fn test_win_shows_result_then_dismiss_resets() {
        let mut c = Controller::new(GameMode::TwoPlayer, DELAY);
        let now = Instant::now();
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::TopRight,
        ] {
            c.click(pos, now);
        }

        assert_eq!(*c.result(), Some(GameStatus::Won(Player::X)));
        assert_eq!(c.click(Position::BottomRight, now), ClickOutcome::Ignored);

        c.dismiss_result();
        assert_eq!(*c.result(), None);
        assert_eq!(*c.state(), GameState::new());
    }

    #[test]
    fn test_ai_not_scheduled_after_winning_move() {
        let mut c = Controller::new(GameMode::VsAi, Duration::ZERO);
        let now = Instant::now();
        // Hand the AI a board where X wins on the next click.
        c.state = GameState::from_board("XX./OO./...".parse().unwrap()).unwrap();

        assert_eq!(c.click(Position::TopRight, now), ClickOutcome::Played);
        assert!(!c.ai_pending());
        assert_eq!(*c.result(), Some(GameStatus::Won(Player::X)));
    }

    #[test]
    fn test_toggle_mode_starts_fresh_game() {
        let mut c = Controller::new(GameMode::VsAi, DELAY);
        c.click(Position::Center, Instant::now());
        assert!(c.ai_pending());

        c.toggle_mode();
        assert_eq!(*c.mode(), GameMode::TwoPlayer);
        assert!(!c.ai_pending());
        assert_eq!(*c.state(), GameState::new());
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut c = Controller::new(GameMode::TwoPlayer, DELAY);
        c.move_cursor(-1, -1);
        assert_eq!(*c.cursor(), Position::TopLeft);
        c.move_cursor(-1, 0);
        assert_eq!(*c.cursor(), Position::TopLeft);
        c.move_cursor(5, 5);
        assert_eq!(*c.cursor(), Position::BottomRight);

        assert_eq!(c.activate(Instant::now()), ClickOutcome::Played);
        assert_eq!(
            c.state().board().get(Position::BottomRight),
            Cell::Occupied(Player::X)
        );
    }

    #[test]
    fn test_full_game_against_ai_never_lost() {
        let mut c = Controller::new(GameMode::VsAi, Duration::ZERO);
        let mut now = Instant::now();
        // Naive human: always the first empty cell.
        while c.result().is_none() {
            let pos = c
                .state()
                .board()
                .empty_positions()
                .next()
                .expect("Board not full while game runs");
            c.click(pos, now);
            now += Duration::from_millis(1);
            c.tick(now).unwrap();
        }
        assert_ne!(*c.result(), Some(GameStatus::Won(Player::X)));
    }
}
