//! Noughts - terminal tic-tac-toe.
//!
//! The game rules and the minimax opponent live in `noughts_core`; this crate
//! adds the controller that schedules the computer's replies, the terminal
//! UI, settings and the command line.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod logging;
pub mod mode;
pub mod solve;
pub mod tui;

pub use cli::{Cli, Command};
pub use config::{ConfigError, Palette, Settings, Theme};
pub use controller::{ClickOutcome, Controller};
pub use mode::GameMode;
