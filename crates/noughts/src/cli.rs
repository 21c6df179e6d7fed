//! Command-line interface for noughts.

use crate::mode::GameMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe for two players or against a perfect opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (missing file means defaults)
    #[arg(long, default_value = "noughts.toml", global = true)]
    pub config: PathBuf,

    /// Starting mode, overriding the settings file
    #[arg(long, value_enum, global = true)]
    pub mode: Option<GameMode>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the computer's evaluation of a board
    Solve {
        /// Board in compact notation, rows separated by `/`, e.g. `XX./OO./...`
        board: String,
    },
}

impl Cli {
    /// The requested command, `play` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_plays_with_defaults() {
        let cli = Cli::try_parse_from(["noughts"]).unwrap();
        assert_eq!(cli.command(), Command::Play);
        assert_eq!(cli.config, PathBuf::from("noughts.toml"));
        assert_eq!(cli.mode, None);
    }

    #[test]
    fn test_mode_flag() {
        let cli = Cli::try_parse_from(["noughts", "--mode", "two-player", "play"]).unwrap();
        assert_eq!(cli.mode, Some(GameMode::TwoPlayer));
    }

    #[test]
    fn test_solve_takes_board() {
        let cli = Cli::try_parse_from(["noughts", "solve", "XX./OO./..."]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Solve {
                board: "XX./OO./...".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["noughts", "--mode", "solo"]).is_err());
    }
}
