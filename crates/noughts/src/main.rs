//! Noughts - terminal tic-tac-toe.

use anyhow::{Context, Result};
use clap::Parser;
use noughts::{Cli, Command, Settings, logging, solve, tui};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command() {
        Command::Play => {
            let mut settings = Settings::load(&cli.config)
                .with_context(|| format!("Failed to load {}", cli.config.display()))?;
            if let Some(mode) = cli.mode {
                settings = settings.with_mode(mode);
            }

            logging::init_file(settings.log_file())?;
            info!(mode = settings.default_mode().name(), "Starting noughts");
            tui::run(&settings).await
        }
        Command::Solve { board } => {
            logging::init_stderr();
            print!("{}", solve::solve(&board)?);
            Ok(())
        }
    }
}
