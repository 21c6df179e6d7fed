//! One-shot board evaluation for the `solve` command.

use std::fmt::Write;

use anyhow::{Context, Result};
use noughts_core::ai::{DRAW, LOSS, WIN, best_of};
use noughts_core::{AiPlayer, Board, Score};
use tracing::{info, instrument};

fn describe(score: Score) -> &'static str {
    match score {
        WIN => "win",
        DRAW => "draw",
        LOSS => "loss",
        _ => "?",
    }
}

/// Scores every empty cell for O and reports the move the computer would play.
#[instrument]
pub fn solve(notation: &str) -> Result<String> {
    let board: Board = notation
        .parse()
        .with_context(|| format!("Invalid board {:?}", notation))?;

    let scored = AiPlayer::new()
        .score_moves(&board)
        .context("Board has no moves to score")?;
    let choice = best_of(&scored)
        .map(|m| m.position)
        .context("Board has no moves to score")?;
    info!(%choice, "Solved");

    let mut out = String::new();
    writeln!(out, "{}", board)?;
    writeln!(out)?;
    for m in &scored {
        writeln!(out, "{:>2}  {:<5} {}", m.score, describe(m.score), m.position)?;
    }
    writeln!(out)?;
    writeln!(out, "O plays {}", choice)?;
    Ok(out)
}
