//! Game mode selection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Game mode - who plays O?
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Human plays X, the computer answers as O.
    #[default]
    VsAi,
    /// Two humans share the board.
    TwoPlayer,
}

impl GameMode {
    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::VsAi => "VS AI",
            GameMode::TwoPlayer => "2 PLAYERS",
        }
    }

    /// Toggles between the two modes.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            GameMode::VsAi => GameMode::TwoPlayer,
            GameMode::TwoPlayer => GameMode::VsAi,
        }
    }

    /// True when the computer plays O.
    pub fn has_ai(&self) -> bool {
        matches!(self, GameMode::VsAi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(GameMode::VsAi.toggle(), GameMode::TwoPlayer);
        assert_eq!(GameMode::VsAi.toggle().toggle(), GameMode::VsAi);
    }

    #[test]
    fn test_default_is_vs_ai() {
        assert_eq!(GameMode::default(), GameMode::VsAi);
        assert!(GameMode::default().has_ai());
    }
}
