//! Settings loaded from an optional TOML file.

use crate::mode::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode used when the game starts.
    default_mode: GameMode,

    /// Pause before the computer answers, in milliseconds.
    ai_delay_ms: u64,

    /// File receiving log output while the terminal UI owns the screen.
    log_file: PathBuf,

    /// Colours, as `#rrggbb` strings or ratatui colour names.
    theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: GameMode::VsAi,
            ai_delay_ms: 300,
            log_file: PathBuf::from("noughts.log"),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        // Surface bad colours at load time rather than on first draw.
        settings.theme.palette()?;

        info!(mode = ?settings.default_mode, "Settings loaded");
        Ok(settings)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the starting mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// The AI pause as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

/// Colour scheme as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Screen background.
    background: String,
    /// Grid lines.
    grid: String,
    /// X marks.
    x: String,
    /// O marks.
    o: String,
    /// Labels and messages.
    text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#0b0f1a".to_string(),
            grid: "#1f2a44".to_string(),
            x: "#00e5ff".to_string(),
            o: "#ff4dd2".to_string(),
            text: "#e6f1ff".to_string(),
        }
    }
}

impl Theme {
    /// Parses every colour.
    #[instrument(skip(self))]
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            background: parse_color("background", &self.background)?,
            grid: parse_color("grid", &self.grid)?,
            x: parse_color("x", &self.x)?,
            o: parse_color("o", &self.o)?,
            text: parse_color("text", &self.text)?,
        })
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value)
        .map_err(|_| ConfigError::new(format!("Invalid colour for theme.{}: {:?}", field, value)))
}

/// Colours ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Grid lines.
    pub grid: Color,
    /// X marks.
    pub x: Color,
    /// O marks.
    pub o: Color,
    /// Labels and messages.
    pub text: Color,
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
