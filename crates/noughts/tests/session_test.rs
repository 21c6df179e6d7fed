//! Drives whole sessions through the public controller API.

use std::io::Write;
use std::time::{Duration, Instant};

use noughts::{ClickOutcome, Controller, GameMode, Settings};
use noughts_core::{Cell, GameStatus, Player, Position};

#[test]
fn test_settings_file_configures_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_mode = \"two-player\"\nai_delay_ms = 0").unwrap();
    let settings = Settings::load(file.path()).unwrap();

    let mut c = Controller::new(*settings.default_mode(), settings.ai_delay());
    let now = Instant::now();
    assert_eq!(c.click(Position::Center, now), ClickOutcome::Played);
    assert_eq!(c.click(Position::TopLeft, now), ClickOutcome::Played);
    assert_eq!(
        c.state().board().get(Position::TopLeft),
        Cell::Occupied(Player::O)
    );
}

#[test]
fn test_vs_ai_session_blocks_and_never_loses() {
    let mut c = Controller::new(GameMode::VsAi, Duration::from_millis(10));
    let mut now = Instant::now();

    // X tries the top row; O must answer in the centre, then block.
    c.click(Position::TopLeft, now);
    now += Duration::from_millis(10);
    assert_eq!(c.tick(now), Ok(true));
    assert_eq!(
        c.state().board().get(Position::Center),
        Cell::Occupied(Player::O)
    );

    c.click(Position::TopCenter, now);
    now += Duration::from_millis(10);
    assert_eq!(c.tick(now), Ok(true));
    assert_eq!(
        c.state().board().get(Position::TopRight),
        Cell::Occupied(Player::O)
    );

    // Finish with whatever is left.
    while c.result().is_none() {
        let pos = c.state().board().empty_positions().last().unwrap();
        c.click(pos, now);
        now += Duration::from_millis(10);
        c.tick(now).unwrap();
    }
    assert_ne!(*c.result(), Some(GameStatus::Won(Player::X)));

    c.dismiss_result();
    assert_eq!(c.state().current_player(), Player::X);
    assert_eq!(*c.mode(), GameMode::VsAi);
}
