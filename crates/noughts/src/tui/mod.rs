//! Terminal front end.

mod layout;
mod ui;

pub use layout::BoardLayout;
pub use ui::{draw, result_message};

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use noughts_core::Position;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, error, info, instrument};

use crate::config::{Palette, Settings};
use crate::controller::Controller;

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive game until the user quits.
#[instrument(skip(settings))]
pub async fn run(settings: &Settings) -> Result<()> {
    let palette = settings.theme().palette()?;
    let mut controller = Controller::new(*settings.default_mode(), settings.ai_delay());

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut terminal = restore_on_error(enter_screen(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })?;

    info!("Terminal ready");
    let res = event_loop(&mut terminal, &mut controller, &palette).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        error!(error = ?err, "Game loop error");
    }
    info!("Terminal restored");
    res
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs `restore` when `result` is an error, then passes the result on.
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if let Err(ref err) = result {
        error!(error = ?err, "Terminal setup failed, restoring");
        restore();
    }
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller,
    palette: &Palette,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut layout = BoardLayout::centered_in(Rect::default());

    loop {
        terminal.draw(|frame| layout = draw(frame, controller, palette))?;

        let deadline = (*controller.ai_due()).map(tokio::time::Instant::from_std);
        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    info!("Input stream closed");
                    return Ok(());
                };
                if handle_event(controller, &layout, event?, Instant::now()) == Flow::Quit {
                    info!("User quit");
                    return Ok(());
                }
            }
            _ = sleep_until(deadline) => {
                controller.tick(Instant::now())?;
            }
        }
    }
}

/// Sleeps until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn handle_event(
    controller: &mut Controller,
    layout: &BoardLayout,
    event: Event,
    now: Instant,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(controller, key, now),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            if controller.result().is_some() {
                controller.dismiss_result();
            } else if let Some(pos) = layout.cell_at(mouse.column, mouse.row) {
                controller.set_cursor(pos);
                controller.click(pos, now);
            }
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

/// Maps a key press onto the controller.
fn handle_key(controller: &mut Controller, key: KeyEvent, now: Instant) -> Flow {
    debug!(code = ?key.code, "Key pressed");
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        return Flow::Quit;
    }

    // Any other key acknowledges the result.
    if controller.result().is_some() {
        controller.dismiss_result();
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('r') => controller.reset(),
        KeyCode::Char('m') => controller.toggle_mode(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(pos) = Position::from_index(index) {
                controller.set_cursor(pos);
                controller.click(pos, now);
            }
        }
        KeyCode::Up => controller.move_cursor(-1, 0),
        KeyCode::Down => controller.move_cursor(1, 0),
        KeyCode::Left => controller.move_cursor(0, -1),
        KeyCode::Right => controller.move_cursor(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            controller.activate(now);
        }
        _ => {}
    }
    Flow::Continue
}
