//! Stateless rendering of the controller onto a frame.

use noughts_core::{Cell, GameStatus, Player, Position};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::{BoardLayout, CELL_HEIGHT, CELL_WIDTH};
use crate::config::Palette;
use crate::controller::Controller;
use crate::mode::GameMode;

const X_GLYPH: [&str; 3] = ["\\ /", " X ", "/ \\"];
const O_GLYPH: [&str; 3] = ["╭─╮", "│ │", "╰─╯"];

/// Draws one frame and returns where the board ended up, for hit-testing.
pub fn draw(frame: &mut Frame, controller: &Controller, palette: &Palette) -> BoardLayout {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let [header, board_area, status, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header, *controller.mode(), palette);

    let layout = BoardLayout::centered_in(board_area);
    draw_board(frame.buffer_mut(), &layout, controller, palette);

    let status_line = Paragraph::new(controller.status_line())
        .style(Style::default().fg(palette.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(status_line, status);

    let help_line = Paragraph::new("1-9 play | arrows + Enter | m mode | r reset | q quit")
        .style(Style::default().fg(palette.grid))
        .alignment(Alignment::Center);
    frame.render_widget(help_line, help);

    if let Some(result) = controller.result() {
        draw_result(frame, area, *result, palette);
    }

    layout
}

fn draw_header(frame: &mut Frame, area: Rect, mode: GameMode, palette: &Palette) {
    let selected = Style::default()
        .fg(palette.background)
        .bg(palette.x)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(palette.text);

    let mode_span = |m: GameMode| {
        let style = if m == mode { selected } else { unselected };
        Span::styled(format!(" {} ", m.name()), style)
    };

    let line = Line::from(vec![
        Span::styled(
            "NOUGHTS & CROSSES",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        mode_span(GameMode::VsAi),
        Span::raw(" "),
        mode_span(GameMode::TwoPlayer),
        Span::raw("   "),
        Span::styled("[R] RESET", Style::default().fg(palette.o)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_board(buf: &mut Buffer, layout: &BoardLayout, controller: &Controller, palette: &Palette) {
    let area = layout.area().intersection(buf.area);
    let grid = Style::default().fg(palette.grid);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let symbol = match (layout.is_vertical_line(x), layout.is_horizontal_line(y)) {
                (true, true) => "┼",
                (true, false) => "│",
                (false, true) => "─",
                (false, false) => continue,
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(grid);
            }
        }
    }

    let board = controller.state().board();
    let show_cursor = controller.result().is_none();
    for pos in Position::ALL {
        let rect = layout.cell_rect(pos).intersection(buf.area);
        if show_cursor && pos == *controller.cursor() {
            buf.set_style(rect, Style::default().bg(palette.grid));
        }
        match board.get(pos) {
            Cell::Empty => draw_label(buf, rect, pos, palette),
            Cell::Occupied(Player::X) => draw_glyph(buf, rect, &X_GLYPH, palette.x),
            Cell::Occupied(Player::O) => draw_glyph(buf, rect, &O_GLYPH, palette.o),
        }
    }
}

fn draw_label(buf: &mut Buffer, rect: Rect, pos: Position, palette: &Palette) {
    if rect.is_empty() {
        return;
    }
    let label = (pos.index() + 1).to_string();
    buf.set_string(
        rect.x,
        rect.y,
        label,
        Style::default().fg(palette.grid).add_modifier(Modifier::DIM),
    );
}

fn draw_glyph(buf: &mut Buffer, rect: Rect, glyph: &[&str; 3], color: ratatui::style::Color) {
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let x = rect.x + CELL_WIDTH.saturating_sub(3) / 2;
    let top = rect.y + CELL_HEIGHT.saturating_sub(3) / 2;
    for (i, line) in glyph.iter().enumerate() {
        let y = top + i as u16;
        if y < rect.bottom() && x < rect.right() {
            buf.set_stringn(x, y, line, (rect.right() - x) as usize, style);
        }
    }
}

/// Text of the end-of-game notification.
pub fn result_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won(Player::X) => "Player X Wins!",
        GameStatus::Won(Player::O) => "Player O Wins!",
        GameStatus::Draw | GameStatus::InProgress => "It's a Draw!",
    }
}

fn draw_result(frame: &mut Frame, area: Rect, status: GameStatus, palette: &Palette) {
    let popup = popup_rect(area, 30, 5);
    let accent = match status.winner() {
        Some(Player::X) => palette.x,
        Some(Player::O) => palette.o,
        None => palette.text,
    };

    let text = vec![
        Line::from(Span::styled(
            result_message(status),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(palette.grid),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(palette.background)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
