//! Board geometry shared by rendering and mouse hit-testing.

use noughts_core::Position;
use ratatui::layout::Rect;

/// Width of one cell in terminal columns.
pub const CELL_WIDTH: u16 = 11;
/// Height of one cell in terminal rows.
pub const CELL_HEIGHT: u16 = 5;
/// Thickness of a grid line.
pub const GRID: u16 = 1;

/// Total board width including the two inner grid lines.
pub const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + GRID * 2;
/// Total board height including the two inner grid lines.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + GRID * 2;

/// Where the board and its cells sit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    area: Rect,
}

impl BoardLayout {
    /// Centres the board inside `area`, clipping if the terminal is too small.
    pub fn centered_in(area: Rect) -> Self {
        let width = BOARD_WIDTH.min(area.width);
        let height = BOARD_HEIGHT.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        Self {
            area: Rect::new(x, y, width, height),
        }
    }

    /// The whole board including grid lines.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Screen rectangle of one cell.
    pub fn cell_rect(&self, position: Position) -> Rect {
        let (row, col) = position.coords();
        Rect::new(
            self.area.x + col as u16 * (CELL_WIDTH + GRID),
            self.area.y + row as u16 * (CELL_HEIGHT + GRID),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
        .intersection(self.area)
    }

    /// Cell under a terminal coordinate. Grid lines and the outside map to `None`.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        if column < self.area.x || row < self.area.y {
            return None;
        }
        let dx = column - self.area.x;
        let dy = row - self.area.y;
        if dx >= self.area.width || dy >= self.area.height {
            return None;
        }

        let stride_x = CELL_WIDTH + GRID;
        let stride_y = CELL_HEIGHT + GRID;
        if dx % stride_x >= CELL_WIDTH || dy % stride_y >= CELL_HEIGHT {
            return None;
        }
        Position::from_coords((dy / stride_y) as usize, (dx / stride_x) as usize)
    }

    /// Whether the terminal column lies on a vertical grid line.
    pub fn is_vertical_line(&self, column: u16) -> bool {
        column >= self.area.x && (column - self.area.x) % (CELL_WIDTH + GRID) == CELL_WIDTH
    }

    /// Whether the terminal row lies on a horizontal grid line.
    pub fn is_horizontal_line(&self, row: u16) -> bool {
        row >= self.area.y && (row - self.area.y) % (CELL_HEIGHT + GRID) == CELL_HEIGHT
    }
}
