//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the player whose mark is in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Player::X) => 'X',
            Cell::Occupied(Player::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// A plain value: copying a board is as cheap as copying nine bytes, so the
/// search and the state machine both hand boards around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Returns a copy of this board with `cell` written at `pos`.
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.set(pos, cell);
        self
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| c.owner() == Some(player))
            .count()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].symbol())?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from compact notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, `.`, `_`, `/` or whitespace.
    #[display("Unexpected character {:?} in board", _0)]
    UnexpectedChar(char),

    /// The notation did not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongCellCount(usize),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses compact notation such as `"XX./OO./..."` or `"X X . / O O . / . . ."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for ch in s.chars() {
            match ch {
                'X' | 'x' => cells.push(Cell::Occupied(Player::X)),
                'O' | 'o' => cells.push(Cell::Occupied(Player::O)),
                '.' | '_' => cells.push(Cell::Empty),
                '/' => {}
                c if c.is_whitespace() => {}
                c => return Err(BoardParseError::UnexpectedChar(c)),
            }
        }

        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| BoardParseError::WrongCellCount(v.len()))?;
        Ok(Self { cells })
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
