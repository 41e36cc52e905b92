//! Connect-Four board representation and scanning.
//!
//! The board is a plain `6 x 7` array of `i8` cells in the framework's layout:
//! row 0 is the top, row 5 the bottom. `Board` is `Copy`, so simulations always
//! work on their own copy and never alias the caller's board.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::constants::{BOTTOM_ROW, COLS, CONNECT, EMPTY, PLAYER_ONE, PLAYER_TWO, ROWS};

/// A column index in `0..COLS`.
pub type Column = usize;

/// Raw cell grid as handed over by a driving framework.
pub type Cells = [[i8; COLS]; ROWS];

/// Which lines count as four-in-a-row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum WinRule {
    /// Horizontal and vertical lines only.
    #[default]
    Orthogonal,
    /// Horizontal, vertical and both diagonals.
    Full,
}

/// Error produced when a board cannot be built from text or raw cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown board symbol {0:?}")]
    UnknownSymbol(char),
    #[error("expected {expected} cells, found {found}", expected = ROWS * COLS)]
    CellCount { found: usize },
    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: i8 },
    #[error("piece at row {row}, column {col} is floating above an empty cell")]
    Floating { row: usize, col: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; COLS]; ROWS],
        }
    }

    /// Build a board from raw cells, checking cell values and gravity.
    pub fn from_cells(cells: Cells) -> Result<Self, BoardError> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != EMPTY && value != PLAYER_ONE && value != PLAYER_TWO {
                    return Err(BoardError::InvalidCell { row, col, value });
                }
            }
        }
        let board = Self { cells };
        board.check_gravity()?;
        Ok(board)
    }

    fn check_gravity(&self) -> Result<(), BoardError> {
        for col in 0..COLS {
            for row in 0..BOTTOM_ROW {
                if self.cells[row][col] != EMPTY && self.cells[row + 1][col] == EMPTY {
                    return Err(BoardError::Floating { row, col });
                }
            }
        }
        Ok(())
    }

    /// The raw cell grid.
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: Column) -> i8 {
        self.cells[row][col]
    }

    /// A column is playable while its top cell is empty.
    #[inline]
    pub fn is_legal(&self, col: Column) -> bool {
        col < COLS && self.cells[0][col] == EMPTY
    }

    /// Playable columns in ascending order.
    pub fn legal_columns(&self) -> Vec<Column> {
        (0..COLS).filter(|&c| self.is_legal(c)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|c| !self.is_legal(c))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY)
            .count()
    }

    /// Drop a piece into `col`. Returns the row it landed on, or `None` if the
    /// column is full (the board is left untouched).
    pub fn drop_piece(&mut self, col: Column, player: i8) -> Option<usize> {
        if !self.is_legal(col) {
            return None;
        }
        let row = (0..ROWS).rev().find(|&r| self.cells[r][col] == EMPTY)?;
        self.cells[row][col] = player;
        Some(row)
    }

    /// Copy of this board with one more piece in `col`.
    pub fn with_piece(&self, col: Column, player: i8) -> Board {
        let mut next = *self;
        next.drop_piece(col, player);
        next
    }

    /// The same position seen from the other side.
    pub fn flipped(&self) -> Board {
        let mut cells = self.cells;
        for cell in cells.iter_mut().flatten() {
            *cell = -*cell;
        }
        Board { cells }
    }

    /// Count windows of `length` consecutive cells (horizontal and vertical)
    /// all owned by `player`. Overlapping windows are counted separately.
    pub fn count_sequences(&self, player: i8, length: usize) -> u32 {
        if length == 0 || length > ROWS.max(COLS) {
            return 0;
        }
        let mut count = 0;

        if length <= COLS {
            for row in 0..ROWS {
                for col in 0..=COLS - length {
                    if (0..length).all(|i| self.cells[row][col + i] == player) {
                        count += 1;
                    }
                }
            }
        }

        if length <= ROWS {
            for row in 0..=ROWS - length {
                for col in 0..COLS {
                    if (0..length).all(|i| self.cells[row + i][col] == player) {
                        count += 1;
                    }
                }
            }
        }

        count
    }

    /// Does `player` have four in a row under `rule`?
    pub fn has_four(&self, player: i8, rule: WinRule) -> bool {
        if self.count_sequences(player, CONNECT) > 0 {
            return true;
        }
        match rule {
            WinRule::Orthogonal => false,
            WinRule::Full => self.has_diagonal_four(player),
        }
    }

    fn has_diagonal_four(&self, player: i8) -> bool {
        for row in 0..=ROWS - CONNECT {
            for col in 0..=COLS - CONNECT {
                // Down-right from (row, col), and down-left from (row, col + 3).
                if (0..CONNECT).all(|i| self.cells[row + i][col + i] == player)
                    || (0..CONNECT).all(|i| self.cells[row + i][col + CONNECT - 1 - i] == player)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Would dropping `player`'s piece into `col` win immediately?
    pub fn would_win(&self, col: Column, player: i8, rule: WinRule) -> bool {
        self.is_legal(col) && self.with_piece(col, player).has_four(player, rule)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse 42 symbols in row-major order, top row first. Whitespace and line
    /// breaks are ignored. `.` is empty, `X`/`1` is player one, `O`/`2` is
    /// player two.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(ROWS * COLS);
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let value = match ch {
                '.' => EMPTY,
                'X' | 'x' | '1' => PLAYER_ONE,
                'O' | 'o' | '2' => PLAYER_TWO,
                other => return Err(BoardError::UnknownSymbol(other)),
            };
            values.push(value);
        }
        if values.len() != ROWS * COLS {
            return Err(BoardError::CellCount { found: values.len() });
        }

        let mut cells = [[EMPTY; COLS]; ROWS];
        for (i, value) in values.into_iter().enumerate() {
            cells[i / COLS][i % COLS] = value;
        }
        Board::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (col, &cell) in row.iter().enumerate() {
                let ch = match cell {
                    PLAYER_ONE => 'X',
                    PLAYER_TWO => 'O',
                    _ => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
