use std::fmt;

use super::Player;
use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Upper bound for either board dimension.
pub const MAX_DIMENSION: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Grid value of the cell: 0 for empty, +1 for Red, -1 for Yellow.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => -1,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }
}

/// Where an accepted move landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is out of range")]
    InvalidColumn,
    #[error("column is full")]
    ColumnFull,
    #[error("game is already over")]
    GameOver,
}

/// Gravity grid. Row 0 is the top, row `rows - 1` the bottom.
///
/// Each column keeps a fill pointer holding the row index of its next empty
/// cell. A pointer below zero marks the column as full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    fill: Box<[isize]>,
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }

        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            fill: vec![rows as isize - 1; cols].into_boxed_slice(),
        })
    }

    /// The canonical 6x7 board
    pub fn standard() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
            fill: vec![ROWS as isize - 1; COLS].into_boxed_slice(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) is off the board");
        self.cells[row * self.cols + col]
    }

    /// Signed lookup used by directional scans. `None` when off the board.
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(self.cells[row as usize * self.cols + col as usize])
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        self.cell_at(row, col).is_some()
    }

    /// Row index of the next empty cell in `col`, negative once full.
    /// `None` for a column off the board.
    pub fn fill_pointer(&self, col: usize) -> Option<isize> {
        self.fill.get(col).copied()
    }

    pub fn is_move_legal(&self, col: usize) -> bool {
        col < self.cols && self.fill[col] >= 0
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        !self.is_move_legal(col)
    }

    /// Drop a token for `player` into `col`. Rejected moves leave the board
    /// untouched.
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<Placement, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        if self.fill[col] < 0 {
            return Err(MoveError::ColumnFull);
        }

        let row = self.fill[col] as usize;
        debug_assert_eq!(self.get(row, col), Cell::Empty);
        self.cells[row * self.cols + col] = player.to_cell();
        self.fill[col] -= 1;

        Ok(Placement { row, col, player })
    }

    /// Columns that still accept a token, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_move_legal(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.fill.iter().all(|&pointer| pointer < 0)
    }

    /// Number of tokens placed so far
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    /// Occupied cells as `(row, col, owner)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Player)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.owner()
                .map(|player| (idx / self.cols, idx % self.cols, player))
        })
    }

    /// Read-only copy of the grid as cell values (-1, 0, 1).
    pub fn snapshot(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect()
    }

    /// Wipe all tokens and reset fill pointers
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.fill.fill(self.rows as isize - 1);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}
