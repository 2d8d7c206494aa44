use std::path::Path;
use std::sync::Arc;

use crate::error::TableError;
use crate::game::win::{self, RunResult, ScanMode};
use crate::game::{Board, Player};

/// Scores a position. Positive values favour Red, negative values favour
/// Yellow.
pub trait Evaluator: Send {
    fn evaluate(&self, board: &Board) -> f64;

    fn name(&self) -> &str;

    /// Whether this evaluator can score a `rows` x `cols` board.
    fn fits(&self, _rows: usize, _cols: usize) -> bool {
        true
    }
}

/// Rewards open lines through every occupied cell, weighting each line
/// exponentially by how many of its tokens are already in place.
///
/// A direction with `m` matched tokens and `f` open cells contributes
/// `10^(m+1) + f`, provided the line can still reach four tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthEvaluator;

impl RunLengthEvaluator {
    pub fn contribution(run: &RunResult) -> u64 {
        if !run.has_room() {
            return 0;
        }
        10u64.pow(run.matched as u32 + 1) + run.open as u64
    }

    /// Summed contribution of every scanned direction from `(row, col)` for
    /// `player`.
    pub fn cell_score(board: &Board, row: usize, col: usize, player: Player) -> u64 {
        win::scan(board, row, col, player, ScanMode::Speculative)
            .iter()
            .flat_map(|axis_scan| axis_scan.runs())
            .map(|run| Self::contribution(&run))
            .sum()
    }
}

impl Evaluator for RunLengthEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        let mut red = 0u64;
        let mut yellow = 0u64;
        for (row, col, player) in board.occupied() {
            let score = Self::cell_score(board, row, col, player);
            match player {
                Player::Red => red += score,
                Player::Yellow => yellow += score,
            }
        }
        red as f64 - yellow as f64
    }

    fn name(&self) -> &str {
        "run-length"
    }
}

/// Per-cell weights supplied from outside, e.g. normalised win participation
/// counts from earlier games. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbabilityTable {
    pub rows: usize,
    pub cols: usize,
    /// Row-major weights, `rows * cols` entries.
    pub p: Vec<f64>,
}

impl ProbabilityTable {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let table: ProbabilityTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let expected = self.rows * self.cols;
        if self.p.len() != expected {
            return Err(TableError::ShapeMismatch {
                rows: self.rows,
                cols: self.cols,
                expected,
                actual: self.p.len(),
            });
        }
        if let Some(idx) = self.p.iter().position(|w| !w.is_finite()) {
            return Err(TableError::NonFinite(idx));
        }
        Ok(())
    }

    /// Weight of `(row, col)`, `None` outside the table.
    pub fn weight(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.p.get(row * self.cols + col).copied()
    }

    pub fn check_dimensions(&self, rows: usize, cols: usize) -> Result<(), TableError> {
        if self.rows != rows || self.cols != cols {
            return Err(TableError::DimensionMismatch {
                table_rows: self.rows,
                table_cols: self.cols,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

/// Sums table weights of Red's cells minus those of Yellow's cells.
///
/// Only scores boards of the table's own size: [`Game`](crate::engine::Game)
/// refuses an evaluator whose [`Evaluator::fits`] is false, and cells outside
/// the table count as zero.
#[derive(Debug, Clone)]
pub struct TableEvaluator {
    table: Arc<ProbabilityTable>,
}

impl TableEvaluator {
    /// Wrap `table` for a `rows` x `cols` board.
    pub fn for_board(
        table: Arc<ProbabilityTable>,
        rows: usize,
        cols: usize,
    ) -> Result<Self, TableError> {
        table.check_dimensions(rows, cols)?;
        Ok(TableEvaluator { table })
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }
}

impl Evaluator for TableEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        board
            .occupied()
            .filter_map(|(row, col, player)| {
                self.table
                    .weight(row, col)
                    .map(|w| f64::from(player.sign()) * w)
            })
            .sum()
    }

    fn name(&self) -> &str {
        "table"
    }

    fn fits(&self, rows: usize, cols: usize) -> bool {
        self.table.rows == rows && self.table.cols == cols
    }
}
