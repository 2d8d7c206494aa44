//! Directional run scanning around a cell.
//!
//! Two scan modes share one walker. [`ScanMode::Immediate`] only follows
//! tokens of the target player and is what decides whether a placement won.
//! [`ScanMode::Speculative`] also walks through empty cells, counting them as
//! open, and is what the position evaluator feeds on.

use super::board::{Board, Cell, Placement};
use super::Player;

/// Tokens in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Cells visited past the origin in each direction.
pub const MAX_STEPS: usize = WIN_LENGTH - 1;

/// Signed unit step on the grid. Positive `dr` moves down, positive `dc`
/// moves right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: isize,
    pub dc: isize,
}

impl Direction {
    const fn new(dr: isize, dc: isize) -> Self {
        Direction { dr, dc }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right (\)
    DiagonalDown,
    /// Bottom-left to top-right (/)
    DiagonalUp,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDown,
        Axis::DiagonalUp,
    ];

    /// The two opposite unit directions of this axis, forward first.
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::new(0, 1), Direction::new(0, -1)],
            Axis::Vertical => [Direction::new(1, 0), Direction::new(-1, 0)],
            Axis::DiagonalDown => [Direction::new(1, 1), Direction::new(-1, -1)],
            Axis::DiagonalUp => [Direction::new(-1, 1), Direction::new(1, -1)],
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
            Axis::DiagonalDown => "diagonal-down",
            Axis::DiagonalUp => "diagonal-up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Stop at the first cell not owned by the target player.
    Immediate,
    /// Walk through empty cells, stop only at an opposing token or the edge.
    Speculative,
}

/// Outcome of walking one direction from an origin cell. The origin itself
/// is never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Target-player tokens met.
    pub matched: usize,
    /// Empty cells met (speculative mode only).
    pub open: usize,
    /// Sum of the matched tokens' grid values.
    pub value: i32,
}

impl RunResult {
    /// Whether the line from the origin can still grow to [`WIN_LENGTH`].
    pub fn has_room(&self) -> bool {
        self.matched + self.open >= MAX_STEPS
    }

    fn merge(self, other: RunResult) -> RunResult {
        RunResult {
            matched: self.matched + other.matched,
            open: self.open + other.open,
            value: self.value + other.value,
        }
    }
}

/// Both directions of one axis. `None` marks a direction that points off the
/// board from the origin and was never scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScan {
    pub axis: Axis,
    pub forward: Option<RunResult>,
    pub backward: Option<RunResult>,
}

impl AxisScan {
    /// Scanned directions, forward first.
    pub fn runs(&self) -> impl Iterator<Item = RunResult> {
        self.forward.into_iter().chain(self.backward)
    }

    pub fn combined(&self) -> RunResult {
        self.runs().fold(RunResult::default(), RunResult::merge)
    }

    /// Contiguous target tokens along the axis, origin included.
    pub fn line_length(&self) -> usize {
        self.combined().matched + 1
    }
}

/// Result of checking a placement for a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinOutcome {
    /// Axis that completed the line. When several axes complete at once the
    /// first in [`Axis::ALL`] order is reported.
    pub axis: Option<Axis>,
}

impl WinOutcome {
    pub fn is_win(&self) -> bool {
        self.axis.is_some()
    }
}

/// Walk up to [`MAX_STEPS`] cells from `(row, col)` along `dir`.
pub fn scan_direction(
    board: &Board,
    row: usize,
    col: usize,
    dir: Direction,
    player: Player,
    mode: ScanMode,
) -> Option<RunResult> {
    let mut r = row as isize + dir.dr;
    let mut c = col as isize + dir.dc;
    if !board.in_bounds(r, c) {
        return None;
    }

    let target = player.to_cell();
    let mut run = RunResult::default();
    for _ in 0..MAX_STEPS {
        match board.cell_at(r, c) {
            Some(cell) if cell == target => {
                run.matched += 1;
                run.value += i32::from(cell.value());
            }
            Some(Cell::Empty) if mode == ScanMode::Speculative => run.open += 1,
            _ => break,
        }
        r += dir.dr;
        c += dir.dc;
    }

    Some(run)
}

/// Scan all four axes through `(row, col)` on behalf of `player`.
pub fn scan(board: &Board, row: usize, col: usize, player: Player, mode: ScanMode) -> [AxisScan; 4] {
    Axis::ALL.map(|axis| {
        let [forward, backward] = axis.directions();
        AxisScan {
            axis,
            forward: scan_direction(board, row, col, forward, player, mode),
            backward: scan_direction(board, row, col, backward, player, mode),
        }
    })
}

/// Check whether `placement` completed a line for its player.
pub fn check_win(board: &Board, placement: Placement) -> WinOutcome {
    debug_assert_eq!(
        board.get(placement.row, placement.col),
        placement.player.to_cell(),
        "placement does not match the board"
    );

    let axis = scan(board, placement.row, placement.col, placement.player, ScanMode::Immediate)
        .into_iter()
        .find(|axis_scan| axis_scan.line_length() >= WIN_LENGTH)
        .map(|axis_scan| axis_scan.axis);

    WinOutcome { axis }
}
