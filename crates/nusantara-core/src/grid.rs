use serde::{Deserialize, Serialize};

/// A cell coordinate on the 9x9 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).flat_map(|row| (0..9).map(move |col| Position::new(row, col)))
    }

    /// Index of the containing 3x3 box (0..9, row-major).
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Top-left corner of the containing 3x3 box.
    pub fn box_origin(&self) -> Position {
        Position::new((self.row / 3) * 3, (self.col / 3) * 3)
    }
}

/// A complete, valid solution: digits 1-9 in every cell.
///
/// Built once per session by the generator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionGrid {
    cells: [[u8; 9]; 9],
}

impl SolutionGrid {
    pub(crate) fn from_cells(cells: [[u8; 9]; 9]) -> Self {
        Self { cells }
    }

    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Check the Sudoku invariant: every row, column, and box holds each
    /// digit 1-9 exactly once.
    pub fn is_valid(&self) -> bool {
        fn unit_ok(digits: [u8; 9]) -> bool {
            let mut seen = [false; 10];
            for d in digits {
                if !(1..=9).contains(&d) || seen[d as usize] {
                    return false;
                }
                seen[d as usize] = true;
            }
            true
        }

        for i in 0..9 {
            let row = self.cells[i];
            let col = std::array::from_fn(|r| self.cells[r][i]);
            let box_row = (i / 3) * 3;
            let box_col = (i % 3) * 3;
            let block = std::array::from_fn(|j| self.cells[box_row + j / 3][box_col + j % 3]);
            if !unit_ok(row) || !unit_ok(col) || !unit_ok(block) {
                return false;
            }
        }
        true
    }
}

/// The playable grid: 0 marks an empty cell.
///
/// May legitimately hold values that disagree with the solution; those are
/// the player's mistakes, not corruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleGrid {
    cells: [[u8; 9]; 9],
}

impl PuzzleGrid {
    pub(crate) fn from_cells(cells: [[u8; 9]; 9]) -> Self {
        Self { cells }
    }

    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, digit: u8) {
        debug_assert!(digit <= 9);
        self.cells[pos.row][pos.col] = digit;
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == 0
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&d| d != 0).count()
    }

    pub fn is_filled(&self) -> bool {
        self.filled_count() == 81
    }

    /// True when every cell agrees with the solution (which implies the
    /// grid is fully filled, since a solution has no zeros).
    pub fn matches(&self, solution: &SolutionGrid) -> bool {
        Position::all().all(|pos| self.get(pos) == solution.get(pos))
    }
}

/// Which cells were givens at carve time.
///
/// Tracked explicitly so an originally-fixed cell is never confused with one
/// the player guessed correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMask {
    fixed: [[bool; 9]; 9],
}

impl FixedMask {
    /// Derive the mask from a freshly carved puzzle: fixed means non-zero.
    pub fn from_puzzle(puzzle: &PuzzleGrid) -> Self {
        let mut fixed = [[false; 9]; 9];
        for pos in Position::all() {
            fixed[pos.row][pos.col] = !puzzle.is_empty(pos);
        }
        Self { fixed }
    }

    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed[pos.row][pos.col]
    }

    pub fn fixed_count(&self) -> usize {
        self.fixed.iter().flatten().filter(|&&f| f).count()
    }
}
