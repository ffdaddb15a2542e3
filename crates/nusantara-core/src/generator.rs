use crate::{Difficulty, FixedMask, Position, PuzzleGrid, SolutionGrid};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A freshly generated puzzle together with its solution and given mask.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: PuzzleGrid,
    pub solution: SolutionGrid,
    pub fixed: FixedMask,
}

/// Randomized backtracking puzzle generator.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded generator for reproducible puzzles.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce a solved grid and carve it down to the tier's given count.
    pub fn generate(&mut self, difficulty: Difficulty) -> GeneratedPuzzle {
        let solution = self.fill_grid();
        let (puzzle, fixed) = self.carve(&solution, difficulty);
        GeneratedPuzzle {
            puzzle,
            solution,
            fixed,
        }
    }

    /// Zero `difficulty.removed_cells()` uniformly random cells of a copy of
    /// the solution. No uniqueness check is made; the carved puzzle may admit
    /// more than one solution.
    ///
    /// Public so a session reset can re-carve from its existing solution.
    pub fn carve(
        &mut self,
        solution: &SolutionGrid,
        difficulty: Difficulty,
    ) -> (PuzzleGrid, FixedMask) {
        let mut cells = [[0u8; 9]; 9];
        for pos in Position::all() {
            cells[pos.row][pos.col] = solution.get(pos);
        }

        // Bounded: the removal target is always below 81.
        let mut removed = 0;
        while removed < difficulty.removed_cells() {
            let row = self.rng.gen_range(0..9);
            let col = self.rng.gen_range(0..9);
            if cells[row][col] != 0 {
                cells[row][col] = 0;
                removed += 1;
            }
        }

        let puzzle = PuzzleGrid::from_cells(cells);
        let fixed = FixedMask::from_puzzle(&puzzle);
        (puzzle, fixed)
    }

    /// Fill an empty grid by backtracking over cells in row-major order,
    /// trying digits in a freshly shuffled order at each cell. Exhaustive,
    /// so it always terminates with a complete valid grid.
    fn fill_grid(&mut self) -> SolutionGrid {
        let mut cells = [[0u8; 9]; 9];
        let filled = self.fill_from(&mut cells);
        debug_assert!(filled);
        SolutionGrid::from_cells(cells)
    }

    fn fill_from(&mut self, cells: &mut [[u8; 9]; 9]) -> bool {
        let Some((row, col)) = first_empty(cells) else {
            return true;
        };

        let mut digits: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        digits.shuffle(&mut self.rng);

        for digit in digits {
            if placement_legal(cells, row, col, digit) {
                cells[row][col] = digit;
                if self.fill_from(cells) {
                    return true;
                }
                cells[row][col] = 0;
            }
        }
        false
    }
}

fn first_empty(cells: &[[u8; 9]; 9]) -> Option<(usize, usize)> {
    for (row, row_cells) in cells.iter().enumerate() {
        for (col, &cell) in row_cells.iter().enumerate() {
            if cell == 0 {
                return Some((row, col));
            }
        }
    }
    None
}

/// A digit is legal when absent from the cell's row, column, and box.
fn placement_legal(cells: &[[u8; 9]; 9], row: usize, col: usize, digit: u8) -> bool {
    for x in 0..9 {
        if cells[row][x] == digit || cells[x][col] == digit {
            return false;
        }
    }
    let box_row = (row / 3) * 3;
    let box_col = (col / 3) * 3;
    for r in box_row..box_row + 3 {
        for c in box_col..box_col + 3 {
            if cells[r][c] == digit {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid_is_a_valid_solution() {
        let mut generator = Generator::with_seed(42);
        let generated = generator.generate(Difficulty::Jawa);
        assert!(generated.solution.is_valid());
    }

    #[test]
    fn carve_counts_match_every_tier() {
        let mut generator = Generator::with_seed(7);
        for difficulty in Difficulty::all() {
            let generated = generator.generate(difficulty);
            assert_eq!(generated.puzzle.filled_count(), difficulty.given_cells());
            assert_eq!(generated.fixed.fixed_count(), difficulty.given_cells());
        }
    }

    #[test]
    fn givens_agree_with_solution() {
        let mut generator = Generator::with_seed(99);
        let generated = generator.generate(Difficulty::Papua);
        for pos in Position::all() {
            let value = generated.puzzle.get(pos);
            if value != 0 {
                assert_eq!(value, generated.solution.get(pos));
                assert!(generated.fixed.is_fixed(pos));
            } else {
                assert!(!generated.fixed.is_fixed(pos));
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = Generator::with_seed(123).generate(Difficulty::Bali);
        let b = Generator::with_seed(123).generate(Difficulty::Bali);
        assert_eq!(a.solution, b.solution);
        assert_eq!(a.puzzle, b.puzzle);
    }

    #[test]
    fn recarve_keeps_the_same_solution() {
        let mut generator = Generator::with_seed(5);
        let generated = generator.generate(Difficulty::Jawa);

        let (puzzle, fixed) = generator.carve(&generated.solution, Difficulty::Jawa);
        assert_eq!(puzzle.filled_count(), Difficulty::Jawa.given_cells());
        assert_eq!(fixed.fixed_count(), Difficulty::Jawa.given_cells());
        for pos in Position::all() {
            if puzzle.get(pos) != 0 {
                assert_eq!(puzzle.get(pos), generated.solution.get(pos));
            }
        }
    }
}
