use crate::{
    Difficulty, FixedMask, GeneratedPuzzle, Generator, Position, PuzzleGrid, SolutionGrid,
};
use std::collections::{BTreeSet, HashMap};

/// Wrong placements allowed before the session ends in a loss.
pub const MAX_ERRORS: usize = 3;
/// Hints available per session.
pub const STARTING_HINTS: usize = 3;

/// How digit input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Notes,
}

/// Session lifecycle. The paused flag is tracked separately and only
/// matters while the session is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

/// What a `place` call did, for the frontend to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Precondition failed: paused, session over, nothing selected, or a
    /// fixed cell. Nothing changed.
    Rejected,
    /// Notes mode: membership of the digit in the cell's note set toggled.
    NoteToggled,
    /// Digit 0: the cell value and its notes were cleared.
    Cleared,
    Placed { correct: bool },
    /// The grid is full and matches the solution.
    Won,
    /// The error limit was reached.
    Lost,
}

/// What a hint request did. The refusal variants carry enough for an
/// advisory message; none of them change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    NoHintsLeft,
    NoSelection,
    Paused,
    Ended,
    FixedCell,
    Applied { pos: Position, won: bool },
}

/// Units completed by the most recent placement. Drives a transient visual
/// flash only; never feeds back into game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionFlash {
    pub row: bool,
    pub col: bool,
    pub block: bool,
}

impl CompletionFlash {
    pub fn any(self) -> bool {
        self.row || self.col || self.block
    }
}

/// One Sudoku session: the mutable puzzle, its immutable solution, sparse
/// per-cell notes, and the play counters.
pub struct Game {
    puzzle: PuzzleGrid,
    solution: SolutionGrid,
    fixed: FixedMask,
    notes: HashMap<Position, BTreeSet<u8>>,
    difficulty: Difficulty,
    selected: Option<Position>,
    mode: InputMode,
    status: GameStatus,
    paused: bool,
    errors: usize,
    hints_left: usize,
    elapsed_secs: u64,
}

impl Game {
    /// Start a session at the given tier with a freshly generated puzzle.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(&mut Generator::new(), difficulty)
    }

    /// Start a session using the caller's generator (seeded in tests).
    pub fn with_generator(generator: &mut Generator, difficulty: Difficulty) -> Self {
        let GeneratedPuzzle {
            puzzle,
            solution,
            fixed,
        } = generator.generate(difficulty);
        Self::from_parts(puzzle, solution, fixed, difficulty)
    }

    fn from_parts(
        puzzle: PuzzleGrid,
        solution: SolutionGrid,
        fixed: FixedMask,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            puzzle,
            solution,
            fixed,
            notes: HashMap::new(),
            difficulty,
            selected: None,
            mode: InputMode::Normal,
            status: GameStatus::NotStarted,
            paused: false,
            errors: 0,
            hints_left: STARTING_HINTS,
            elapsed_secs: 0,
        }
    }

    /// Select a cell. The first select, place, or hint starts the session.
    pub fn select(&mut self, pos: Position) {
        if self.paused || self.is_over() {
            return;
        }
        self.selected = Some(pos);
        self.mark_started();
    }

    /// Place `digit` in the selected cell; 0 clears it. In notes mode a
    /// non-zero digit toggles the cell's note set instead of writing the
    /// grid.
    pub fn place(&mut self, digit: u8) -> PlaceOutcome {
        debug_assert!(digit <= 9);
        if self.paused || self.is_over() {
            return PlaceOutcome::Rejected;
        }
        let Some(pos) = self.selected else {
            return PlaceOutcome::Rejected;
        };
        if self.fixed.is_fixed(pos) {
            return PlaceOutcome::Rejected;
        }
        self.mark_started();

        if self.mode == InputMode::Notes && digit != 0 {
            let entry = self.notes.entry(pos).or_default();
            if !entry.insert(digit) {
                entry.remove(&digit);
            }
            if entry.is_empty() {
                self.notes.remove(&pos);
            }
            return PlaceOutcome::NoteToggled;
        }

        self.notes.remove(&pos);
        self.puzzle.set(pos, digit);

        if digit == 0 {
            return PlaceOutcome::Cleared;
        }

        if digit != self.solution.get(pos) {
            self.errors += 1;
            if self.errors >= MAX_ERRORS {
                self.status = GameStatus::Lost;
                return PlaceOutcome::Lost;
            }
            return PlaceOutcome::Placed { correct: false };
        }

        if self.puzzle.matches(&self.solution) {
            self.status = GameStatus::Won;
            return PlaceOutcome::Won;
        }
        PlaceOutcome::Placed { correct: true }
    }

    /// Reveal the solution digit in the selected cell, spending one hint.
    pub fn hint(&mut self) -> HintOutcome {
        if self.is_over() {
            return HintOutcome::Ended;
        }
        if self.paused {
            return HintOutcome::Paused;
        }
        if self.hints_left == 0 {
            return HintOutcome::NoHintsLeft;
        }
        let Some(pos) = self.selected else {
            return HintOutcome::NoSelection;
        };
        if self.fixed.is_fixed(pos) {
            return HintOutcome::FixedCell;
        }
        self.mark_started();

        self.hints_left -= 1;
        self.notes.remove(&pos);
        self.puzzle.set(pos, self.solution.get(pos));

        let won = self.puzzle.matches(&self.solution);
        if won {
            self.status = GameStatus::Won;
        }
        HintOutcome::Applied { pos, won }
    }

    /// Per-unit completion of the cell's row, column, and box. A unit with
    /// any empty cell never counts.
    pub fn completion_flash(&self, pos: Position) -> CompletionFlash {
        CompletionFlash {
            row: self.row_complete(pos.row),
            col: self.col_complete(pos.col),
            block: self.block_complete(pos),
        }
    }

    pub fn row_complete(&self, row: usize) -> bool {
        (0..9).all(|col| self.cell_solved(Position::new(row, col)))
    }

    pub fn col_complete(&self, col: usize) -> bool {
        (0..9).all(|row| self.cell_solved(Position::new(row, col)))
    }

    pub fn block_complete(&self, pos: Position) -> bool {
        let origin = pos.box_origin();
        (0..3).all(|dr| {
            (0..3).all(|dc| self.cell_solved(Position::new(origin.row + dr, origin.col + dc)))
        })
    }

    fn cell_solved(&self, pos: Position) -> bool {
        let v = self.puzzle.get(pos);
        v != 0 && v == self.solution.get(pos)
    }

    /// Restore the session to a just-generated state for the current tier.
    /// The solution is kept; the blank pattern is re-randomized rather than
    /// restored, matching the original game's observed behavior.
    pub fn reset(&mut self) {
        let (puzzle, fixed) = Generator::new().carve(&self.solution, self.difficulty);
        self.puzzle = puzzle;
        self.fixed = fixed;
        self.notes.clear();
        self.selected = None;
        self.status = GameStatus::NotStarted;
        self.paused = false;
        self.errors = 0;
        self.hints_left = STARTING_HINTS;
        self.elapsed_secs = 0;
    }

    /// Advance the session clock by one second. Inert before the first
    /// interaction, while paused, and after the session ends.
    pub fn tick(&mut self) {
        if self.status == GameStatus::InProgress && !self.paused {
            self.elapsed_secs += 1;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_over() {
            return;
        }
        self.paused = !self.paused;
    }

    pub fn toggle_notes_mode(&mut self) {
        if self.is_over() {
            return;
        }
        self.mode = match self.mode {
            InputMode::Normal => InputMode::Notes,
            InputMode::Notes => InputMode::Normal,
        };
    }

    fn mark_started(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::InProgress;
        }
    }

    // Read access for the render collaborator.

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Won | GameStatus::Lost)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn hints_left(&self) -> usize {
        self.hints_left
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn value(&self, pos: Position) -> u8 {
        self.puzzle.get(pos)
    }

    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed.is_fixed(pos)
    }

    /// A non-zero cell that disagrees with the solution.
    pub fn is_wrong(&self, pos: Position) -> bool {
        let v = self.puzzle.get(pos);
        v != 0 && v != self.solution.get(pos)
    }

    pub fn notes(&self, pos: Position) -> Option<&BTreeSet<u8>> {
        self.notes.get(&pos)
    }

    pub fn puzzle(&self) -> &PuzzleGrid {
        &self.puzzle
    }

    pub fn solution(&self) -> &SolutionGrid {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_solution() -> SolutionGrid {
        SolutionGrid::from_cells([
            [1, 2, 3, 4, 5, 6, 7, 8, 9],
            [4, 5, 6, 7, 8, 9, 1, 2, 3],
            [7, 8, 9, 1, 2, 3, 4, 5, 6],
            [2, 3, 1, 5, 6, 4, 8, 9, 7],
            [5, 6, 4, 8, 9, 7, 2, 3, 1],
            [8, 9, 7, 2, 3, 1, 5, 6, 4],
            [3, 1, 2, 6, 4, 5, 9, 7, 8],
            [6, 4, 5, 9, 7, 8, 3, 1, 2],
            [9, 7, 8, 3, 1, 2, 6, 4, 5],
        ])
    }

    /// A game whose puzzle equals the solution except at the given cells.
    fn game_with_empties(empties: &[Position]) -> Game {
        let solution = sample_solution();
        assert!(solution.is_valid());

        let mut cells = [[0u8; 9]; 9];
        for pos in Position::all() {
            cells[pos.row][pos.col] = solution.get(pos);
        }
        for &pos in empties {
            cells[pos.row][pos.col] = 0;
        }
        let puzzle = PuzzleGrid::from_cells(cells);
        let fixed = FixedMask::from_puzzle(&puzzle);
        Game::from_parts(puzzle, solution, fixed, Difficulty::Jawa)
    }

    #[test]
    fn correct_digit_in_last_empty_cell_wins() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos]);

        game.select(pos);
        assert_eq!(game.place(1), PlaceOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.errors(), 0);
    }

    #[test]
    fn third_wrong_digit_loses_and_freezes_the_session() {
        let pos = Position::new(0, 0);
        let other = Position::new(4, 4);
        let mut game = game_with_empties(&[pos, other]);
        game.select(pos);

        // Correct digit is 1; everything else is an error.
        assert_eq!(game.place(2), PlaceOutcome::Placed { correct: false });
        assert_eq!(game.place(3), PlaceOutcome::Placed { correct: false });
        assert_eq!(game.place(4), PlaceOutcome::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.errors(), MAX_ERRORS);

        // Nothing mutates after the loss.
        assert_eq!(game.place(1), PlaceOutcome::Rejected);
        assert_eq!(game.hint(), HintOutcome::Ended);
        assert_eq!(game.value(pos), 4);
        assert_eq!(game.value(other), 0);
        assert_eq!(game.hints_left(), STARTING_HINTS);
    }

    #[test]
    fn place_zero_clears_value_and_notes() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos]);

        game.select(pos);
        game.toggle_notes_mode();
        assert_eq!(game.place(5), PlaceOutcome::NoteToggled);
        game.toggle_notes_mode();

        assert_eq!(game.place(2), PlaceOutcome::Placed { correct: false });
        assert_eq!(game.place(0), PlaceOutcome::Cleared);
        assert_eq!(game.value(pos), 0);
        assert!(game.notes(pos).is_none());
    }

    #[test]
    fn placing_a_digit_clears_the_note_set() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos, Position::new(8, 8)]);

        game.select(pos);
        game.toggle_notes_mode();
        for digit in [2, 5, 7] {
            assert_eq!(game.place(digit), PlaceOutcome::NoteToggled);
        }
        assert_eq!(
            game.notes(pos).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2, 5, 7]
        );

        // Toggling an existing note removes it.
        assert_eq!(game.place(5), PlaceOutcome::NoteToggled);
        assert_eq!(game.notes(pos).unwrap().len(), 2);

        game.toggle_notes_mode();
        assert_eq!(game.place(1), PlaceOutcome::Placed { correct: true });
        assert!(game.notes(pos).is_none());
    }

    #[test]
    fn notes_never_write_for_digit_zero() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos, Position::new(8, 8)]);

        game.select(pos);
        game.toggle_notes_mode();
        assert_eq!(game.place(3), PlaceOutcome::NoteToggled);
        // 0 in notes mode behaves as a clear, not a note.
        assert_eq!(game.place(0), PlaceOutcome::Cleared);
        assert!(game.notes(pos).is_none());
        assert_eq!(game.value(pos), 0);
    }

    #[test]
    fn hint_on_fixed_cell_changes_nothing() {
        let empty = Position::new(0, 0);
        let fixed = Position::new(0, 1);
        let mut game = game_with_empties(&[empty]);

        game.select(fixed);
        assert_eq!(game.hint(), HintOutcome::FixedCell);
        assert_eq!(game.hints_left(), STARTING_HINTS);
        assert_eq!(game.value(fixed), 2);
        assert_eq!(game.value(empty), 0);
    }

    #[test]
    fn hint_fills_the_cell_and_can_win() {
        let pos = Position::new(3, 3);
        let mut game = game_with_empties(&[pos]);

        game.select(pos);
        assert_eq!(game.hint(), HintOutcome::Applied { pos, won: true });
        assert_eq!(game.value(pos), 5);
        assert_eq!(game.hints_left(), STARTING_HINTS - 1);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn hints_run_out() {
        let empties = [
            Position::new(0, 0),
            Position::new(1, 1),
            Position::new(2, 2),
            Position::new(3, 3),
        ];
        let mut game = game_with_empties(&empties);

        for &pos in &empties[..3] {
            game.select(pos);
            assert!(matches!(game.hint(), HintOutcome::Applied { won: false, .. }));
        }
        game.select(empties[3]);
        assert_eq!(game.hint(), HintOutcome::NoHintsLeft);
        assert_eq!(game.value(empties[3]), 0);
    }

    #[test]
    fn hint_without_selection_is_refused() {
        let mut game = game_with_empties(&[Position::new(0, 0)]);
        assert_eq!(game.hint(), HintOutcome::NoSelection);
        assert_eq!(game.hints_left(), STARTING_HINTS);
    }

    #[test]
    fn paused_session_ignores_input_and_time() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos, Position::new(8, 8)]);

        game.select(pos);
        game.tick();
        assert_eq!(game.elapsed_secs(), 1);

        game.toggle_pause();
        game.tick();
        assert_eq!(game.elapsed_secs(), 1);
        assert_eq!(game.place(1), PlaceOutcome::Rejected);
        assert_eq!(game.hint(), HintOutcome::Paused);
        game.select(Position::new(8, 8));
        assert_eq!(game.selected(), Some(pos));

        game.toggle_pause();
        game.tick();
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn clock_waits_for_the_first_interaction() {
        let mut game = game_with_empties(&[Position::new(0, 0)]);
        game.tick();
        game.tick();
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.status(), GameStatus::NotStarted);

        game.select(Position::new(0, 0));
        assert_eq!(game.status(), GameStatus::InProgress);
        game.tick();
        assert_eq!(game.elapsed_secs(), 1);
    }

    #[test]
    fn placing_on_a_fixed_cell_is_rejected() {
        let mut game = game_with_empties(&[Position::new(8, 8)]);
        let fixed = Position::new(0, 0);

        game.select(fixed);
        assert_eq!(game.place(9), PlaceOutcome::Rejected);
        assert_eq!(game.value(fixed), 1);
        assert_eq!(game.errors(), 0);
    }

    #[test]
    fn completion_flash_is_false_with_a_zero_in_the_unit() {
        let pos = Position::new(0, 0);
        let game = game_with_empties(&[pos]);

        let flash = game.completion_flash(pos);
        assert!(!flash.row);
        assert!(!flash.col);
        assert!(!flash.block);
        assert!(!flash.any());

        // Units not containing the empty cell are complete.
        assert!(game.row_complete(8));
        assert!(game.col_complete(8));
        assert!(game.block_complete(Position::new(4, 4)));
    }

    #[test]
    fn completion_flash_fires_after_the_closing_placement() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos]);

        game.select(pos);
        game.place(1);
        let flash = game.completion_flash(pos);
        assert!(flash.row && flash.col && flash.block);
    }

    #[test]
    fn wrong_value_does_not_complete_a_unit() {
        let pos = Position::new(0, 0);
        let mut game = game_with_empties(&[pos, Position::new(8, 8)]);

        game.select(pos);
        game.place(2);
        assert!(!game.row_complete(0));
        assert!(game.is_wrong(pos));
    }

    #[test]
    fn filling_all_empties_with_solution_digits_wins() {
        let mut generator = Generator::with_seed(2024);
        let mut game = Game::with_generator(&mut generator, Difficulty::Jawa);
        assert_eq!(game.puzzle().filled_count(), 40);

        let solution = game.solution().clone();
        let empties: Vec<Position> = Position::all().filter(|&p| game.value(p) == 0).collect();
        let last = *empties.last().unwrap();

        for pos in empties {
            game.select(pos);
            let outcome = game.place(solution.get(pos));
            if pos == last {
                assert_eq!(outcome, PlaceOutcome::Won);
            } else {
                assert_eq!(outcome, PlaceOutcome::Placed { correct: true });
            }
        }
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.errors(), 0);
    }

    #[test]
    fn reset_recarves_from_the_same_solution() {
        let mut generator = Generator::with_seed(17);
        let mut game = Game::with_generator(&mut generator, Difficulty::Bali);
        let solution = game.solution().clone();

        let empty = Position::all().find(|&p| game.value(p) == 0).unwrap();
        game.select(empty);
        game.toggle_notes_mode();
        game.place(4);
        game.toggle_notes_mode();
        game.place(solution.get(empty) % 9 + 1);
        game.tick();

        game.reset();
        assert_eq!(game.solution(), &solution);
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.errors(), 0);
        assert_eq!(game.hints_left(), STARTING_HINTS);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.selected(), None);
        assert!(!game.is_paused());
        assert_eq!(game.puzzle().filled_count(), Difficulty::Bali.given_cells());
        for pos in Position::all() {
            let v = game.value(pos);
            assert!(v == 0 || v == solution.get(pos));
            assert_eq!(game.is_fixed(pos), v != 0);
        }
    }
}
