//! Core engine for Sudoku Nusantara.
//!
//! Two pieces: a randomized-backtracking [`Generator`] that produces a solved
//! grid and carves a playable puzzle out of it, and a [`Game`] session tracker
//! that owns the mutable puzzle, the immutable solution, per-cell notes, and
//! the play counters. Everything here is synchronous and free of I/O; the
//! frontend drives it with discrete events and a once-per-second [`Game::tick`].

mod difficulty;
mod game;
mod generator;
mod grid;

pub use difficulty::{CultureInfo, Difficulty};
pub use game::{
    CompletionFlash, Game, GameStatus, HintOutcome, InputMode, PlaceOutcome, MAX_ERRORS,
    STARTING_HINTS,
};
pub use generator::{GeneratedPuzzle, Generator};
pub use grid::{FixedMask, Position, PuzzleGrid, SolutionGrid};
