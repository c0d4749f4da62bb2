//! Core domain types for Spelling Bee puzzles
//!
//! Pure, synchronous types with no I/O: letter normalization, the allowed
//! letter set, and the validated puzzle.

mod letters;
mod puzzle;

pub use letters::{AllowedSet, normalize_letters, sanitize_for_lookup};
pub use puzzle::{OUTER_LETTERS, PUZZLE_LETTERS, PuzzleSpec};
