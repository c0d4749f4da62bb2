//! Puzzle letters and input validation

use super::letters::{AllowedSet, normalize_letters};
use crate::error::ValidationError;
use std::fmt;

/// Number of outer letters in a puzzle
pub const OUTER_LETTERS: usize = 6;

/// Distinct letters in a valid puzzle (outer + center)
pub const PUZZLE_LETTERS: usize = OUTER_LETTERS + 1;

/// A validated puzzle: six outer letters and one mandatory center letter
///
/// Only obtainable through [`PuzzleSpec::validate`], so the seven letters are
/// always distinct lowercase ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    outer: String,
    center: char,
    allowed: AllowedSet,
}

impl PuzzleSpec {
    /// Normalize raw user input and check it describes a puzzle
    ///
    /// Checks run in order: center length, outer length, then distinctness.
    ///
    /// # Errors
    /// - `InvalidCenterLength` when the center does not normalize to one letter
    /// - `InvalidOuterLength` when the outer letters do not normalize to six
    /// - `DuplicateLetters` when the seven letters are not all distinct
    ///
    /// # Examples
    /// ```
    /// use honeycomb::core::PuzzleSpec;
    ///
    /// let spec = PuzzleSpec::validate("p i t u a r", "L").unwrap();
    /// assert_eq!(spec.outer(), "pituar");
    /// assert_eq!(spec.center(), 'l');
    ///
    /// assert!(PuzzleSpec::validate("abcdea", "f").is_err());
    /// ```
    pub fn validate(outer_raw: &str, center_raw: &str) -> Result<Self, ValidationError> {
        let outer = normalize_letters(outer_raw);
        let center = normalize_letters(center_raw);

        let mut center_chars = center.chars();
        let center_letter = match (center_chars.next(), center_chars.next()) {
            (Some(ch), None) => ch,
            _ => return Err(ValidationError::InvalidCenterLength(center.len())),
        };

        if outer.len() != OUTER_LETTERS {
            return Err(ValidationError::InvalidOuterLength(outer.len()));
        }

        let allowed = AllowedSet::from_letters(&format!("{outer}{center}"));
        if allowed.len() != PUZZLE_LETTERS {
            return Err(ValidationError::DuplicateLetters(allowed.len()));
        }

        Ok(Self {
            outer,
            center: center_letter,
            allowed,
        })
    }

    #[inline]
    #[must_use]
    pub fn outer(&self) -> &str {
        &self.outer
    }

    #[inline]
    #[must_use]
    pub const fn center(&self) -> char {
        self.center
    }

    #[inline]
    #[must_use]
    pub const fn allowed(&self) -> AllowedSet {
        self.allowed
    }
}

impl fmt::Display for PuzzleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.center, self.outer)
    }
}
