//! Main puzzle solver interface

use super::rank::solve;
use crate::core::PuzzleSpec;
use crate::error::ValidationError;

/// Solver bound to a single validated puzzle
///
/// Holds no word list of its own; every call recomputes the full ranking from
/// the list it is given.
#[derive(Debug, Clone)]
pub struct Solver {
    spec: PuzzleSpec,
}

impl Solver {
    #[must_use]
    pub const fn new(spec: PuzzleSpec) -> Self {
        Self { spec }
    }

    /// Validate raw input and build a solver for it
    ///
    /// # Errors
    /// Returns the `ValidationError` from [`PuzzleSpec::validate`].
    pub fn from_input(outer_raw: &str, center_raw: &str) -> Result<Self, ValidationError> {
        PuzzleSpec::validate(outer_raw, center_raw).map(Self::new)
    }

    #[must_use]
    pub const fn spec(&self) -> &PuzzleSpec {
        &self.spec
    }

    /// Ranked answers found in the word list
    #[must_use]
    pub fn solve(&self, words: &[String]) -> Vec<String> {
        solve(&self.spec, words)
    }

    /// Count answers without keeping them
    #[must_use]
    pub fn count(&self, words: &[String]) -> usize {
        let allowed = self.spec.allowed();
        let center = self.spec.center();
        words
            .iter()
            .filter(|w| super::is_allowed_word(w.trim(), allowed, center))
            .count()
    }
}
