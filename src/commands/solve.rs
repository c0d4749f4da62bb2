//! Puzzle solving command
//!
//! Validates the raw input, loads the word list, and returns ranked answers.

use crate::core::PuzzleSpec;
use crate::error::HoneycombError;
use crate::solver::Solver;
use crate::wordlists::WordListCache;

/// Raw puzzle input as typed by the user
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub outer: String,
    pub center: String,
}

impl SolveConfig {
    pub fn new(outer: impl Into<String>, center: impl Into<String>) -> Self {
        Self {
            outer: outer.into(),
            center: center.into(),
        }
    }
}

/// Result of solving a puzzle
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub spec: PuzzleSpec,
    /// Ranked answers: longest first, alphabetical among ties
    pub words: Vec<String>,
    /// Size of the word list that was searched
    pub scanned: usize,
}

impl SolveResult {
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} word(s) found", self.words.len())
    }

    /// Answers grouped by length, longest group first
    #[must_use]
    pub fn by_length(&self) -> Vec<(usize, Vec<&str>)> {
        let mut groups: Vec<(usize, Vec<&str>)> = Vec::new();
        for word in &self.words {
            let len = word.chars().count();
            match groups.last_mut() {
                Some((group_len, members)) if *group_len == len => members.push(word.as_str()),
                _ => groups.push((len, vec![word.as_str()])),
            }
        }
        groups
    }
}

/// Solve a puzzle against the cached word list
///
/// Validation runs first, so bad input never triggers a word list load.
///
/// # Errors
///
/// Returns an error if:
/// - The input is not a valid puzzle (`HoneycombError::Validation`)
/// - The word list cannot be loaded (`HoneycombError::WordList`)
pub async fn solve_puzzle(
    config: &SolveConfig,
    words: &WordListCache,
) -> Result<SolveResult, HoneycombError> {
    let solver = Solver::from_input(&config.outer, &config.center)?;
    let list = words.load().await?;

    let ranked = solver.solve(list.words());
    tracing::debug!(puzzle = %solver.spec(), found = ranked.len(), "puzzle solved");

    Ok(SolveResult {
        spec: solver.spec().clone(),
        words: ranked,
        scanned: list.len(),
    })
}
