//! Filtering and ranking of a word list

use super::filter::is_allowed_word;
use crate::core::PuzzleSpec;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Ranking order: longest first, then alphabetical
#[must_use]
pub fn rank_order(a: &str, b: &str) -> Ordering {
    b.chars()
        .count()
        .cmp(&a.chars().count())
        .then_with(|| a.cmp(b))
}

/// Filter a word list to valid answers and rank them
///
/// Entries are trimmed before testing, kept words keep list order until the
/// final sort, and the input is never modified. Duplicate entries in the list
/// produce duplicate results.
///
/// # Examples
/// ```
/// use honeycomb::core::PuzzleSpec;
/// use honeycomb::solver::solve;
///
/// let spec = PuzzleSpec::validate("pituar", "l").unwrap();
/// let words: Vec<String> = ["pill", "pillar", "tulip", "pilot"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
///
/// assert_eq!(solve(&spec, &words), vec!["pillar", "tulip", "pill"]);
/// ```
#[must_use]
pub fn solve(spec: &PuzzleSpec, words: &[String]) -> Vec<String> {
    let allowed = spec.allowed();
    let center = spec.center();

    let mut results: Vec<String> = words
        .par_iter()
        .map(|w| w.trim())
        .filter(|w| is_allowed_word(w, allowed, center))
        .map(str::to_owned)
        .collect();

    results.sort_unstable_by(|a, b| rank_order(a, b));
    results
}
