//! Spelling Bee solving
//!
//! The acceptance predicate, the filter-and-rank pass, and a small facade
//! binding both to a validated puzzle.

mod engine;
mod filter;
mod rank;

pub use engine::Solver;
pub use filter::{MIN_WORD_LENGTH, is_allowed_word};
pub use rank::{rank_order, solve};
