//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_cache_status, print_definition, print_fetch_outcome, print_solve_result,
    print_sync_outcome,
};
pub use formatters::{DefinitionView, MAX_DEFINITIONS_PER_MEANING, format_size};
