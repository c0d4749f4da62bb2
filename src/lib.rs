//! Honeycomb
//!
//! A Spelling Bee solver: validate a seven-letter puzzle, filter a word list
//! down to the playable words, rank them, and look up definitions on demand.
//! An offline asset cache keeps the application's static files available
//! without a network.
//!
//! # Quick Start
//!
//! ```rust
//! use honeycomb::solver::Solver;
//!
//! let solver = Solver::from_input("pituar", "l").unwrap();
//! let words = vec!["pillar".to_string(), "trail".to_string(), "pupil".to_string()];
//!
//! assert_eq!(solver.solve(&words), vec!["pillar", "pupil", "trail"]);
//! ```

// Core domain types
pub mod core;

// Filtering and ranking
pub mod solver;

// Word list sources and the shared loaded list
pub mod wordlists;

// Definition lookup and memoization
pub mod definitions;

// Offline asset cache
pub mod assets;

// Configuration, errors, logging
pub mod config;
pub mod error;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
