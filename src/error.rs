//! Error types
//!
//! One enum per concern so each failure stays scoped to the operation that
//! produced it. `HoneycombError` wraps them for callers that drive several.

use thiserror::Error;

/// Puzzle input rejected before any I/O happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Center letter must be exactly 1 letter.")]
    InvalidCenterLength(usize),

    #[error("Outer letters must be exactly 6 letters.")]
    InvalidOuterLength(usize),

    #[error("All 7 letters must be unique (no duplicates).")]
    DuplicateLetters(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    #[error("Could not load word list from {source_name}: {reason}")]
    Unavailable { source_name: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Invalid word for lookup.")]
    InvalidWord,

    #[error("No definition found for \"{word}\".")]
    NotFound { word: String },

    #[error("Definition lookup for \"{word}\" failed: {reason}")]
    LookupFailed { word: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Failed to install asset {path}: {reason}")]
    InstallFailed { path: String, reason: String },

    #[error("Network request for {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Cache storage error: {0}")]
    Storage(String),

    #[error("Invalid asset URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Cannot {action} while the cache manager is {state}")]
    InvalidTransition { action: &'static str, state: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Any failure the library can surface
#[derive(Error, Debug)]
pub enum HoneycombError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    WordList(#[from] WordListError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, HoneycombError>;
