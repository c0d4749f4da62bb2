//! Word lists for Spelling Bee solving
//!
//! Sources (embedded, file, HTTP), the normalized in-memory list, and the
//! load-once cache that hands it to every solve.

mod cache;
mod embedded;
pub mod loader;

pub use cache::WordListCache;
pub use embedded::{EMBEDDED_WORDS, EMBEDDED_WORDS_COUNT};
pub use loader::{
    EmbeddedSource, FileSource, HttpSource, WordList, WordListSource, source_from_setting,
};
