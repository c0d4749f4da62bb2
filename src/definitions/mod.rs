//! On-demand word definitions
//!
//! Lookups go to a remote dictionary service and are memoized per owner.
//! Nothing here affects solving; failures stay scoped to the word asked for.

mod cache;
mod lookup;
mod model;
mod service;

pub use cache::DefinitionCache;
pub use lookup::{DEFAULT_LOOKUP_BASE_URL, DefinitionLookup, HttpDefinitionLookup};
pub use model::{Definition, DefinitionPayload, DictionaryEntry, Meaning};
pub use service::DefinitionService;
