//! Definition memoization

use super::model::DefinitionPayload;
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Word -> payload memo that lives as long as its owner
///
/// Never evicts. Concurrent inserts for the same key are last-writer-wins;
/// the payload for a word does not depend on who fetched it.
#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: RwLock<FxHashMap<String, Arc<DefinitionPayload>>>,
}

impl DefinitionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<DefinitionPayload>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: impl Into<String>, payload: Arc<DefinitionPayload>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), payload);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
