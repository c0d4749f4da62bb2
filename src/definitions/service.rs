//! Memoized definition fetching

use super::cache::DefinitionCache;
use super::lookup::DefinitionLookup;
use super::model::DefinitionPayload;
use crate::core::sanitize_for_lookup;
use crate::error::DefinitionError;
use std::sync::Arc;
use tracing::debug;

/// Definition lookups with a per-owner memo in front of the remote service
pub struct DefinitionService {
    lookup: Box<dyn DefinitionLookup>,
    cache: DefinitionCache,
}

impl DefinitionService {
    #[must_use]
    pub fn new(lookup: Box<dyn DefinitionLookup>) -> Self {
        Self {
            lookup,
            cache: DefinitionCache::new(),
        }
    }

    /// Definition payload for a word, from the memo when possible
    ///
    /// The memo is checked under the raw word and then under its sanitized
    /// form. On a miss the raw word is sent to the service and the payload is
    /// stored under the raw word.
    ///
    /// # Errors
    /// - `InvalidWord` when the word has no letters, before any network I/O
    /// - `NotFound` when the service has no entry
    /// - `LookupFailed` on transport or decoding failure
    pub async fn fetch_definition(
        &self,
        word: &str,
    ) -> Result<Arc<DefinitionPayload>, DefinitionError> {
        if let Some(hit) = self.cache.get(word) {
            debug!(word, "definition cache hit");
            return Ok(hit);
        }

        let cleaned = sanitize_for_lookup(word);
        if cleaned.is_empty() {
            return Err(DefinitionError::InvalidWord);
        }

        if let Some(hit) = self.cache.get(&cleaned) {
            debug!(word, key = %cleaned, "definition cache hit");
            return Ok(hit);
        }

        let raw = self.lookup.lookup(word).await?;
        let payload = Arc::new(DefinitionPayload::new(raw));
        self.cache.insert(word, Arc::clone(&payload));
        Ok(payload)
    }

    #[must_use]
    pub const fn cache(&self) -> &DefinitionCache {
        &self.cache
    }
}
