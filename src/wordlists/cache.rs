//! Load-once word list cache

use super::loader::{WordList, WordListSource};
use crate::error::WordListError;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Owns a word list source and the list it produced
///
/// The first successful [`load`](Self::load) is kept for the lifetime of the
/// cache. Concurrent first callers share a single fetch. A failed load leaves
/// the cache empty so a later call can retry.
pub struct WordListCache {
    source: Box<dyn WordListSource>,
    words: OnceCell<Arc<WordList>>,
}

impl WordListCache {
    #[must_use]
    pub fn new(source: Box<dyn WordListSource>) -> Self {
        Self {
            source,
            words: OnceCell::new(),
        }
    }

    /// Return the cached list, reading the source on first use
    ///
    /// # Errors
    /// Returns `WordListError::Unavailable` when the source cannot be read.
    pub async fn load(&self) -> Result<Arc<WordList>, WordListError> {
        if let Some(words) = self.words.get() {
            debug!("word list cache hit");
            return Ok(Arc::clone(words));
        }

        let words = self
            .words
            .get_or_try_init(|| async {
                let name = self.source.name();
                let text = self.source.read_text().await.inspect_err(|e| {
                    warn!(source = %name, error = %e, "word list load failed");
                })?;
                let list = WordList::parse(&text);
                info!(source = %name, words = list.len(), "word list loaded");
                Ok::<_, WordListError>(Arc::new(list))
            })
            .await?;

        Ok(Arc::clone(words))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.words.initialized()
    }

    #[must_use]
    pub fn source_name(&self) -> String {
        self.source.name()
    }
}
