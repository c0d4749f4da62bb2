//! Remote dictionary lookup

use crate::error::DefinitionError;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Public dictionary API queried by default
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// Fetch the raw definition payload for a word
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    /// # Errors
    /// `NotFound` for any non-success response, `LookupFailed` for transport
    /// or decoding failures.
    async fn lookup(&self, word: &str) -> Result<serde_json::Value, DefinitionError>;
}

/// Lookup against a dictionaryapi.dev-compatible HTTP service
#[derive(Debug, Clone)]
pub struct HttpDefinitionLookup {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDefinitionLookup {
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Entry URL for a word, with the word percent-encoded as one path segment
    ///
    /// # Errors
    /// Returns `LookupFailed` when the base URL cannot carry path segments.
    pub fn entry_url(&self, word: &str) -> Result<Url, DefinitionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DefinitionError::LookupFailed {
                word: word.to_string(),
                reason: format!("{} cannot be used as a lookup base", self.base_url),
            })?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl DefinitionLookup for HttpDefinitionLookup {
    async fn lookup(&self, word: &str) -> Result<serde_json::Value, DefinitionError> {
        let failed = |reason: String| DefinitionError::LookupFailed {
            word: word.to_string(),
            reason,
        };

        let url = self.entry_url(word)?;
        debug!(%url, "looking up definition");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), word, "no definition");
            return Err(DefinitionError::NotFound {
                word: word.to_string(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| failed(e.to_string()))
    }
}
