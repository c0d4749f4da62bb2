//! Word list parsing and sources
//!
//! A source only knows how to produce raw text; [`WordList::parse`] turns that
//! text into the normalized in-memory list.

use super::embedded::EMBEDDED_WORDS;
use crate::error::WordListError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Normalized word list: one trimmed, non-empty entry per source line
///
/// Order is preserved and duplicates are kept. Letter case is left alone so
/// capitalized proper nouns can still be recognized by the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Parse raw word list text
    ///
    /// # Examples
    /// ```
    /// use honeycomb::wordlists::WordList;
    ///
    /// let list = WordList::parse("pill\r\n  pillar \n\n\ntulip");
    /// assert_eq!(list.words(), ["pill", "pillar", "tulip"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        // `lines` already strips a trailing '\r'
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { words }
    }

    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text: Vec<String> = words.into_iter().map(Into::into).collect();
        Self::parse(&text.join("\n"))
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Anything that can hand over the raw word list text
#[async_trait]
pub trait WordListSource: Send + Sync {
    /// Human-readable origin, used in error messages and logs
    fn name(&self) -> String;

    /// Read the complete raw text
    async fn read_text(&self) -> Result<String, WordListError>;
}

/// The list compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl WordListSource for EmbeddedSource {
    fn name(&self) -> String {
        "embedded word list".to_string()
    }

    async fn read_text(&self) -> Result<String, WordListError> {
        Ok(EMBEDDED_WORDS.join("\n"))
    }
}

/// A plain text file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WordListSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> Result<String, WordListError> {
        debug!(path = %self.path.display(), "reading word list file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| WordListError::Unavailable {
                source_name: self.name(),
                reason: e.to_string(),
            })
    }
}

/// A word list served over HTTP, always fetched fresh
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WordListSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn read_text(&self) -> Result<String, WordListError> {
        let unavailable = |reason: String| WordListError::Unavailable {
            source_name: self.url.clone(),
            reason,
        };

        debug!(url = %self.url, "fetching word list");
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {}", status.as_u16())));
        }

        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}

/// Pick a source from a config setting
///
/// `"embedded"` selects the bundled list, `http://` and `https://` values are
/// fetched over the network, anything else is treated as a file path.
#[must_use]
pub fn source_from_setting(setting: &str, client: &reqwest::Client) -> Box<dyn WordListSource> {
    let setting = setting.trim();
    if setting.eq_ignore_ascii_case("embedded") {
        Box::new(EmbeddedSource)
    } else if setting.starts_with("http://") || setting.starts_with("https://") {
        Box::new(HttpSource::new(client.clone(), setting))
    } else {
        Box::new(FileSource::new(setting))
    }
}
