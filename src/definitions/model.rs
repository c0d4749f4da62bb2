//! Dictionary lookup payload
//!
//! The service answers with an array of entries. The raw JSON is what gets
//! cached; the typed view below is parsed on demand for display.

use serde::{Deserialize, Serialize};

/// One dictionary entry for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    /// `None` when the service omitted the field entirely
    #[serde(default)]
    pub meanings: Option<Vec<Meaning>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Raw response body from the lookup service
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionPayload {
    raw: serde_json::Value,
}

impl DefinitionPayload {
    #[must_use]
    pub const fn new(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Typed entries, or an empty list when the payload has another shape
    #[must_use]
    pub fn entries(&self) -> Vec<DictionaryEntry> {
        serde_json::from_value(self.raw.clone()).unwrap_or_default()
    }
}
