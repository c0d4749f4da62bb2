//! Formatting utilities shared by the CLI and the TUI

use crate::definitions::DictionaryEntry;

/// Definitions shown per part of speech
pub const MAX_DEFINITIONS_PER_MEANING: usize = 3;

/// Display-ready definition text for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionView {
    pub word: String,
    pub phonetic: Option<String>,
    pub sections: Vec<MeaningSection>,
    /// False when there was no entry or the entry carried no meanings field
    pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeaningSection {
    pub part_of_speech: String,
    pub definitions: Vec<(String, Option<String>)>,
}

impl DefinitionView {
    /// Build from the first dictionary entry, trimming each meaning to
    /// [`MAX_DEFINITIONS_PER_MEANING`]
    #[must_use]
    pub fn from_entries(word: &str, entries: &[DictionaryEntry]) -> Self {
        let Some(entry) = entries.first() else {
            return Self {
                word: word.to_string(),
                phonetic: None,
                sections: Vec::new(),
                has_data: false,
            };
        };

        let sections = entry
            .meanings
            .iter()
            .flatten()
            .map(|meaning| MeaningSection {
                part_of_speech: meaning.part_of_speech.clone(),
                definitions: meaning
                    .definitions
                    .iter()
                    .take(MAX_DEFINITIONS_PER_MEANING)
                    .map(|d| (d.definition.clone(), d.example.clone()))
                    .collect(),
            })
            .collect();

        Self {
            word: word.to_string(),
            phonetic: entry.phonetic.clone().filter(|p| !p.is_empty()),
            sections,
            has_data: entry.meanings.is_some(),
        }
    }

    /// Nothing usable came back; an entry with an empty meanings list still
    /// counts as data
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.has_data
    }

    /// Heading line: the word and its phonetic spelling when known
    #[must_use]
    pub fn heading(&self) -> String {
        match &self.phonetic {
            Some(p) => format!("{} /{}/", self.word, p.trim_matches('/')),
            None => self.word.clone(),
        }
    }

    /// Plain text lines, used where styling is not available
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.heading()];
        if self.is_empty() {
            lines.push("No usable definition data returned.".to_string());
            return lines;
        }

        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.part_of_speech.clone());
            for (i, (definition, example)) in section.definitions.iter().enumerate() {
                lines.push(format!("  {}. {definition}", i + 1));
                if let Some(example) = example {
                    lines.push(format!("     Example: {example}"));
                }
            }
        }
        lines
    }
}

/// Human-readable byte count
#[must_use]
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
