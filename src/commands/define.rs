//! Definition lookup command

use crate::definitions::{DefinitionService, DictionaryEntry};
use crate::error::DefinitionError;

/// Definition data for one word, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineResult {
    pub word: String,
    pub entries: Vec<DictionaryEntry>,
}

/// Look up a word through the memoized service
///
/// # Errors
/// Any `DefinitionError` from the service; it concerns this word only.
pub async fn define_word(
    service: &DefinitionService,
    word: &str,
) -> Result<DefineResult, DefinitionError> {
    let payload = service.fetch_definition(word).await?;
    Ok(DefineResult {
        word: word.to_string(),
        entries: payload.entries(),
    })
}
