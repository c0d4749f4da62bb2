//! Word acceptance predicate

use crate::core::AllowedSet;

/// Shortest word a puzzle accepts
pub const MIN_WORD_LENGTH: usize = 4;

/// Check whether a word is a valid answer for a puzzle
///
/// A word qualifies when it:
/// - has at least [`MIN_WORD_LENGTH`] characters
/// - contains no uppercase letters (proper nouns in mixed-case lists)
/// - contains the center letter
/// - uses only letters from the allowed set, repeats permitted
///
/// # Examples
/// ```
/// use honeycomb::core::AllowedSet;
/// use honeycomb::solver::is_allowed_word;
///
/// let allowed = AllowedSet::from_letters("pituarl");
/// assert!(is_allowed_word("pillar", allowed, 'l'));
/// assert!(!is_allowed_word("trip", allowed, 'l'));
/// ```
#[must_use]
pub fn is_allowed_word(word: &str, allowed: AllowedSet, center: char) -> bool {
    if word.chars().count() < MIN_WORD_LENGTH {
        return false;
    }

    if word.chars().any(char::is_uppercase) {
        return false;
    }

    if !word.contains(center) {
        return false;
    }

    word.chars().all(|ch| allowed.contains(ch))
}
