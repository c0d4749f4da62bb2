//! Letter normalization
//!
//! Puzzle input and lookup keys are reduced to ASCII `a`-`z` only.

use std::fmt;

/// Lowercase the input and keep only `a`-`z`
///
/// Accepts loosely formatted input such as `"r i t o a c"` or `"RIT-OAC"`.
///
/// # Examples
/// ```
/// use honeycomb::core::normalize_letters;
///
/// assert_eq!(normalize_letters("p i T u-a r"), "pituar");
/// assert_eq!(normalize_letters("4!"), "");
/// ```
#[must_use]
pub fn normalize_letters(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Key used for definition lookups; same reduction as puzzle input
#[must_use]
pub fn sanitize_for_lookup(word: &str) -> String {
    normalize_letters(word)
}

/// The seven letters a solution may use
///
/// Stored as a 26-bit mask, so membership is a single bit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllowedSet {
    mask: u32,
}

impl AllowedSet {
    /// Build a set from any letters; characters outside `a`-`z` are ignored
    #[must_use]
    pub fn from_letters(letters: &str) -> Self {
        let mask = letters
            .bytes()
            .filter(u8::is_ascii_lowercase)
            .fold(0, |mask, b| mask | bit(b));
        Self { mask }
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, ch: char) -> bool {
        if ch.is_ascii_lowercase() {
            self.mask & bit(ch as u8) != 0
        } else {
            false
        }
    }

    /// Number of distinct letters in the set
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Letters in alphabetical order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        (b'a'..=b'z')
            .filter(|&b| self.mask & bit(b) != 0)
            .map(char::from)
    }
}

impl fmt::Display for AllowedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.letters() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[inline]
const fn bit(b: u8) -> u32 {
    1 << (b - b'a')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_spaces_digits_punctuation() {
        assert_eq!(normalize_letters("p i t u a r"), "pituar");
        assert_eq!(normalize_letters("r1t,o.a c"), "rtoac");
        assert_eq!(normalize_letters(""), "");
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_letters("PiTuAr"), "pituar");
        assert_eq!(normalize_letters(" L "), "l");
    }

    #[test]
    fn normalize_drops_non_ascii_letters() {
        assert_eq!(normalize_letters("café"), "caf");
    }

    #[test]
    fn sanitize_matches_normalize() {
        assert_eq!(sanitize_for_lookup("Pillar!"), "pillar");
        assert_eq!(sanitize_for_lookup("123"), "");
    }

    #[test]
    fn allowed_set_membership() {
        let set = AllowedSet::from_letters("pituarl");
        assert_eq!(set.len(), 7);
        assert!(set.contains('p'));
        assert!(set.contains('l'));
        assert!(!set.contains('z'));
        assert!(!set.contains('P'));
        assert!(!set.contains('é'));
    }

    #[test]
    fn allowed_set_collapses_duplicates() {
        let set = AllowedSet::from_letters("aabbc");
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "abc");
    }

    #[test]
    fn allowed_set_empty() {
        let set = AllowedSet::default();
        assert!(set.is_empty());
        assert_eq!(set.letters().count(), 0);
    }
}
