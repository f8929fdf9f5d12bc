//! The Eshakap alphabet: consonant and vowel classes plus collation order.
//!
//! Diacritic letters (`đ`, `ž`, `ä`, `ą`, ...) are precomposed members of the
//! alphabet. Membership is decided by these tables alone, never by Unicode
//! category, so a decomposed `a` + combining mark is two unrelated characters.

use std::cmp::Ordering;

/// Consonant letters.
pub const CONSONANTS: [char; 24] = [
    'p', 'b', 'f', 'v', 'w', 'k', 'g', 't', 'd', 'đ', 'z', 'ž', 'h', 'j', 'l', 'm', 'n', 'ň', 'r',
    's', 'š', 'c', 'č', 'ç',
];

/// Vowel letters.
pub const VOWELS: [char; 7] = ['a', 'ä', 'ą', 'i', 'į', 'o', 'ö'];

/// Canonical alphabet order used for sorting dictionary entries.
pub const ORDER: [char; 31] = [
    'a', 'ä', 'ą', 'p', 'b', 'f', 'v', 'w', 'k', 'g', 't', 'd', 'đ', 'z', 'ž', 'i', 'į', 'h', 'j',
    'l', 'm', 'n', 'ň', 'o', 'ö', 'r', 's', 'š', 'c', 'č', 'ç',
];

/// Class of a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Consonant,
    Vowel,
    /// Anything outside the alphabet; passed through as its own glyph.
    Other,
}

/// Classify one character.
pub fn classify(ch: char) -> CharClass {
    if CONSONANTS.contains(&ch) {
        CharClass::Consonant
    } else if VOWELS.contains(&ch) {
        CharClass::Vowel
    } else {
        CharClass::Other
    }
}

/// Position of `ch` in [`ORDER`], if it is an alphabet letter.
pub fn order_index(ch: char) -> Option<usize> {
    ORDER.iter().position(|&c| c == ch)
}

/// Compare two words by script collation.
///
/// Letters compare by their position in [`ORDER`]; characters outside the
/// alphabet sort after every letter and among themselves by code point.
/// Comparison is case-insensitive, with the raw strings as a final tie-break
/// so that the ordering is total.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = a.to_lowercase();
    let right = b.to_lowercase();
    left.chars()
        .map(sort_weight)
        .cmp(right.chars().map(sort_weight))
        .then_with(|| a.cmp(b))
}

fn sort_weight(ch: char) -> (usize, char) {
    match order_index(ch) {
        Some(idx) => (idx, ch),
        None => (ORDER.len(), ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_disjoint() {
        for c in CONSONANTS {
            assert!(!VOWELS.contains(&c), "{c} is in both classes");
        }
    }

    #[test]
    fn order_covers_exactly_the_alphabet() {
        assert_eq!(ORDER.len(), CONSONANTS.len() + VOWELS.len());
        for c in CONSONANTS.iter().chain(VOWELS.iter()) {
            assert!(order_index(*c).is_some(), "{c} missing from ORDER");
        }
    }

    #[test]
    fn diacritics_are_letters() {
        assert_eq!(classify('ž'), CharClass::Consonant);
        assert_eq!(classify('ö'), CharClass::Vowel);
        assert_eq!(classify('e'), CharClass::Other);
        assert_eq!(classify('u'), CharClass::Other);
        assert_eq!(classify(' '), CharClass::Other);
    }

    #[test]
    fn collation_follows_script_order() {
        // 'ä' comes before 'p' in the script even though it is not ASCII.
        assert_eq!(compare("äla", "pala"), Ordering::Less);
        // 'i' sorts after 'ž'.
        assert_eq!(compare("iko", "žoka"), Ordering::Greater);
        // Unknown characters sort after all letters.
        assert_eq!(compare("ça", "xa"), Ordering::Less);
        // Prefix sorts first.
        assert_eq!(compare("ka", "kaš"), Ordering::Less);
    }

    #[test]
    fn collation_ignores_case_but_stays_total() {
        assert_eq!(compare("Ka", "ka").reverse(), compare("ka", "Ka"));
        assert_ne!(compare("Ka", "ka"), Ordering::Equal);
        assert_eq!(compare("Ka", "kb"), Ordering::Less);
    }
}
