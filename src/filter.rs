//! Word-type filter codes.
//!
//! A filter code is a single lower-case hex digit whose four bits select word
//! types: bit 0 = general, bit 1 = special, bit 2 = replaceable,
//! bit 3 = combination. `'0'` selects nothing, `'f'` selects everything.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Category tag of a dictionary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    General,
    Special,
    Replaceable,
    Combination,
}

impl WordType {
    /// All tags in bit order.
    pub const ALL: [WordType; 4] = [
        WordType::General,
        WordType::Special,
        WordType::Replaceable,
        WordType::Combination,
    ];

    pub fn bit(self) -> u8 {
        match self {
            WordType::General => 0b0001,
            WordType::Special => 0b0010,
            WordType::Replaceable => 0b0100,
            WordType::Combination => 0b1000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordType::General => "general",
            WordType::Special => "special",
            WordType::Replaceable => "replaceable",
            WordType::Combination => "combination",
        }
    }

    /// Parse a stored type string, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == lowered)
    }
}

impl std::fmt::Display for WordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed filter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeFilter {
    mask: u8,
}

impl TypeFilter {
    /// Parse a filter code. Only the sixteen digits `0-9a-f` are accepted.
    pub fn parse(code: &str) -> Result<Self, FilterError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ ('0'..='9' | 'a'..='f')), None) => {
                let mask = c.to_digit(16).map(|d| d as u8).ok_or_else(|| invalid(code))?;
                Ok(Self { mask })
            }
            _ => Err(invalid(code)),
        }
    }

    pub fn mask(self) -> u8 {
        self.mask
    }

    /// The filter's code digit.
    pub fn code(self) -> char {
        std::char::from_digit(u32::from(self.mask), 16).unwrap_or('0')
    }

    /// Tags selected by this filter, in bit order.
    pub fn tags(self) -> Vec<WordType> {
        WordType::ALL
            .into_iter()
            .filter(|t| self.includes(*t))
            .collect()
    }

    pub fn includes(self, tag: WordType) -> bool {
        self.mask & tag.bit() != 0
    }

    /// Whether a stored type string is selected. Unknown type strings never match.
    pub fn matches(self, raw_type: &str) -> bool {
        WordType::parse(raw_type).is_some_and(|t| self.includes(t))
    }

    /// Every valid filter, `'0'` through `'f'`.
    pub fn all() -> impl Iterator<Item = TypeFilter> {
        (0u8..16).map(|mask| TypeFilter { mask })
    }
}

fn invalid(code: &str) -> FilterError {
    FilterError::InvalidFilter {
        code: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_bit_decomposition() {
        for filter in TypeFilter::all() {
            let code = filter.code().to_string();
            let parsed = TypeFilter::parse(&code).unwrap();
            assert_eq!(parsed, filter);
            for tag in WordType::ALL {
                let bit_set = parsed.mask() & tag.bit() != 0;
                assert_eq!(parsed.tags().contains(&tag), bit_set, "code {code} tag {tag}");
                assert_eq!(parsed.matches(tag.as_str()), bit_set);
            }
        }
    }

    #[test]
    fn known_rows() {
        assert!(TypeFilter::parse("0").unwrap().tags().is_empty());
        assert_eq!(
            TypeFilter::parse("5").unwrap().tags(),
            vec![WordType::General, WordType::Replaceable]
        );
        assert_eq!(
            TypeFilter::parse("a").unwrap().tags(),
            vec![WordType::Special, WordType::Combination]
        );
        assert_eq!(TypeFilter::parse("f").unwrap().tags(), WordType::ALL.to_vec());
    }

    #[test]
    fn rejects_unknown_codes() {
        for bad in ["", "g", "F", "10", "ff", "-", " "] {
            let err = TypeFilter::parse(bad).unwrap_err();
            assert!(matches!(err, FilterError::InvalidFilter { .. }), "{bad:?}");
        }
    }

    #[test]
    fn type_strings_match_case_insensitively() {
        let f = TypeFilter::parse("2").unwrap();
        assert!(f.matches("Special"));
        assert!(f.matches("SPECIAL"));
        assert!(!f.matches(" special "));
        assert!(!f.matches("general"));
        assert!(!f.matches("noun"));
    }
}
