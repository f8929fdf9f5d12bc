//! Transliterated text → Eshakap syllables.
//!
//! A single left-to-right pass with one character of lookbehind and
//! lookahead. Each position is matched against four rules in priority order:
//!
//! 1. vowel not preceded by a consonant → carrier + vowel
//! 2. consonant followed by nothing or a consonant → consonant + null vowel
//! 3. consonant followed by a vowel → consonant + vowel (the vowel is consumed)
//! 4. anything else → the character's own glyph
//!
//! Rules 1-3 produce a complete syllable. Rule 4 produces a single glyph that
//! pairs with the next rule-4 glyph, or stands alone when no partner follows.

use super::alphabet::{CharClass, classify};
use super::glyph::{GlyphKey, GlyphSet, Syllable};

/// Outcome of matching one input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Carrier glyph, then the vowel.
    VowelOnset(char),
    /// Consonant, then the null-vowel glyph.
    BareConsonant(char),
    /// Consonant, then the following vowel, which is skipped by the scan.
    OpenSyllable(char, char),
    /// Single glyph for an out-of-alphabet character.
    Passthrough(char),
}

impl Rule {
    /// Input characters consumed by this rule.
    pub fn width(&self) -> usize {
        match self {
            Rule::OpenSyllable(..) => 2,
            _ => 1,
        }
    }
}

/// Pick the rule for `ch` given its neighbours.
pub fn rule_for(ch: char, prev: Option<char>, next: Option<char>) -> Rule {
    let prev_class = prev.map(classify);
    let next_class = next.map(classify);

    match (classify(ch), next) {
        (CharClass::Vowel, _) if prev_class != Some(CharClass::Consonant) => Rule::VowelOnset(ch),
        (CharClass::Consonant, None) => Rule::BareConsonant(ch),
        (CharClass::Consonant, Some(_)) if next_class == Some(CharClass::Consonant) => {
            Rule::BareConsonant(ch)
        }
        (CharClass::Consonant, Some(n)) if next_class == Some(CharClass::Vowel) => {
            Rule::OpenSyllable(ch, n)
        }
        _ => {
            // A vowel after a consonant is always consumed by OpenSyllable at
            // the consonant's position, so it never reaches this arm.
            debug_assert!(
                !(classify(ch) == CharClass::Vowel && prev_class == Some(CharClass::Consonant)),
                "vowel {ch:?} after consonant reached passthrough"
            );
            Rule::Passthrough(ch)
        }
    }
}

/// Converts transliterated text into syllables using a [`GlyphSet`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    glyphs: GlyphSet,
}

impl Converter {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self { glyphs }
    }

    pub fn glyph_set(&self) -> &GlyphSet {
        &self.glyphs
    }

    /// The rules applied to `text`, in scan order.
    pub fn rules(&self, text: &str) -> Vec<Rule> {
        let chars: Vec<char> = text.chars().collect();
        let mut rules = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let rule = rule_for(chars[i], prev, next);
            i += rule.width();
            rules.push(rule);
        }
        rules
    }

    /// Convert `text` (already lower-cased) into syllables.
    ///
    /// A passthrough glyph waiting for a partner is closed as a one-glyph
    /// syllable when a full syllable follows it, so every syllable holds one
    /// or two glyphs.
    pub fn convert(&self, text: &str) -> Vec<Syllable> {
        let mut syllables = Vec::with_capacity(text.len() / 2 + 1);
        let mut pending = None;

        for rule in self.rules(text) {
            let (first, second) = match rule {
                Rule::VowelOnset(v) => (GlyphKey::Carrier, GlyphKey::Char(v)),
                Rule::BareConsonant(c) => (GlyphKey::Char(c), GlyphKey::NullVowel),
                Rule::OpenSyllable(c, v) => (GlyphKey::Char(c), GlyphKey::Char(v)),
                Rule::Passthrough(ch) => {
                    let glyph = self.glyphs.glyph(GlyphKey::Char(ch));
                    match pending.take() {
                        Some(lone) => syllables.push(Syllable::pair(lone, glyph)),
                        None => pending = Some(glyph),
                    }
                    continue;
                }
            };

            if let Some(lone) = pending.take() {
                syllables.push(Syllable::single(lone));
            }
            syllables.push(Syllable::pair(
                self.glyphs.glyph(first),
                self.glyphs.glyph(second),
            ));
        }

        if let Some(lone) = pending {
            syllables.push(Syllable::single(lone));
        }
        syllables
    }
}

/// Convert `text` with the default glyph set.
pub fn convert(text: &str) -> Vec<Syllable> {
    Converter::default().convert(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(syllables: &[Syllable]) -> Vec<Vec<String>> {
        syllables
            .iter()
            .map(|s| s.paths().into_iter().map(str::to_string).collect())
            .collect()
    }

    fn converter() -> Converter {
        Converter::new(GlyphSet::new("/c/"))
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(converter().convert("").is_empty());
        assert!(convert("").is_empty());
    }

    #[test]
    fn lone_vowel_gets_carrier() {
        let out = converter().convert("a");
        assert_eq!(paths(&out), vec![vec!["/c/aläp.svg", "/c/a.svg"]]);
    }

    #[test]
    fn trailing_consonant_gets_null_vowel() {
        let out = converter().convert("kak");
        assert_eq!(
            paths(&out),
            vec![vec!["/c/k.svg", "/c/a.svg"], vec!["/c/k.svg", "/c/∅.svg"]]
        );
    }

    #[test]
    fn consonant_cluster_splits() {
        let out = converter().convert("tra");
        assert_eq!(
            paths(&out),
            vec![vec!["/c/t.svg", "/c/∅.svg"], vec!["/c/r.svg", "/c/a.svg"]]
        );
    }

    #[test]
    fn consonant_vowel_pairs_make_one_syllable_each() {
        let input = "pabäkątižįlomöça";
        let out = converter().convert(input);
        let chars: Vec<char> = input.chars().collect();
        assert_eq!(out.len(), chars.len() / 2);
        for (syl, pair) in out.iter().zip(chars.chunks(2)) {
            assert_eq!(syl.len(), 2);
            assert_eq!(syl.glyphs()[0].path, format!("/c/{}.svg", pair[0]));
            assert_eq!(syl.glyphs()[1].path, format!("/c/{}.svg", pair[1]));
        }
    }

    #[test]
    fn vowel_after_vowel_gets_its_own_carrier() {
        let out = converter().convert("kai");
        assert_eq!(
            paths(&out),
            vec![vec!["/c/k.svg", "/c/a.svg"], vec!["/c/aläp.svg", "/c/i.svg"]]
        );
    }

    #[test]
    fn two_unknown_characters_share_a_syllable() {
        let out = converter().convert("xy");
        assert_eq!(paths(&out), vec![vec!["/c/x.svg", "/c/y.svg"]]);
    }

    #[test]
    fn single_unknown_character_stands_alone() {
        let out = converter().convert("ka?");
        assert_eq!(
            paths(&out),
            vec![vec!["/c/k.svg", "/c/a.svg"], vec!["/c/?.svg"]]
        );
    }

    #[test]
    fn pending_passthrough_closes_before_full_syllable() {
        let out = converter().convert("eka");
        assert_eq!(
            paths(&out),
            vec![vec!["/c/e.svg"], vec!["/c/k.svg", "/c/a.svg"]]
        );
        assert!(out.iter().all(|s| (1..=2).contains(&s.len())));
    }

    #[test]
    fn space_separates_words() {
        let out = converter().convert("ka ta");
        assert_eq!(
            paths(&out),
            vec![
                vec!["/c/k.svg", "/c/a.svg"],
                vec!["/c/ .svg"],
                vec!["/c/t.svg", "/c/a.svg"],
            ]
        );
    }

    #[test]
    fn vowel_after_unknown_gets_carrier() {
        let rules = converter().rules("-a");
        assert_eq!(rules, vec![Rule::Passthrough('-'), Rule::VowelOnset('a')]);
    }

    #[test]
    fn rules_consume_following_vowel() {
        let rules = converter().rules("bös");
        assert_eq!(
            rules,
            vec![Rule::OpenSyllable('b', 'ö'), Rule::BareConsonant('s')]
        );
    }

    #[test]
    fn conversion_is_repeatable_up_to_ids() {
        let c = converter();
        let first = c.convert("ešakap ii!");
        let second = c.convert("ešakap ii!");
        assert_eq!(paths(&first), paths(&second));
        assert_ne!(first[0].id, second[0].id);
        assert_ne!(first[0].glyphs()[0].id, second[0].glyphs()[0].id);
    }

    #[test]
    fn every_syllable_holds_one_or_two_glyphs() {
        for input in ["", "a", "x", "xx", "xxx", "xka", "ax?", "ščž", "ööö", "k!a!k"] {
            for syl in converter().convert(input) {
                assert!((1..=2).contains(&syl.len()), "{input:?} produced {syl:?}");
            }
        }
    }
}
