//! Glyph references and syllables produced by the converter.
//!
//! Every glyph is an SVG asset addressed as `<base><key>.svg`. Letters use
//! the letter itself as key; the two placeholder glyphs have fixed keys.

use serde::Serialize;

use crate::id::fresh_id;

/// Default location of the glyph assets.
pub const DEFAULT_GLYPH_BASE: &str = "https://zhyov.github.io/Eshakap/assets/char/";

/// Asset key of the carrier glyph written before an onset vowel.
pub const CARRIER_KEY: &str = "aläp";

/// Asset key of the null-vowel glyph written after a bare consonant.
pub const NULL_VOWEL_KEY: &str = "∅";

/// Which asset a glyph reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKey {
    /// A letter or passthrough character, drawn by its own asset.
    Char(char),
    /// Null-consonant carrier for a vowel at syllable onset.
    Carrier,
    /// Null-vowel mark for a consonant without a vowel.
    NullVowel,
}

impl GlyphKey {
    /// Asset file stem for this key.
    pub fn stem(&self) -> String {
        match self {
            GlyphKey::Char(c) => c.to_string(),
            GlyphKey::Carrier => CARRIER_KEY.to_string(),
            GlyphKey::NullVowel => NULL_VOWEL_KEY.to_string(),
        }
    }
}

/// One glyph in a conversion result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlyphRef {
    /// Fresh opaque id, unique per conversion call.
    pub id: String,
    /// Asset path of the glyph.
    pub path: String,
}

/// One or two glyphs forming a written syllable.
///
/// The glyph list is private so the length invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syllable {
    pub id: String,
    #[serde(rename = "syllable")]
    glyphs: Vec<GlyphRef>,
}

impl Syllable {
    /// A syllable made of a single glyph.
    pub fn single(glyph: GlyphRef) -> Self {
        Self {
            id: fresh_id(),
            glyphs: vec![glyph],
        }
    }

    /// A syllable made of two glyphs, in reading order.
    pub fn pair(first: GlyphRef, second: GlyphRef) -> Self {
        Self {
            id: fresh_id(),
            glyphs: vec![first, second],
        }
    }

    pub fn glyphs(&self) -> &[GlyphRef] {
        &self.glyphs
    }

    /// Asset paths of the glyphs, in order.
    pub fn paths(&self) -> Vec<&str> {
        self.glyphs.iter().map(|g| g.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true for a constructed syllable.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Resolves glyph keys to asset paths under a base location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    base: String,
}

impl GlyphSet {
    /// Create a glyph set rooted at `base`. A trailing `/` is added if missing.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.is_empty() && !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Asset path for `key`.
    pub fn path(&self, key: GlyphKey) -> String {
        format!("{}{}.svg", self.base, key.stem())
    }

    /// A fresh glyph reference for `key`.
    pub fn glyph(&self, key: GlyphKey) -> GlyphRef {
        GlyphRef {
            id: fresh_id(),
            path: self.path(key),
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH_BASE)
    }
}
