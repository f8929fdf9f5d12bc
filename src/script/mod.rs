//! The Eshakap script: alphabet tables, glyph assets, and text conversion.
//!
//! ## Components
//!
//! - [`alphabet`] — consonant/vowel classes and the canonical letter order
//! - [`glyph`] — glyph references, syllables, asset path resolution
//! - [`convert`] — transliterated text → syllable sequence

pub mod alphabet;
pub mod convert;
pub mod glyph;

pub use alphabet::{CharClass, ORDER};
pub use convert::{Converter, Rule, convert};
pub use glyph::{GlyphKey, GlyphRef, GlyphSet, Syllable};
