//! Opaque identifiers for glyph references, syllables and word records.
//!
//! Ids are random UUID v4 strings. They carry no meaning beyond uniqueness
//! and are never parsed back.

use uuid::Uuid;

/// Generate a fresh random UUID v4 string, e.g. `"9b2f0c1e-4a7d-4c55-8e0a-1f3b5d7c9e21"`.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
