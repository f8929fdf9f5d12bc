//! Dictionary word records and the new-word payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LexiconError;

/// A stored dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: String,
    pub word: String,
    pub meaning: Vec<String>,
    /// Category string; see [`crate::filter::WordType`] for the recognised tags.
    #[serde(rename = "type")]
    pub word_type: String,
    #[serde(default)]
    pub phonetic: String,
    /// Free-form composition data, `null` when absent.
    #[serde(default)]
    pub combination: Option<Value>,
}

impl WordRecord {
    /// Whether `needle` (already lower-cased) occurs in the word or any meaning.
    pub fn mentions(&self, needle: &str) -> bool {
        self.word.to_lowercase().contains(needle)
            || self
                .meaning
                .iter()
                .any(|m| m.to_lowercase().contains(needle))
    }

    /// Whether the word equals `other`, ignoring case.
    pub fn is_word(&self, other: &str) -> bool {
        self.word.to_lowercase() == other.to_lowercase()
    }
}

/// A word submitted for insertion, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewWord {
    pub word: String,
    pub meaning: Vec<String>,
    pub word_type: String,
    pub phonetic: String,
    pub combination: Option<Value>,
}

impl NewWord {
    pub fn new(word: impl Into<String>, meaning: Vec<String>, word_type: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning,
            word_type: word_type.into(),
            ..Default::default()
        }
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = phonetic.into();
        self
    }

    /// Read a new word from a JSON request body.
    ///
    /// Missing `word`/`type` read as empty and a missing `meaning` as an empty
    /// list; validation then rejects what is unusable. Wrongly-typed fields are
    /// rejected here.
    pub fn from_json(body: &Value) -> Result<Self, LexiconError> {
        let Some(obj) = body.as_object() else {
            return Err(invalid("body is not an object"));
        };

        let word = string_field(obj.get("word"), "word")?;
        let word_type = string_field(obj.get("type"), "type")?;
        let phonetic = string_field(obj.get("phonetic"), "phonetic")?;

        let meaning = match obj.get("meaning") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("meaning entries must be strings"))
                })
                .collect::<Result<Vec<String>, _>>()?,
            Some(_) => return Err(invalid("meaning is not a list")),
        };

        let combination = obj.get("combination").filter(|v| !v.is_null()).cloned();

        Self {
            word,
            meaning,
            word_type,
            phonetic,
            combination,
        }
        .validate()
    }

    /// Trim the word and type and reject empty ones.
    pub fn validate(mut self) -> Result<Self, LexiconError> {
        self.word = self.word.trim().to_string();
        self.word_type = self.word_type.trim().to_string();
        if self.word.is_empty() {
            return Err(invalid("word is empty"));
        }
        if self.word_type.is_empty() {
            return Err(invalid("type is empty"));
        }
        Ok(self)
    }

    /// Attach an id, producing a storable record.
    pub fn into_record(self, id: String) -> WordRecord {
        WordRecord {
            id,
            word: self.word,
            meaning: self.meaning,
            word_type: self.word_type,
            phonetic: self.phonetic,
            combination: self.combination,
        }
    }
}

fn string_field(value: Option<&Value>, name: &str) -> Result<String, LexiconError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid(&format!("{name} is not a string"))),
    }
}

fn invalid(reason: &str) -> LexiconError {
    LexiconError::InvalidData {
        reason: reason.to_string(),
    }
}
