//! Lexicon facade: dictionary queries and insertion over a [`WordStore`].
//!
//! The store only lists and inserts; substring search, type filtering, exact
//! lookup and ordering all happen here. Results come back in script
//! collation order (see [`crate::script::alphabet::compare`]).

pub mod word;

pub use word::{NewWord, WordRecord};

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::auth::{self, TokenVerifier, UserIdentity};
use crate::error::{EshakapResult, LexiconError, StoreError};
use crate::filter::TypeFilter;
use crate::id::fresh_id;
use crate::script::alphabet;
use crate::store::{self, MemStore, WordStore};

/// Result type for lexicon operations.
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;

/// The Eshakap dictionary.
#[derive(Clone)]
pub struct Lexicon {
    store: Arc<dyn WordStore>,
}

impl Lexicon {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self { store }
    }

    /// A lexicon with no persistence.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemStore::new()))
    }

    /// Open a lexicon backed by redb under `data_dir`, or in memory when `None`.
    pub fn open(data_dir: Option<&Path>) -> LexiconResult<Self> {
        let store = store::open(data_dir)?;
        let words = store.len()?;
        tracing::info!(persistent = data_dir.is_some(), words, "opened lexicon");
        Ok(Self::new(store))
    }

    fn sorted_words(&self) -> LexiconResult<Vec<WordRecord>> {
        let mut words = self.store.all_words()?;
        words.sort_by(|a, b| alphabet::compare(&a.word, &b.word).then_with(|| a.id.cmp(&b.id)));
        Ok(words)
    }

    /// Every stored word string.
    pub fn names(&self) -> LexiconResult<Vec<String>> {
        Ok(self.sorted_words()?.into_iter().map(|w| w.word).collect())
    }

    /// Records matching a search query and/or a type filter code.
    ///
    /// `query` matches case-insensitively as a substring of the word or of any
    /// meaning. An empty query or filter code is the same as none. An unknown
    /// filter code fails with [`crate::error::FilterError::InvalidFilter`].
    pub fn fetch(&self, query: &str, filter: Option<&str>) -> LexiconResult<Vec<WordRecord>> {
        let filter = match filter {
            Some(code) if !code.is_empty() => Some(TypeFilter::parse(code)?),
            _ => None,
        };
        let needle = query.to_lowercase();

        let result: Vec<WordRecord> = self
            .sorted_words()?
            .into_iter()
            .filter(|w| needle.is_empty() || w.mentions(&needle))
            .filter(|w| filter.is_none_or(|f| f.matches(&w.word_type)))
            .collect();

        tracing::debug!(
            query = %needle,
            filter = ?filter.map(TypeFilter::code),
            hits = result.len(),
            "fetch"
        );
        Ok(result)
    }

    /// Records whose word equals `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> LexiconResult<Vec<WordRecord>> {
        Ok(self
            .sorted_words()?
            .into_iter()
            .filter(|w| w.is_word(word))
            .collect())
    }

    /// Number of stored records.
    pub fn count(&self) -> LexiconResult<usize> {
        Ok(self.store.len()?)
    }

    /// Validate and store a new word under a fresh id.
    pub fn add(&self, new: NewWord) -> LexiconResult<WordRecord> {
        let record = new.validate()?.into_record(fresh_id());
        self.store.insert(&record)?;
        tracing::info!(id = %record.id, word = %record.word, "word added");
        Ok(record)
    }

    /// Add a word on behalf of the bearer of `auth_header`.
    ///
    /// The token is checked before the body is looked at, so an unauthenticated
    /// request fails with an auth error whatever it carries. A body that is not
    /// a JSON word payload fails with [`LexiconError::InvalidData`].
    pub fn add_authorized(
        &self,
        verifier: &dyn TokenVerifier,
        auth_header: Option<&str>,
        body: &[u8],
    ) -> EshakapResult<(UserIdentity, WordRecord)> {
        let user = auth::authorize(verifier, auth_header)?;
        let payload: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| LexiconError::InvalidData {
                reason: format!("body is not JSON: {e}"),
            })?;
        let record = self.add(NewWord::from_json(&payload)?)?;
        Ok((user, record))
    }

    /// Bulk-insert existing records, keeping their ids. Returns how many were stored.
    ///
    /// Every id is checked against the store and the rest of the batch first;
    /// on a duplicate nothing is inserted.
    pub fn import(&self, records: impl IntoIterator<Item = WordRecord>) -> LexiconResult<usize> {
        let records: Vec<WordRecord> = records.into_iter().collect();
        let mut seen: HashSet<String> = self.store.all_words()?.into_iter().map(|w| w.id).collect();
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id.clone())) {
            return Err(StoreError::DuplicateId { id: dup.id.clone() }.into());
        }

        for record in &records {
            self.store.insert(record)?;
        }
        tracing::info!(count = records.len(), "imported words");
        Ok(records.len())
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon").finish_non_exhaustive()
    }
}
