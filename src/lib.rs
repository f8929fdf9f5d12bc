// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # eshakap
//!
//! Dictionary service and script converter for the Eshakap constructed
//! language.
//!
//! ## Architecture
//!
//! - **Script** (`script`): alphabet tables and the text → syllable converter
//! - **Lexicon** (`lexicon`): word records, search, type filtering, insertion
//! - **Filter codes** (`filter`): hex-digit bitmask over word types
//! - **Storage** (`store`): memory (DashMap) or durable (redb) word stores
//! - **Auth** (`auth`): bearer tokens checked by an external identity provider
//! - **Config** (`config`): TOML file + `ESHAKAP_*` environment
//!
//! The HTTP server lives in the `eshakap-server` binary (feature `server`).
//!
//! ## Library usage
//!
//! ```
//! use eshakap::lexicon::{Lexicon, NewWord};
//! use eshakap::script::convert;
//!
//! let syllables = convert("kala");
//! assert_eq!(syllables.len(), 2);
//!
//! let lexicon = Lexicon::in_memory();
//! lexicon.add(NewWord::new("kala", vec!["sun".into()], "general")).unwrap();
//! assert_eq!(lexicon.fetch("sun", Some("1")).unwrap().len(), 1);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod lexicon;
pub mod script;
pub mod store;
