//! Rich diagnostic error types for the Eshakap service.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so operators know what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the Eshakap service.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum EshakapError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error: {source}")]
    #[diagnostic(
        code(eshakap::store::io),
        help(
            "A filesystem operation failed. Check that the data directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("redb transaction error: {message}")]
    #[diagnostic(
        code(eshakap::store::redb),
        help(
            "The embedded database encountered a transaction error. \
             If it persists, move the data directory aside and re-import the word list."
        )
    )]
    Redb { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(eshakap::store::serde),
        help(
            "Failed to serialize or deserialize a word record. \
             The stored record format may have changed between versions."
        )
    )]
    Serialization { message: String },

    #[error("duplicate word id: {id}")]
    #[diagnostic(
        code(eshakap::store::duplicate_id),
        help("Word ids are generated per insert. Imported records must carry unique ids.")
    )]
    DuplicateId { id: String },
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum FilterError {
    #[error("invalid filter code: {code:?}")]
    #[diagnostic(
        code(eshakap::filter::invalid),
        help(
            "A filter code is one lower-case hex digit '0'-'f': \
             bit 0 = general, bit 1 = special, bit 2 = replaceable, bit 3 = combination."
        )
    )]
    InvalidFilter { code: String },
}

// ---------------------------------------------------------------------------
// Lexicon errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LexiconError {
    #[error("Invalid data")]
    #[diagnostic(
        code(eshakap::lexicon::invalid_data),
        help("A new word needs a non-empty `word`, a non-empty `type`, and `meaning` as a list. {reason}")
    )]
    InvalidData { reason: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Filter(#[from] FilterError),
}

// ---------------------------------------------------------------------------
// Authentication errors
// ---------------------------------------------------------------------------

/// Reasons a bearer token was not accepted.
///
/// All variants surface to HTTP clients as `401 Unauthorized`; the variant is
/// kept for logs only.
#[derive(Debug, Error, Diagnostic)]
pub enum AuthError {
    #[error("missing Authorization header")]
    #[diagnostic(
        code(eshakap::auth::missing_header),
        help("Send `Authorization: Bearer <token>` with write requests.")
    )]
    MissingHeader,

    #[error("malformed Authorization header")]
    #[diagnostic(
        code(eshakap::auth::malformed_header),
        help("The header must have the form `Bearer <token>`.")
    )]
    MalformedHeader,

    #[error("identity provider rejected the token (HTTP {status})")]
    #[diagnostic(
        code(eshakap::auth::rejected),
        help("The session has expired or the token is invalid. Sign in again.")
    )]
    Rejected { status: u16 },

    #[error("identity provider unreachable: {message}")]
    #[diagnostic(
        code(eshakap::auth::unreachable),
        help("Check `auth_url` in the configuration and network access to the provider.")
    )]
    ProviderUnreachable { message: String },

    #[error("identity provider returned a malformed response: {message}")]
    #[diagnostic(
        code(eshakap::auth::malformed_response),
        help("The provider answered 200 but the body was not a user object.")
    )]
    MalformedResponse { message: String },

    #[error("authentication is not configured")]
    #[diagnostic(
        code(eshakap::auth::not_configured),
        help("Set `auth_url` and `auth_api_key` (or ESHAKAP_AUTH_URL / ESHAKAP_AUTH_API_KEY).")
    )]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(eshakap::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path}: {message}")]
    #[diagnostic(
        code(eshakap::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {value:?}")]
    #[diagnostic(
        code(eshakap::config::invalid_value),
        help("Check the environment variable or config entry named here.")
    )]
    InvalidValue { key: String, value: String },
}

/// Convenience alias for functions returning Eshakap results.
pub type EshakapResult<T> = std::result::Result<T, EshakapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_converts_to_top_level() {
        let err = StoreError::DuplicateId { id: "w1".into() };
        let top: EshakapError = err.into();
        assert!(matches!(top, EshakapError::Store(StoreError::DuplicateId { .. })));
    }

    #[test]
    fn lexicon_error_wraps_filter_error() {
        let err = FilterError::InvalidFilter { code: "g".into() };
        let lex: LexiconError = err.into();
        assert!(matches!(lex, LexiconError::Filter(FilterError::InvalidFilter { .. })));
    }

    #[test]
    fn invalid_data_displays_client_message() {
        let err = LexiconError::InvalidData {
            reason: "word is empty".into(),
        };
        assert_eq!(err.to_string(), "Invalid data");
    }

    #[test]
    fn auth_error_display_mentions_status() {
        let msg = AuthError::Rejected { status: 403 }.to_string();
        assert!(msg.contains("403"));
    }
}
