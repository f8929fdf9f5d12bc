//! Bearer-token authentication against an external identity provider.
//!
//! Write endpoints require `Authorization: Bearer <token>`. The token is
//! checked by a [`TokenVerifier`]; the production one asks the provider's
//! `/auth/v1/user` endpoint over HTTP with `ureq`. Every failure is an
//! [`AuthError`] variant, which callers log and then answer with a uniform
//! `401 Unauthorized`.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Result type for authentication.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// The user a verified token belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Checks a bearer token and resolves the user it belongs to.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> AuthResult<UserIdentity>;
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> AuthResult<&str> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// Parse the header and verify its token.
pub fn authorize(verifier: &dyn TokenVerifier, header: Option<&str>) -> AuthResult<UserIdentity> {
    let token = bearer_token(header)?;
    verifier.verify(token)
}

// ---------------------------------------------------------------------------
// Identity provider over HTTP
// ---------------------------------------------------------------------------

/// Verifies tokens with the identity provider's user endpoint.
pub struct ProviderVerifier {
    user_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl ProviderVerifier {
    /// `base_url` is the provider root, e.g. `https://<project>.supabase.co`.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            user_url: format!("{}/auth/v1/user", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            agent,
        }
    }

    pub fn user_url(&self) -> &str {
        &self.user_url
    }
}

impl TokenVerifier for ProviderVerifier {
    fn verify(&self, token: &str) -> AuthResult<UserIdentity> {
        let response = self
            .agent
            .get(&self.user_url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("apikey", &self.api_key)
            .call();

        match response {
            Ok(resp) if resp.status() == 200 => {
                let body: serde_json::Value =
                    resp.into_json().map_err(|e| AuthError::MalformedResponse {
                        message: e.to_string(),
                    })?;
                identity_from_json(&body)
            }
            Ok(resp) => Err(AuthError::Rejected {
                status: resp.status(),
            }),
            Err(ureq::Error::Status(status, _)) => Err(AuthError::Rejected { status }),
            Err(ureq::Error::Transport(transport)) => Err(AuthError::ProviderUnreachable {
                message: transport.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for ProviderVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderVerifier")
            .field("user_url", &self.user_url)
            .finish_non_exhaustive()
    }
}

/// Read the user object returned by the provider.
pub fn identity_from_json(body: &serde_json::Value) -> AuthResult<UserIdentity> {
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::MalformedResponse {
            message: "user object has no id".into(),
        })?;
    Ok(UserIdentity {
        id: id.to_string(),
        email: body.get("email").and_then(|v| v.as_str()).map(str::to_string),
    })
}

// ---------------------------------------------------------------------------
// Local verifiers
// ---------------------------------------------------------------------------

/// Accepts a fixed set of tokens. For tests and local development.
#[derive(Debug, Default, Clone)]
pub struct StaticVerifier {
    tokens: HashMap<String, UserIdentity>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user: UserIdentity) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }
}

impl TokenVerifier for StaticVerifier {
    fn verify(&self, token: &str) -> AuthResult<UserIdentity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::Rejected { status: 401 })
    }
}

/// Rejects everything; used when no provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledVerifier;

impl TokenVerifier for DisabledVerifier {
    fn verify(&self, _token: &str) -> AuthResult<UserIdentity> {
        Err(AuthError::NotConfigured)
    }
}
