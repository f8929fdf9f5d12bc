//! Service configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file (path in `ESHAKAP_CONFIG`), and `ESHAKAP_*` environment variables.
//!
//! ```toml
//! bind = "0.0.0.0"
//! port = 5000
//! data_dir = "/var/lib/eshakap"
//! glyph_base = "https://zhyov.github.io/Eshakap/assets/char/"
//! auth_url = "https://project.supabase.co"
//! auth_api_key = "..."
//! auth_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{DisabledVerifier, ProviderVerifier, TokenVerifier};
use crate::error::ConfigError;
use crate::script::glyph::{DEFAULT_GLYPH_BASE, GlyphSet};

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Server and storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the word database. Defaults to the XDG data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Keep words in memory only; `data_dir` is ignored.
    #[serde(default)]
    pub in_memory: bool,
    #[serde(default = "default_glyph_base")]
    pub glyph_base: String,
    /// Identity provider root URL. Without it, writes are refused.
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub auth_api_key: Option<String>,
    #[serde(default = "default_auth_timeout_secs")]
    pub auth_timeout_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_glyph_base() -> String {
    DEFAULT_GLYPH_BASE.into()
}
fn default_auth_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            data_dir: None,
            in_memory: false,
            glyph_base: default_glyph_base(),
            auth_url: None,
            auth_api_key: None,
            auth_timeout_secs: default_auth_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Parse TOML text. `origin` names the source in error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read a TOML config file.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Load from `ESHAKAP_CONFIG` (if set) and the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = match std::env::var("ESHAKAP_CONFIG") {
            Ok(path) => Self::load_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from `ESHAKAP_*` variables read through `get`.
    pub fn apply_env<F>(&mut self, get: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = get("ESHAKAP_BIND") {
            self.bind = bind;
        }
        if let Some(port) = get("ESHAKAP_PORT") {
            self.port = parse_var("ESHAKAP_PORT", &port)?;
        }
        if let Some(dir) = get("ESHAKAP_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = get("ESHAKAP_IN_MEMORY") {
            self.in_memory = parse_var("ESHAKAP_IN_MEMORY", &flag)?;
        }
        if let Some(base) = get("ESHAKAP_GLYPH_BASE") {
            self.glyph_base = base;
        }
        if let Some(url) = get("ESHAKAP_AUTH_URL") {
            self.auth_url = Some(url);
        }
        if let Some(key) = get("ESHAKAP_AUTH_API_KEY") {
            self.auth_api_key = Some(key);
        }
        if let Some(secs) = get("ESHAKAP_AUTH_TIMEOUT_SECS") {
            self.auth_timeout_secs = parse_var("ESHAKAP_AUTH_TIMEOUT_SECS", &secs)?;
        }
        Ok(())
    }

    /// `bind:port` listen address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Where the word database lives, or `None` for memory-only storage.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        if self.in_memory {
            return None;
        }
        self.data_dir.clone().or_else(default_data_dir)
    }

    pub fn glyph_set(&self) -> GlyphSet {
        GlyphSet::new(self.glyph_base.clone())
    }

    /// Token verifier for write endpoints.
    pub fn verifier(&self) -> Arc<dyn TokenVerifier> {
        match (&self.auth_url, &self.auth_api_key) {
            (Some(url), Some(key)) => Arc::new(ProviderVerifier::new(
                url,
                key.clone(),
                Duration::from_secs(self.auth_timeout_secs),
            )),
            _ => {
                tracing::warn!("no identity provider configured; write requests will be refused");
                Arc::new(DisabledVerifier)
            }
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// `$XDG_DATA_HOME/eshakap`, falling back to `$HOME/.local/share/eshakap`.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(dir).join("eshakap"));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local/share/eshakap"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert_eq!(config.glyph_base, DEFAULT_GLYPH_BASE);
        assert_eq!(config.auth_timeout_secs, 10);
        assert!(!config.in_memory);
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = ServerConfig::from_toml_str(
            "port = 8080\ndata_dir = \"/tmp/words\"\nauth_url = \"https://id.example\"\n",
            "test.toml",
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/words")));
        assert_eq!(config.auth_url.as_deref(), Some("https://id.example"));
        assert_eq!(config.auth_api_key, None);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = ServerConfig::from_toml_str("port = \"many\"", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = ServerConfig::from_toml_str("port = 8080", "test.toml").unwrap();
        config
            .apply_env(env(&[
                ("ESHAKAP_PORT", "9000"),
                ("ESHAKAP_BIND", "127.0.0.1"),
                ("ESHAKAP_GLYPH_BASE", "/glyphs"),
                ("ESHAKAP_IN_MEMORY", "true"),
            ]))
            .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.glyph_set().base(), "/glyphs/");
        assert_eq!(config.storage_dir(), None);
    }

    #[test]
    fn invalid_env_value_is_reported() {
        let mut config = ServerConfig::default();
        let err = config.apply_env(env(&[("ESHAKAP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ESHAKAP_PORT"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = ServerConfig {
            data_dir: Some(PathBuf::from("/srv/eshakap")),
            ..Default::default()
        };
        assert_eq!(config.storage_dir(), Some(PathBuf::from("/srv/eshakap")));
    }
}
