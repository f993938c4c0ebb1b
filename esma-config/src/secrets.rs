//! TOML secret store for provider credentials.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Section of the secret store holding provider credentials.
pub const SECRET_SECTION: &str = "openrouter";

/// Key holding the provider API key.
pub const API_KEY_KEY: &str = "OPENAI_API_KEY";

/// Key holding the provider base URL.
pub const BASE_URL_KEY: &str = "OPENAI_BASE_URL";

/// Result alias for secret store operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Renders the structure the secret store is expected to have. Included in
/// configuration error messages; never echoes key values.
fn expected_structure() -> String {
    format!(
        "[{SECRET_SECTION}]\n{API_KEY_KEY} = \"...\"\n{BASE_URL_KEY} = \"https://openrouter.ai/api/v1\""
    )
}

/// Errors raised while resolving provider credentials. All are fatal: the
/// session never starts without a complete secret store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The secret store file could not be read.
    #[error("failed to read secret store {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The secret store file is not valid TOML.
    #[error("failed to parse secret store {path}: {source}")]
    ParseToml {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The named credential section is absent.
    #[error(
        "secret configuration error: missing section `[openrouter]` \
         (found sections: {found:?}); required structure:\n{}",
        expected_structure()
    )]
    MissingSection {
        /// Top-level section names actually present in the store.
        found: Vec<String>,
    },

    /// A required key is absent from the credential section.
    #[error(
        "secret configuration error: missing key `{key}` in `[openrouter]` \
         (found keys: {found:?}); required structure:\n{}",
        expected_structure()
    )]
    MissingKey {
        /// The absent key.
        key: &'static str,
        /// Key names actually present in the section.
        found: Vec<String>,
    },

    /// A credential entry is present but not a TOML string.
    #[error("secret configuration error: key `{key}` in `[openrouter]` must be a string")]
    NotAString {
        /// The offending key.
        key: &'static str,
    },
}

/// Resolved provider credentials: endpoint plus API key.
#[derive(Clone)]
pub struct ProviderCredentials {
    api_key: String,
    base_url: String,
}

impl ProviderCredentials {
    /// Creates credentials from already-resolved values.
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Returns the provider API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the provider base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// The key never appears in logs or error output.
impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Loader for the TOML secret store.
#[derive(Debug, Default)]
pub struct SecretStore;

impl SecretStore {
    /// Loads provider credentials from the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file is unreadable, not TOML, or
    /// missing the `[openrouter]` section or either of its two keys. The
    /// diagnostics list what was expected and what was found, never key
    /// values.
    pub fn load(path: &Path) -> ConfigResult<ProviderCredentials> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_owned(),
            source,
        })?;

        let table: toml::Table =
            content
                .parse()
                .map_err(|source| ConfigError::ParseToml {
                    path: path.to_owned(),
                    source,
                })?;

        let section = table
            .get(SECRET_SECTION)
            .and_then(toml::Value::as_table)
            .ok_or_else(|| ConfigError::MissingSection {
                found: table.keys().cloned().collect(),
            })?;

        let api_key = string_entry(section, API_KEY_KEY)?;
        let base_url = string_entry(section, BASE_URL_KEY)?;

        debug!(path = %path.display(), "resolved provider credentials");
        Ok(ProviderCredentials::new(api_key, base_url))
    }
}

fn string_entry(section: &toml::Table, key: &'static str) -> ConfigResult<String> {
    let value = section.get(key).ok_or_else(|| ConfigError::MissingKey {
        key,
        found: section.keys().cloned().collect(),
    })?;
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or(ConfigError::NotAString { key })
}

/// Returns the default secret store location, `~/.esma/secrets.toml`.
#[must_use]
pub fn default_secrets_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".esma")
        .join("secrets.toml")
}
