//! Credential resolution and session state for EsMa.
//!
//! The secret store is a TOML file with one named section holding the
//! provider API key and base URL. Resolution happens once at startup;
//! the resulting [`Session`] is read-only for the process lifetime.

#![warn(missing_docs, clippy::pedantic)]

mod secrets;
mod session;

/// Secret store loading and the configuration error taxonomy.
pub use secrets::{
    default_secrets_path, ConfigError, ConfigResult, ProviderCredentials, SecretStore,
    API_KEY_KEY, BASE_URL_KEY, SECRET_SECTION,
};
/// The resolved identity + credentials pairing for one user.
pub use session::{Session, SessionId};
