//! The per-user session: identity plus resolved credentials.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::secrets::ProviderCredentials;

/// Unique identifier for one user session.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a random session identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Read-only pairing of a verified identity with provider credentials.
///
/// Created once at startup after the authentication boundary has supplied
/// a display name and the secret store has resolved; never mutated, lives
/// for the process lifetime.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    user_name: String,
    credentials: ProviderCredentials,
}

impl Session {
    /// Creates a session for the supplied identity and credentials.
    #[must_use]
    pub fn new(user_name: impl Into<String>, credentials: ProviderCredentials) -> Self {
        let id = SessionId::random();
        let user_name = user_name.into();
        debug!(session_id = %id, user = %user_name, "session established");
        Self {
            id,
            user_name,
            credentials,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the display name supplied by the authentication boundary.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Returns the resolved provider credentials.
    #[must_use]
    pub const fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keeps_identity_and_credentials() {
        let creds = ProviderCredentials::new("key", "https://openrouter.ai/api/v1");
        let session = Session::new("Elley", creds);

        assert_eq!(session.user_name(), "Elley");
        assert_eq!(
            session.credentials().base_url(),
            "https://openrouter.ai/api/v1"
        );
    }

    #[test]
    fn session_ids_are_unique() {
        let creds = ProviderCredentials::new("key", "url");
        let a = Session::new("a", creds.clone());
        let b = Session::new("b", creds);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn session_debug_does_not_leak_key() {
        let session = Session::new("Elley", ProviderCredentials::new("sk-or-secret", "url"));
        assert!(!format!("{session:?}").contains("sk-or-secret"));
    }
}
