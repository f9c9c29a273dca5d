//! Auth configuration threaded into calls.
//!
//! The signing secret and TTLs are explicit values the embedding service
//! constructs once and passes where needed; nothing here is process-global,
//! so the crate stays testable without ambient setup.

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};

use crate::refresh::default_refresh_ttl;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    token_secret: SecretString,
    session_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthConfig {
    /// Build a config with the default TTLs: one hour for session tokens,
    /// sixty days for refresh tokens.
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self {
            token_secret,
            session_ttl: Duration::hours(1),
            refresh_ttl: default_refresh_ttl(),
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// The shared signing secret. Only ever passed as a parameter to token
    /// issuance/validation; never logged.
    #[must_use]
    pub fn token_secret(&self) -> &str {
        self.token_secret.expose_secret()
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    #[must_use]
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}
