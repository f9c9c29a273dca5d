//! Long-lived opaque refresh tokens.
//!
//! A refresh token is a durable record looked up by its unguessable token
//! string; it proves nothing by itself. Expiry and revocation are both
//! checked on every resolve, never deferred to a cleanup job. Raw token
//! values are never logged.

use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use tracing::error;
use uuid::Uuid;

use crate::error::Error;
use crate::store::RefreshTokenStore;

/// Random bytes per token; 32 bytes is well past the 128-bit guessing bound.
const TOKEN_BYTES: usize = 32;

/// Default refresh token lifetime.
#[must_use]
pub fn default_refresh_ttl() -> Duration {
    Duration::days(60)
}

/// Durable refresh token record as the persistence collaborator stores it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Build a fresh record expiring `ttl` from now.
    #[must_use]
    pub fn new(token: String, user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }
}

/// Generate an opaque refresh token: 32 random bytes, hex-encoded.
///
/// The OS CSPRNG is the only accepted randomness source; if it fails the
/// call fails, it is never degraded to a weaker source.
///
/// # Errors
///
/// Returns [`Error::RandomSource`] if the OS random source fails.
pub fn generate_refresh_token() -> Result<String, Error> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| Error::RandomSource)?;
    Ok(hex::encode(bytes))
}

/// Persist a generated token for `user_id`, expiring `ttl` from now.
///
/// # Errors
///
/// Returns [`Error::Storage`] on any persistence failure, including a token
/// collision (uniqueness violation); the caller may regenerate and retry.
pub async fn store_refresh_token(
    store: &dyn RefreshTokenStore,
    token: &str,
    user_id: Uuid,
    ttl: Duration,
) -> Result<RefreshTokenRecord, Error> {
    let record = RefreshTokenRecord::new(token.to_string(), user_id, ttl);
    store.insert(&record).await.map_err(|err| {
        error!("failed to store refresh token: {err:#}");
        Error::Storage(err)
    })?;
    Ok(record)
}

/// Resolve a refresh token to its owning user.
///
/// Revocation is checked before expiry; both are applied on every lookup.
///
/// # Errors
///
/// Returns [`Error::RefreshTokenNotFound`], [`Error::RefreshTokenRevoked`]
/// or [`Error::RefreshTokenExpired`] — all collapsible to "unauthorized" at
/// the boundary — or [`Error::Storage`] on a persistence failure.
pub async fn resolve_refresh_token(
    store: &dyn RefreshTokenStore,
    token: &str,
) -> Result<Uuid, Error> {
    let record = store
        .find_by_token(token)
        .await
        .map_err(|err| {
            error!("failed to lookup refresh token: {err:#}");
            Error::Storage(err)
        })?
        .ok_or(Error::RefreshTokenNotFound)?;

    if record.revoked_at.is_some() {
        return Err(Error::RefreshTokenRevoked);
    }
    if Utc::now() > record.expires_at {
        return Err(Error::RefreshTokenExpired);
    }
    Ok(record.user_id)
}

/// Revoke a refresh token.
///
/// Revoking an already-revoked token succeeds and preserves the original
/// revocation time.
///
/// # Errors
///
/// Returns [`Error::RefreshTokenNotFound`] if no such token exists, or
/// [`Error::Storage`] on a persistence failure.
pub async fn revoke_refresh_token(
    store: &dyn RefreshTokenStore,
    token: &str,
) -> Result<(), Error> {
    let found = store.mark_revoked(token, Utc::now()).await.map_err(|err| {
        error!("failed to revoke refresh token: {err:#}");
        Error::Storage(err)
    })?;
    if found {
        Ok(())
    } else {
        Err(Error::RefreshTokenNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::{RefreshTokenRecord, default_refresh_ttl, generate_refresh_token};
    use crate::error::Error;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn generated_tokens_are_fixed_length_hex() -> Result<(), Error> {
        let token = generate_refresh_token()?;
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        Ok(())
    }

    #[test]
    fn generated_tokens_are_unique() -> Result<(), Error> {
        assert_ne!(generate_refresh_token()?, generate_refresh_token()?);
        Ok(())
    }

    #[test]
    fn new_record_spans_the_ttl() {
        let record =
            RefreshTokenRecord::new("token".to_string(), Uuid::new_v4(), Duration::days(60));
        assert_eq!(record.expires_at - record.created_at, Duration::days(60));
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.revoked_at.is_none());
    }

    #[test]
    fn default_ttl_is_sixty_days() {
        assert_eq!(default_refresh_ttl(), Duration::days(60));
    }
}
