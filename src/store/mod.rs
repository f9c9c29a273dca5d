//! Persistence contract for refresh tokens.
//!
//! The core owns no storage; it defines the contract a persistence
//! collaborator must honor. Uniqueness of token strings and atomicity of
//! revocation are the collaborator's responsibility. Every call may block
//! and may fail; failures surface immediately, retries belong to the caller.

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::refresh::RefreshTokenRecord;

pub mod postgres;

pub use postgres::PgRefreshTokenStore;

/// Storage operations the refresh token manager needs.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a new record. Inserting a token string that already exists
    /// must fail with a uniqueness violation.
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<()>;

    /// Look up a record by its opaque token string.
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;

    /// Set `revoked_at` if not already set. Returns whether a record with
    /// this token exists; re-revoking keeps the original timestamp.
    async fn mark_revoked(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool>;
}

/// In-memory store for tests and embedders running without a database.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token) {
            bail!("refresh token already exists");
        }
        records.insert(record.token.clone(), record.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn mark_revoked(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(token) {
            Some(record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(revoked_at);
                    record.updated_at = revoked_at;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
