//! # Aviary Auth
//!
//! Authentication and token subsystem for an HTTP service: turns a
//! user-supplied password into a durable credential, issues and validates
//! short-lived signed session tokens, and manages long-lived opaque refresh
//! tokens that can be looked up and revoked.
//!
//! ## Credential lifecycle
//!
//! - At account creation the caller hashes the password ([`hash_password`])
//!   and stores only the hash; the plaintext is never persisted.
//! - At login the caller verifies the password ([`verify_password`]), then
//!   issues a short-lived session token ([`jwt::issue`]) and a long-lived
//!   refresh token ([`generate_refresh_token`] + [`store_refresh_token`]).
//! - Subsequent requests carry the session token in an authorization header;
//!   [`extract_bearer`] pulls it out and [`jwt::validate`] checks it. The
//!   session token is stateless: valid purely by signature and time window.
//! - The refresh flow trades a still-valid refresh token
//!   ([`resolve_refresh_token`]) for a new session token without re-checking
//!   the password; the revoke flow ([`revoke_refresh_token`]) invalidates it.
//!
//! ## Boundaries
//!
//! Persistence is a collaborator behind the [`store::RefreshTokenStore`]
//! trait; this crate ships a Postgres implementation and an in-memory one
//! but owns no storage itself. The signing secret is caller-supplied
//! configuration ([`AuthConfig`]), never process-global state. All
//! components are stateless functions over their inputs and safe to call
//! concurrently.
//!
//! Auth failures are deliberately fine-grained internally (expired vs
//! revoked vs unknown) and collapsible at the transport boundary via
//! [`Error::is_unauthorized`] so responses do not leak which condition
//! triggered.

pub mod config;
pub mod error;
pub mod headers;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod store;

pub use config::AuthConfig;
pub use error::{Error, ErrorKind};
pub use headers::{extract_api_key, extract_bearer};
pub use password::{DEFAULT_HASH_COST, hash_password, hash_password_with_cost, verify_password};
pub use refresh::{
    RefreshTokenRecord, default_refresh_ttl, generate_refresh_token, resolve_refresh_token,
    revoke_refresh_token, store_refresh_token,
};
pub use store::{InMemoryRefreshTokenStore, PgRefreshTokenStore, RefreshTokenStore};
