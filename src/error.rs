//! Error taxonomy for the auth subsystem.
//!
//! Variants are grouped into four kinds (see [`ErrorKind`]): input errors and
//! auth failures are expected and frequent; crypto and storage failures are
//! unexpected and should surface as an opaque server-side error. Transport
//! layers are expected to collapse every [`ErrorKind::Auth`] failure into a
//! single "unauthorized" response so callers cannot distinguish an expired
//! token from a revoked or unknown one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authorization header missing")]
    MissingAuthorization,
    #[error("invalid authorization header format")]
    MalformedAuthorization,
    #[error("failed to hash password")]
    Hashing(#[source] bcrypt::BcryptError),
    #[error("malformed password hash")]
    MalformedHash(#[source] bcrypt::BcryptError),
    #[error("password mismatch")]
    PasswordMismatch,
    #[error("failed to sign token")]
    Signing,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid subject claim")]
    InvalidSubject,
    #[error("random source failure")]
    RandomSource,
    #[error("refresh token not found")]
    RefreshTokenNotFound,
    #[error("refresh token revoked")]
    RefreshTokenRevoked,
    #[error("refresh token expired")]
    RefreshTokenExpired,
    #[error("storage error")]
    Storage(#[source] anyhow::Error),
}

/// Coarse classification used by transport layers to map errors onto
/// responses without leaking which condition triggered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Missing or malformed caller input.
    Input,
    /// Random source or signing failure.
    Crypto,
    /// Credential was checked and rejected.
    Auth,
    /// Persistence collaborator failure, including uniqueness violations.
    Storage,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingAuthorization
            | Self::MalformedAuthorization
            | Self::MalformedHash(_)
            | Self::TokenFormat
            | Self::Base64
            | Self::Json(_)
            | Self::UnsupportedAlg(_) => ErrorKind::Input,
            Self::Hashing(_) | Self::Signing | Self::RandomSource => ErrorKind::Crypto,
            Self::PasswordMismatch
            | Self::InvalidSignature
            | Self::Expired
            | Self::InvalidSubject
            | Self::RefreshTokenNotFound
            | Self::RefreshTokenRevoked
            | Self::RefreshTokenExpired => ErrorKind::Auth,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// True for every failure a transport layer should present as a generic
    /// "unauthorized", regardless of the underlying condition.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }
}
