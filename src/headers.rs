//! Credential extraction from an authorization header value.
//!
//! The transport layer hands in the raw header value (or `None` when the
//! header is absent); nothing here reads a request object. A value matches
//! exactly one scheme by a strict leading-prefix check, so a token that
//! merely *contains* a scheme substring cannot mis-parse.

use crate::error::Error;

/// Scheme prefix for bearer session tokens (case-sensitive, single space).
const BEARER_PREFIX: &str = "Bearer ";
/// Scheme prefix for static API keys.
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract a bearer token from an authorization header value.
///
/// # Errors
///
/// Returns [`Error::MissingAuthorization`] when the header is absent and
/// [`Error::MalformedAuthorization`] when the value does not start with
/// `Bearer ` or carries an empty token.
pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, Error> {
    extract_with_prefix(header_value, BEARER_PREFIX)
}

/// Extract a static API key from an authorization header value.
///
/// Identical contract to [`extract_bearer`] with the `ApiKey ` scheme.
///
/// # Errors
///
/// Returns [`Error::MissingAuthorization`] or [`Error::MalformedAuthorization`]
/// as for [`extract_bearer`].
pub fn extract_api_key(header_value: Option<&str>) -> Result<&str, Error> {
    extract_with_prefix(header_value, API_KEY_PREFIX)
}

fn extract_with_prefix<'a>(header_value: Option<&'a str>, prefix: &str) -> Result<&'a str, Error> {
    let value = header_value.ok_or(Error::MissingAuthorization)?;
    let token = value
        .strip_prefix(prefix)
        .ok_or(Error::MalformedAuthorization)?
        .trim();
    if token.is_empty() {
        return Err(Error::MalformedAuthorization);
    }
    Ok(token)
}
