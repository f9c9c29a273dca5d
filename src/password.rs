//! Password hashing and verification (bcrypt).
//!
//! Hashes are salted by bcrypt itself, so two calls on the same plaintext
//! produce different strings that both verify. The plaintext never appears
//! in errors or logs.

use crate::error::Error;

/// Default bcrypt cost factor. Expensive enough to resist offline
/// brute force while staying tolerable on a login path.
pub const DEFAULT_HASH_COST: u32 = 10;

/// Hash a plaintext password with the default cost.
///
/// # Errors
///
/// Returns [`Error::Hashing`] if bcrypt fails (e.g. the cost is out of range
/// or the random salt cannot be generated).
pub fn hash_password(password: &str) -> Result<String, Error> {
    hash_password_with_cost(password, DEFAULT_HASH_COST)
}

/// Hash a plaintext password with an explicit cost factor.
///
/// # Errors
///
/// Returns [`Error::Hashing`] if bcrypt rejects the cost or hashing fails.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, Error> {
    bcrypt::hash(password, cost).map_err(Error::Hashing)
}

/// Verify a plaintext password against a stored hash.
///
/// bcrypt recomputes the hash and compares in constant time, so timing does
/// not leak how many prefix bytes matched.
///
/// # Errors
///
/// Returns [`Error::PasswordMismatch`] when the password does not match and
/// [`Error::MalformedHash`] when the stored hash is not a bcrypt hash
/// (corrupted storage). Callers may present both as "invalid credentials".
pub fn verify_password(password: &str, hash: &str) -> Result<(), Error> {
    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::PasswordMismatch),
        Err(err) => Err(Error::MalformedHash(err)),
    }
}
