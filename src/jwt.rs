//! Short-lived signed session tokens (HS256 JWT).
//!
//! Tokens are stateless: no server-side record exists for them, they are
//! valid purely by signature and time-window checks. The signing secret is
//! a caller-supplied parameter; the issuer holds no state of its own.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Fixed `iss` claim stamped into every session token.
pub const ISSUER: &str = "aviary";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Error> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac_for(secret: &str) -> Result<HmacSha256, Error> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::Signing)
}

/// Issue a signed session token for `subject`, valid for `ttl` from now.
///
/// # Errors
///
/// Returns an error if the claims cannot be encoded or the HMAC key cannot
/// be constructed from `secret`.
pub fn issue(subject: Uuid, secret: &str, ttl: Duration) -> Result<String, Error> {
    let issued_at = Utc::now();
    let claims = SessionTokenClaims {
        iss: ISSUER.to_string(),
        sub: subject.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + ttl).timestamp(),
    };
    sign_hs256(secret, &claims)
}

/// Sign an explicit claim set with HS256.
///
/// # Errors
///
/// Returns an error if header/claims JSON cannot be encoded or the HMAC key
/// cannot be constructed.
pub fn sign_hs256(secret: &str, claims: &SessionTokenClaims) -> Result<String, Error> {
    let header_b64 = b64e_json(&SessionTokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let mut mac = mac_for(secret)?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Validate a session token against `secret` and return its subject.
///
/// # Errors
///
/// See [`validate_at`].
pub fn validate(token: &str, secret: &str) -> Result<Uuid, Error> {
    validate_at(token, secret, Utc::now().timestamp())
}

/// Validate a session token at an explicit point in time.
///
/// The signature is verified before any claim is decoded, so unverified
/// claims are never trusted. A token is expired only once `now` is strictly
/// past `exp`; at `now == exp` it is still valid.
///
/// # Errors
///
/// Returns an error if:
/// - the token is malformed or contains invalid base64/json,
/// - the signature does not verify against `secret`,
/// - the token is expired,
/// - the `sub` claim is not a well-formed UUID.
pub fn validate_at(token: &str, secret: &str, now_unix_seconds: i64) -> Result<Uuid, Error> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(Error::TokenFormat)?;
    if parts.next().is_some() {
        return Err(Error::TokenFormat);
    }

    let header: SessionTokenHeader = b64d_json(header_b64)?;
    if header.alg != "HS256" {
        return Err(Error::UnsupportedAlg(header.alg));
    }

    let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| Error::Base64)?;
    let mut mac = mac_for(secret)?;
    mac.update(format!("{header_b64}.{claims_b64}").as_bytes());
    // Constant-time comparison via the hmac crate.
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)?;

    let claims: SessionTokenClaims = b64d_json(claims_b64)?;
    if now_unix_seconds > claims.exp {
        return Err(Error::Expired);
    }

    Uuid::parse_str(&claims.sub).map_err(|_| Error::InvalidSubject)
}

#[cfg(test)]
mod tests {
    use super::{ISSUER, SessionTokenClaims, issue, sign_hs256, validate, validate_at};
    use crate::error::Error;
    use chrono::Duration;
    use uuid::Uuid;

    const NOW: i64 = 1_700_000_000;
    const SECRET: &str = "test-secret";

    fn test_claims(exp: i64) -> SessionTokenClaims {
        SessionTokenClaims {
            iss: ISSUER.to_string(),
            sub: "9f0c4810-49a9-43e2-9a27-13f8ec0a0d02".to_string(),
            iat: NOW,
            exp,
        }
    }

    #[test]
    fn issue_and_validate_round_trips() -> Result<(), Error> {
        let user_id = Uuid::new_v4();
        let token = issue(user_id, SECRET, Duration::hours(1))?;
        assert_eq!(validate(&token, SECRET)?, user_id);
        Ok(())
    }

    #[test]
    fn wrong_secret_fails_signature_check() -> Result<(), Error> {
        let token = issue(Uuid::new_v4(), "correct-secret", Duration::hours(1))?;
        let err = validate(&token, "wrong-secret").unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> Result<(), Error> {
        // A 1ms TTL truncates to exp == iat; one second later it is expired.
        let token = issue(Uuid::new_v4(), SECRET, Duration::milliseconds(1))?;
        let now = chrono::Utc::now().timestamp();
        let err = validate_at(&token, SECRET, now + 2).unwrap_err();
        assert!(matches!(err, Error::Expired));
        Ok(())
    }

    #[test]
    fn expiry_boundary_is_inclusive() -> Result<(), Error> {
        let token = sign_hs256(SECRET, &test_claims(NOW + 60))?;
        // Still valid at exactly exp, rejected one second past it.
        validate_at(&token, SECRET, NOW + 60)?;
        let err = validate_at(&token, SECRET, NOW + 61).unwrap_err();
        assert!(matches!(err, Error::Expired));
        Ok(())
    }

    #[test]
    fn expired_token_with_wrong_secret_reports_signature_first() -> Result<(), Error> {
        let token = sign_hs256(SECRET, &test_claims(NOW - 1))?;
        let err = validate_at(&token, "other-secret", NOW).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(
            validate_at("only.two", SECRET, NOW),
            Err(Error::TokenFormat)
        ));
        assert!(matches!(
            validate_at("a.b.c.d", SECRET, NOW),
            Err(Error::TokenFormat)
        ));
        assert!(matches!(
            validate_at("!!!.!!!.!!!", SECRET, NOW),
            Err(Error::Base64)
        ));
    }

    #[test]
    fn tampered_claims_fail_signature_check() -> Result<(), Error> {
        let token = sign_hs256(SECRET, &test_claims(NOW + 3600))?;
        let forged_claims = {
            use base64ct::{Base64UrlUnpadded, Encoding};
            let claims = test_claims(NOW + 999_999);
            Base64UrlUnpadded::encode_string(&serde_json::to_vec(&claims)?)
        };
        let mut parts = token.split('.');
        let header = parts.next().unwrap();
        let _claims = parts.next().unwrap();
        let sig = parts.next().unwrap();
        let forged = format!("{header}.{forged_claims}.{sig}");
        let err = validate_at(&forged, SECRET, NOW).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
        Ok(())
    }

    #[test]
    fn non_uuid_subject_is_rejected() -> Result<(), Error> {
        let mut claims = test_claims(NOW + 60);
        claims.sub = "not-a-uuid".to_string();
        let token = sign_hs256(SECRET, &claims)?;
        let err = validate_at(&token, SECRET, NOW).unwrap_err();
        assert!(matches!(err, Error::InvalidSubject));
        Ok(())
    }

    #[test]
    fn claims_carry_issuer_and_window() -> Result<(), Error> {
        let user_id = Uuid::new_v4();
        let token = issue(user_id, SECRET, Duration::hours(1))?;
        let claims_b64 = token.split('.').nth(1).unwrap();
        use base64ct::{Base64UrlUnpadded, Encoding};
        let bytes = Base64UrlUnpadded::decode_vec(claims_b64).map_err(|_| Error::Base64)?;
        let claims: SessionTokenClaims = serde_json::from_slice(&bytes)?;
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
        Ok(())
    }
}
