//! Authentication: password hashing, session tokens, and request identity.
//!
//! Passwords are hashed with argon2 and a per-hash random salt. Session
//! tokens are HS256 JWTs carrying the user id and an absolute expiry;
//! signature verification and the expiry check both run before any claim is
//! trusted. Identity is claim-based: a valid unexpired token is accepted
//! without a store lookup.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims.
///
/// `sub` stays a string through signature verification; it is parsed into a
/// user id afterwards so an unparsable subject is rejected distinctly from
/// a bad signature.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject). Defaults to empty when absent so a missing
    /// subject is rejected as a bad user id, not as a malformed token.
    #[serde(default)]
    pub sub: String,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// Authenticated user extracted from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User ID.
    pub user_id: Uuid,
}

/// Identity for auth-optional routes.
///
/// A missing Authorization header yields an anonymous request; a header
/// that is present but malformed, unverifiable, or expired is rejected the
/// same way it would be on an auth-required route.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl MaybeUser {
    /// The requester's user id, if authenticated.
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|u| u.user_id)
    }
}

/// Create a signed session token for a user.
pub fn create_token(user_id: Uuid, secret: &str, expiry_hours: u64) -> Result<String, ApiError> {
    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::hours(expiry_hours as i64)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to create token: {}", e)))
}

/// Verify a token's signature and expiry and return its claims.
///
/// Expiry is checked with zero leeway; an expired token is rejected with a
/// distinct message from a structurally or cryptographically invalid one.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            ApiError::Unauthorized("token expired".to_string())
        }
        _ => ApiError::Unauthorized("invalid token".to_string()),
    })?;

    Ok(token_data.claims)
}

/// Hash a password using argon2 with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {}", e)))?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Pull the token out of an Authorization header value.
///
/// Accepts exactly two whitespace-separated parts with the scheme keyword
/// `bearer`, case-insensitively.
fn bearer_token(header: &str) -> Result<&str, ApiError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(ApiError::Unauthorized(
            "invalid authorization header".to_string(),
        )),
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, ApiError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization".to_string()))?;

    let token = bearer_token(header)?;
    let claims = decode_token(token, &state.config().jwt_secret)?;

    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| ApiError::Unauthorized("invalid user id".to_string()))?;

    Ok(AuthenticatedUser { user_id })
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(MaybeUser(None));
        }
        authenticate(parts, state).map(|user| MaybeUser(Some(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unauthorized_message(err: ApiError) -> String {
        match err {
            ApiError::Unauthorized(msg) => msg,
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "same_password";
        assert_ne!(hash_password(password).unwrap(), hash_password(password).unwrap());
    }

    #[test]
    fn test_create_and_decode_token() {
        let secret = "test_secret_key_12345";
        let user_id = Uuid::new_v4();

        let token = create_token(user_id, secret, 24).unwrap();
        let claims = decode_token(&token, secret).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_decode_token_wrong_secret() {
        let token = create_token(Uuid::new_v4(), "secret1", 24).unwrap();
        let err = decode_token(&token, "secret2").unwrap_err();
        assert_eq!(unauthorized_message(err), "invalid token");
    }

    #[test]
    fn test_decode_garbage_token() {
        let err = decode_token("not.a.token", "secret").unwrap_err();
        assert_eq!(unauthorized_message(err), "invalid token");
    }

    #[test]
    fn test_expired_token_rejected_distinctly() {
        let secret = "test_secret";
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 60,
            iat: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let err = decode_token(&token, secret).unwrap_err();
        assert_eq!(unauthorized_message(err), "token expired");
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let secret = "test_secret";
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now + 60,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(decode_token(&token, secret).is_ok());
    }

    #[test]
    fn test_bearer_token_scheme_case_insensitive() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("BEARER abc").unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_rejects_malformed_headers() {
        for header in ["", "Bearer", "Token abc", "Bearer a b", "abc"] {
            let err = bearer_token(header).unwrap_err();
            assert_eq!(unauthorized_message(err), "invalid authorization header");
        }
    }

    #[test]
    fn test_non_uuid_subject_is_invalid_user_id() {
        let secret = "test_secret";
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        // Signature verifies; the subject parse is what fails.
        let decoded = decode_token(&token, secret).unwrap();
        assert!(decoded.sub.parse::<Uuid>().is_err());
    }
}
