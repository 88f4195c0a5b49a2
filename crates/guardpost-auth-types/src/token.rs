//! JWT access-token validation.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "ISSUE_TOKENS", test))]
use serde::Serialize;
use uuid::Uuid;

use guardpost_domain::role::Role;

/// HMAC secret used to verify access tokens.
///
/// Lives in the service state; the [`Identity`](crate::identity::Identity)
/// extractor pulls it out with `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: Role,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `role` | custom | role name, e.g. `"MANAGER"` |
/// | `exp` | `exp` | expiry, seconds since epoch |
///
/// [`Serialize`] requires the **`ISSUE_TOKENS`** feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "ISSUE_TOKENS", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

/// HS256, `exp` checked, required claims `exp` + `sub`. Default 60s leeway.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the parsed identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = claims
        .role
        .parse::<Role>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}

/// Sign an access token for `user_id` / `role` expiring at `exp`.
///
/// Requires the `ISSUE_TOKENS` feature.
#[cfg(any(feature = "ISSUE_TOKENS", test))]
pub fn issue_access_token(
    user_id: Uuid,
    role: Role,
    exp: u64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
