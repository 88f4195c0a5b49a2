//! Bearer-token helpers for router tests.
//!
//! Services validate `Authorization: Bearer <jwt>` themselves. `MockAuth` mints
//! a token with the same secret the service under test was built with, so no
//! identity provider is needed.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use guardpost_auth_types::token::issue_access_token;
use guardpost_domain::role::Role;

pub const TEST_JWT_SECRET: &str = "guardpost-test-jwt-secret";

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: Role,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    /// A random user with `role`.
    pub fn as_role(role: Role) -> Self {
        Self::new(Uuid::now_v7(), role)
    }

    /// Signed access token valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            + 3600;
        issue_access_token(self.user_id, self.role, exp, &self.secret)
            .unwrap_or_else(|e| panic!("failed to sign test token: {e}"))
    }

    /// `Authorization` header as the client would send it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .unwrap_or_else(|e| panic!("invalid header value: {e}"));
        (AUTHORIZATION, value)
    }
}
