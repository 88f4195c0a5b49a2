//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, Header, authorization::Bearer};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use guardpost_domain::role::{Capability, Role};

use crate::token::{JwtSecret, validate_access_token};

/// Authenticated caller, taken from the `Authorization: Bearer <jwt>` header.
///
/// Returns 401 if the header is absent or the token does not validate.
/// Capability enforcement (403) happens in handlers via [`Identity::require`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

/// The caller's role lacks a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("role lacks capability {0:?}")]
pub struct MissingCapability(pub Capability);

impl Identity {
    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), MissingCapability> {
        if self.can(capability) {
            Ok(())
        } else {
            tracing::debug!(user_id = %self.user_id, role = %self.role, ?capability, "capability denied");
            Err(MissingCapability(capability))
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Extract synchronously and hand back a 'static future so the borrow of
    // `parts` does not leak into the returned future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let mut values = parts.headers.get_all(AUTHORIZATION).iter();
        let token = Authorization::<Bearer>::decode(&mut values)
            .ok()
            .map(|auth| auth.token().to_owned());

        let result = token
            .ok_or(StatusCode::UNAUTHORIZED)
            .and_then(|token| {
                validate_access_token(&token, secret.as_str()).map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer token");
                    StatusCode::UNAUTHORIZED
                })
            })
            .map(|info| Self {
                user_id: info.user_id,
                role: info.role,
            });

        async move { result }
    }
}
