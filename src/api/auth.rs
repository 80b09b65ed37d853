//! Caller identity extraction.
//!
//! Session validation happens in the external auth collaborator, which
//! resolves the session token and installs the caller's user id as the
//! `x-user-id` request header before the request reaches this gateway.
//! The extractor only surfaces that already-resolved identity; it does
//! not re-validate sessions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::UserId;
use crate::error::GatewayError;

/// Header carrying the externally resolved caller identity.
const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of a request.
///
/// Rejects with 401 `UNAUTHORIZED` when the identity header is absent or
/// not a valid user id.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub UserId);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| GatewayError::Unauthorized("missing caller identity".to_string()))?;

        let uuid = header
            .parse::<uuid::Uuid>()
            .map_err(|_| GatewayError::Unauthorized("invalid caller identity".to_string()))?;

        Ok(Self(UserId::from_uuid(uuid)))
    }
}
