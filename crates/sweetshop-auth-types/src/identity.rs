//! Bearer-token identity extractors.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use sweetshop_core::error::{ApiError, error_response};
use sweetshop_domain::id::UserId;
use sweetshop_domain::user::UserRole;

use crate::token::validate_access_token;

/// HMAC secret used to validate bearer tokens. Services expose it through
/// `FromRef` on their state.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Access denied")]
    Forbidden,
}

impl ApiError for AccessError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

/// Authenticated caller, decoded from `Authorization: Bearer <jwt>`.
///
/// Returns 401 when the header is absent or the token does not validate.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Identity {
    /// 403 unless the caller's role is one of `allowed`.
    pub fn authorize(&self, allowed: &[UserRole]) -> Result<(), AccessError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }
}

fn authenticate(parts: &Parts, secret: &JwtSecret) -> Result<Identity, AccessError> {
    if !parts.headers.contains_key(AUTHORIZATION) {
        return Err(AccessError::MissingToken);
    }
    let bearer = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AccessError::InvalidToken)?;

    let info = validate_access_token(bearer.token(), &secret.0).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        AccessError::InvalidToken
    })?;

    Ok(Identity {
        user_id: info.user_id,
        role: info.role,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AccessError;

    // Validate synchronously and hand back a 'static future: axum-core declares
    // this as `fn -> impl Future + Send`, and an `async fn` would capture `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &JwtSecret::from_ref(state));
        async move { result }
    }
}

/// An [`Identity`] whose role is `ADMIN`.
///
/// Authentication runs first, so an anonymous caller gets 401 and a
/// signed-in non-admin gets 403.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AccessError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &JwtSecret::from_ref(state)).and_then(|identity| {
            identity.authorize(&[UserRole::Admin])?;
            Ok(Self(identity))
        });
        async move { result }
    }
}
