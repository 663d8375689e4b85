//! Mock auth helpers for integration tests.
//!
//! Signs real access tokens with the test secret so requests pass through
//! the production `Identity` extractor unchanged.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use sweetshop_auth_types::token::issue_access_token;
use sweetshop_domain::id::UserId;
use sweetshop_domain::user::UserRole;

/// Configurable identity for test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user() -> Self {
        Self::new(UserId::generate(), UserRole::User)
    }

    pub fn admin() -> Self {
        Self::new(UserId::generate(), UserRole::Admin)
    }

    /// Signed HS256 token valid for one hour.
    pub fn token(&self, secret: &str) -> String {
        issue_access_token(self.user_id, self.role, secret, 3600)
            .map(|(token, _)| token)
            .unwrap()
    }

    /// `Bearer <token>` header value.
    pub fn bearer(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap()
    }

    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer(secret));
        map
    }
}
