use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use sweetshop_auth_types::identity::JwtSecret;

use crate::infra::db::{DbInventoryRepository, DbSweetRepository, DbUserRepository};
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: Argon2Hasher,
    pub jwt_secret: String,
    /// Access-token lifetime in seconds.
    pub jwt_expires_in: u64,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn sweet_repo(&self) -> DbSweetRepository {
        DbSweetRepository {
            db: self.db.clone(),
        }
    }

    pub fn inventory_repo(&self) -> DbInventoryRepository {
        DbInventoryRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}
