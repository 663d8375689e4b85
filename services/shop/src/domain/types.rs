use chrono::{DateTime, Utc};

use sweetshop_domain::id::UserId;
use sweetshop_domain::user::{User, UserRole};

/// Stored account including the password hash. Never leaves the service.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: UserId,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Redacted view safe to return to clients.
    pub fn public(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Fields an admin may change on an existing sweet. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl SweetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

/// Outcome of a conditional stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpdate {
    /// The row was changed.
    Applied,
    /// The row exists but the change would leave stock outside `0..=i32::MAX`.
    Insufficient,
    /// No sweet with that id.
    Missing,
}

