#![allow(async_fn_in_trait)]

use sweetshop_domain::id::SweetId;
use sweetshop_domain::sweet::{Sweet, SweetFilter};

use crate::domain::types::{Credential, StockUpdate, SweetPatch};
use crate::error::ShopError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, ShopError>;

    /// Insert a new account. A duplicate email yields [`ShopError::EmailTaken`].
    async fn create(&self, credential: &Credential) -> Result<(), ShopError>;
}

/// Repository for catalog records.
pub trait SweetRepository: Send + Sync {
    /// All sweets in insertion order.
    async fn list(&self) -> Result<Vec<Sweet>, ShopError>;

    /// Sweets matching every present criterion, in insertion order.
    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, ShopError>;

    async fn find_by_id(&self, id: SweetId) -> Result<Option<Sweet>, ShopError>;

    async fn create(&self, sweet: &Sweet) -> Result<(), ShopError>;

    /// Apply the supplied fields. Returns the updated record, or `None` if absent.
    async fn update(&self, id: SweetId, patch: &SweetPatch) -> Result<Option<Sweet>, ShopError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: SweetId) -> Result<bool, ShopError>;
}

/// Atomic stock mutations. Each call is a single conditional row update.
pub trait InventoryRepository: Send + Sync {
    /// `quantity = quantity - 1` when `quantity > 0`.
    async fn decrement(&self, id: SweetId) -> Result<StockUpdate, ShopError>;

    /// `quantity = quantity + amount`. Never [`StockUpdate::Insufficient`].
    async fn increment(&self, id: SweetId, amount: i32) -> Result<StockUpdate, ShopError>;
}

/// One-way password hashing. Implementations may be slow by design, so both
/// calls are async to keep them off the request executor.
pub trait PasswordHasher: Send + Sync {
    /// Hash with a fresh random salt, returning a self-describing hash string.
    async fn hash(&self, password: &str) -> Result<String, ShopError>;

    /// `true` if `password` matches `hash`. A malformed hash never matches.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ShopError>;
}
