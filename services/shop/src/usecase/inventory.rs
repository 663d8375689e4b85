use tracing::info;

use sweetshop_domain::id::{SweetId, UserId};

use crate::domain::repository::InventoryRepository;
use crate::domain::types::StockUpdate;
use crate::error::ShopError;

// ── Purchase ─────────────────────────────────────────────────────────────────

pub struct PurchaseUseCase<R: InventoryRepository> {
    pub repo: R,
}

impl<R: InventoryRepository> PurchaseUseCase<R> {
    /// Take one unit out of stock.
    pub async fn execute(&self, id: SweetId, buyer: UserId) -> Result<(), ShopError> {
        match self.repo.decrement(id).await? {
            StockUpdate::Applied => {
                info!(sweet_id = %id, user_id = %buyer, "sweet purchased");
                Ok(())
            }
            StockUpdate::Insufficient => Err(ShopError::OutOfStock),
            StockUpdate::Missing => Err(ShopError::SweetNotFound),
        }
    }
}

// ── Restock ──────────────────────────────────────────────────────────────────

pub struct RestockUseCase<R: InventoryRepository> {
    pub repo: R,
}

impl<R: InventoryRepository> RestockUseCase<R> {
    /// Add `amount` units. Zero is accepted; negative amounts are rejected
    /// so stock can never be driven below zero through this path.
    pub async fn execute(&self, id: SweetId, amount: Option<i32>) -> Result<(), ShopError> {
        let amount = amount.ok_or(ShopError::MissingFields)?;
        if amount < 0 {
            return Err(ShopError::NegativeRestock);
        }

        match self.repo.increment(id, amount).await? {
            StockUpdate::Applied => {
                info!(sweet_id = %id, amount, "sweet restocked");
                Ok(())
            }
            StockUpdate::Insufficient => Err(ShopError::StockOverflow),
            StockUpdate::Missing => Err(ShopError::SweetNotFound),
        }
    }
}
