pub mod auth;
pub mod inventory;
pub mod sweet;

use sweetshop_domain::id::SweetId;

use crate::error::ShopError;

/// Path ids that are not UUIDs cannot name a stored sweet.
fn parse_sweet_id(raw: &str) -> Result<SweetId, ShopError> {
    raw.parse().map_err(|_| ShopError::SweetNotFound)
}
