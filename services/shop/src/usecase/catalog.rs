use tracing::info;

use sweetshop_domain::id::SweetId;
use sweetshop_domain::sweet::{Sweet, SweetFilter};

use crate::domain::repository::SweetRepository;
use crate::domain::types::SweetPatch;
use crate::error::ShopError;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ── Create ───────────────────────────────────────────────────────────────────

pub struct CreateSweetInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

pub struct CreateSweetUseCase<R: SweetRepository> {
    pub repo: R,
}

impl<R: SweetRepository> CreateSweetUseCase<R> {
    pub async fn execute(&self, input: CreateSweetInput) -> Result<Sweet, ShopError> {
        let (Some(name), Some(category), Some(price), Some(quantity)) =
            (input.name, input.category, input.price, input.quantity)
        else {
            return Err(ShopError::MissingFields);
        };
        if is_blank(&name) || is_blank(&category) {
            return Err(ShopError::MissingFields);
        }
        if price < 0.0 || quantity < 0 {
            return Err(ShopError::NegativeStock);
        }

        let sweet = Sweet {
            id: SweetId::generate(),
            name,
            category,
            price,
            quantity,
        };
        self.repo.create(&sweet).await?;

        info!(sweet_id = %sweet.id, name = %sweet.name, "sweet created");
        Ok(sweet)
    }
}

// ── List / search ────────────────────────────────────────────────────────────

pub struct ListSweetsUseCase<R: SweetRepository> {
    pub repo: R,
}

impl<R: SweetRepository> ListSweetsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Sweet>, ShopError> {
        self.repo.list().await
    }
}

/// Raw query-string criteria. Empty strings count as absent.
#[derive(Debug, Default)]
pub struct SearchSweetsInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchSweetsInput {
    fn into_filter(self) -> Result<SweetFilter, ShopError> {
        Ok(SweetFilter {
            name: self.name.filter(|v| !v.is_empty()),
            category: self.category.filter(|v| !v.is_empty()),
            min_price: parse_price(self.min_price)?,
            max_price: parse_price(self.max_price)?,
        })
    }
}

fn parse_price(raw: Option<String>) -> Result<Option<f64>, ShopError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(ShopError::InvalidPriceFilter),
    }
}

pub struct SearchSweetsUseCase<R: SweetRepository> {
    pub repo: R,
}

impl<R: SweetRepository> SearchSweetsUseCase<R> {
    pub async fn execute(&self, input: SearchSweetsInput) -> Result<Vec<Sweet>, ShopError> {
        let filter = input.into_filter()?;
        if filter.is_empty() {
            return self.repo.list().await;
        }
        self.repo.search(&filter).await
    }
}

// ── Update ───────────────────────────────────────────────────────────────────

pub struct UpdateSweetUseCase<R: SweetRepository> {
    pub repo: R,
}

impl<R: SweetRepository> UpdateSweetUseCase<R> {
    /// Validates every supplied field before touching the store, so a
    /// rejected patch leaves the record unchanged.
    pub async fn execute(&self, id: SweetId, patch: SweetPatch) -> Result<Sweet, ShopError> {
        if patch.price.is_some_and(|p| p < 0.0) {
            return Err(ShopError::NegativePrice);
        }
        if patch.quantity.is_some_and(|q| q < 0) {
            return Err(ShopError::NegativeQuantity);
        }
        if patch.name.as_deref().is_some_and(is_blank)
            || patch.category.as_deref().is_some_and(is_blank)
        {
            return Err(ShopError::EmptyField);
        }

        let sweet = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or(ShopError::SweetNotFound)?;

        info!(sweet_id = %id, "sweet updated");
        Ok(sweet)
    }
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub struct DeleteSweetUseCase<R: SweetRepository> {
    pub repo: R,
}

impl<R: SweetRepository> DeleteSweetUseCase<R> {
    pub async fn execute(&self, id: SweetId) -> Result<(), ShopError> {
        if !self.repo.delete(id).await? {
            return Err(ShopError::SweetNotFound);
        }
        info!(sweet_id = %id, "sweet deleted");
        Ok(())
    }
}
