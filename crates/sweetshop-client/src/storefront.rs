//! Storefront state: who is signed in, how many items they bought this
//! session, and a cached copy of the catalog with client-side filtering.

use std::collections::BTreeSet;

use sweetshop_domain::id::SweetId;
use sweetshop_domain::sweet::{Sweet, contains_ignore_case};

use crate::client::{ShopClient, SweetChanges, SweetDraft};
use crate::error::ClientError;
use crate::session::Session;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Client-side view over the cached catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the name. Empty matches everything.
    pub text: String,
    /// Exact category, or [`ALL_CATEGORIES`].
    pub category: String,
    /// Inclusive price range.
    pub price_range: (f64, f64),
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: ALL_CATEGORIES.to_owned(),
            price_range: (0.0, f64::INFINITY),
        }
    }
}

impl ViewFilter {
    pub fn matches(&self, sweet: &Sweet) -> bool {
        let (low, high) = self.price_range;
        contains_ignore_case(&sweet.name, &self.text)
            && (self.category == ALL_CATEGORIES || sweet.category == self.category)
            && sweet.price >= low
            && sweet.price <= high
    }
}

pub struct Storefront {
    client: ShopClient,
    session: Option<Session>,
    cart: u32,
    catalog: Option<Vec<Sweet>>,
}

impl Storefront {
    pub fn new(client: ShopClient) -> Self {
        Self {
            client,
            session: None,
            cart: 0,
            catalog: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Items purchased since sign-in.
    pub fn cart(&self) -> u32 {
        self.cart
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotSignedIn)
    }

    // ── Session ──────────────────────────────────────────────────────────

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        let login = self.client.login(email, password).await?;
        tracing::info!(user_id = %login.user.id, role = %login.user.role, "signed in");
        self.cart = 0;
        self.catalog = None;
        Ok(&*self.session.insert(Session {
            token: login.token,
            user: login.user,
        }))
    }

    /// Create an account and sign in with it.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        self.client.register(email, password).await?;
        self.sign_in(email, password).await
    }

    pub fn sign_out(&mut self) {
        self.session = None;
        self.cart = 0;
        self.catalog = None;
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    /// The catalog, fetched on first use after sign-in or after any change.
    pub async fn catalog(&mut self) -> Result<&[Sweet], ClientError> {
        if self.catalog.is_none() {
            let token = self.token()?;
            let sweets = self.client.list_sweets(&token).await?;
            tracing::debug!(count = sweets.len(), "catalog loaded");
            self.catalog = Some(sweets);
        }
        Ok(self.catalog.as_deref().unwrap_or_default())
    }

    fn invalidate(&mut self) {
        self.catalog = None;
    }

    /// Cached sweets passing `filter`, in catalog order. Empty until
    /// [`Storefront::catalog`] has loaded.
    pub fn visible(&self, filter: &ViewFilter) -> Vec<&Sweet> {
        self.cached().iter().filter(|s| filter.matches(s)).collect()
    }

    /// Highest cached price, for sizing the price slider.
    pub fn max_price(&self) -> Option<f64> {
        self.cached().iter().map(|s| s.price).reduce(f64::max)
    }

    /// Distinct cached categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.cached()
            .iter()
            .map(|s| s.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn cached(&self) -> &[Sweet] {
        self.catalog.as_deref().unwrap_or_default()
    }

    // ── Mutations ────────────────────────────────────────────────────────
    //
    // Every mutation drops the cached catalog so the next read sees the
    // server's quantities.

    pub async fn purchase(&mut self, id: SweetId) -> Result<(), ClientError> {
        let token = self.token()?;
        let result = self.client.purchase(&token, id).await;
        self.invalidate();
        result?;
        self.cart += 1;
        Ok(())
    }

    pub async fn create_sweet(&mut self, draft: &SweetDraft) -> Result<Sweet, ClientError> {
        let token = self.token()?;
        let result = self.client.create_sweet(&token, draft).await;
        self.invalidate();
        result
    }

    pub async fn update_sweet(
        &mut self,
        id: SweetId,
        changes: &SweetChanges,
    ) -> Result<Sweet, ClientError> {
        let token = self.token()?;
        let result = self.client.update_sweet(&token, id, changes).await;
        self.invalidate();
        result
    }

    pub async fn delete_sweet(&mut self, id: SweetId) -> Result<(), ClientError> {
        let token = self.token()?;
        let result = self.client.delete_sweet(&token, id).await;
        self.invalidate();
        result
    }

    pub async fn restock(&mut self, id: SweetId, quantity: i32) -> Result<(), ClientError> {
        let token = self.token()?;
        let result = self.client.restock(&token, id, quantity).await;
        self.invalidate();
        result
    }
}
