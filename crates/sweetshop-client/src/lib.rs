//! Client library for the sweet shop API.
//!
//! [`ShopClient`] is a thin typed wrapper over the REST endpoints.
//! [`Storefront`] layers the storefront's session, cart and catalog view on top.

pub mod client;
pub mod error;
pub mod session;
pub mod storefront;

pub use client::ShopClient;
pub use error::ClientError;
pub use session::Session;
pub use storefront::{Storefront, ViewFilter};
