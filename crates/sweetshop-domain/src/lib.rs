//! Domain types shared by the shop service and its clients.
//!
//! This crate contains only pure types with no framework dependencies.
//! The serde representation of each type is its wire format.

pub mod id;
pub mod sweet;
pub mod user;
