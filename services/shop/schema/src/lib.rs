//! sea-orm entities for the shop database.

pub mod sweets;
pub mod users;
