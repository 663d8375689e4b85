//! Auth types shared by the shop service and its test helpers.
//!
//! Provides JWT issuing and validation, plus the `Identity` and
//! `AdminIdentity` bearer-token extractors.

pub mod identity;
pub mod token;
