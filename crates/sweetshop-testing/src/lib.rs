//! Test utilities for the shop service and client.
//!
//! Provides `MockAuth` bearer tokens and an in-memory database bootstrap.
//! Use from dev-dependencies only, never in production code.

pub mod auth;
pub mod db;
