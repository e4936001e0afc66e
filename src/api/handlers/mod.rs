//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Account seeding handlers.
pub mod accounts;
/// Authentication handlers (login).
pub mod auth;
/// Health probe handler.
pub mod health;
/// Task CRUD and seeding handlers.
#[cfg(feature = "tasks")]
pub mod tasks;
