//! # Tally - minimal task-list server
//!
//! A small REST backend: seeded demo accounts, password login issuing a
//! signed bearer token, and a per-account to-do list stored in libSQL.
//!
//! ## Overview
//!
//! Tally can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `tally-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start
//!
//! ```bash
//! tally-server init        # scaffold tally.toml and .env.example
//! export JWT_SECRET=...    # or put it in .env
//! tally-server             # start listening
//! ```
//!
//! Then seed accounts and log in:
//!
//! ```text
//! GET  /api/accounts/seed
//! POST /api/auth/login          {"email": "admin@dci.de", "password": "admin"}
//!   -> {"token": "<signed JWT>"}
//! ```
//!
//! The task routes accept the token as `Authorization: Bearer <token>`.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tasks` | To-do list routes (default) |
//! | `swagger-ui` | Interactive API documentation at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password hashing, JWT issuance, and middleware
//! - [`db`] - libSQL store for accounts and tasks
//! - [`cli`] - Command-line interface
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration loading
//!
//! ## Lifecycle
//!
//! The binary follows an explicit startup sequence: parse CLI → load
//! configuration → open the store → construct services → serve, with a
//! graceful shutdown on ctrl-c. No connection is opened as an import-time
//! side effect.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Credential verification, token issuance, and middleware.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// libSQL store for accounts and tasks.
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{Store, StoreProvider};
pub use types::{AppError, Result};
pub use utils::config::TallyConfig;

use crate::auth::jwt::AuthService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<TallyConfig>,
    /// Account and task store
    pub store: Arc<Store>,
    /// Authentication service
    pub auth_service: Arc<AuthService>,
}
