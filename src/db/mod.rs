//! Database client for accounts and tasks.
//!
//! Backed by libSQL, either in-memory (ephemeral, for development and
//! tests) or a file-backed SQLite database. The backend is selected from
//! configuration via [`StoreProvider`].
//!
//! The account table intentionally carries no uniqueness constraint on the
//! email column: repeated seeding produces duplicate accounts, and lookups
//! resolve to exactly one row per email.

#![allow(missing_docs)]

pub mod store;

pub use store::{Account, Store, Task, TaskOwner, TaskWithOwner};

use crate::types::Result;

/// Store backend configuration
#[derive(Debug, Clone, Default)]
pub enum StoreProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl StoreProvider {
    /// Create a store from this provider configuration
    pub async fn create_store(&self) -> Result<Store> {
        match self {
            StoreProvider::Memory => Store::new_memory().await,
            StoreProvider::SQLite { path } => Store::new_local(path).await,
        }
    }

    /// Interpret a configured database URL. `:memory:` (or an empty
    /// string) selects the in-memory backend; anything else is a file path.
    pub fn from_url(url: &str) -> Self {
        if url.is_empty() || url == ":memory:" {
            StoreProvider::Memory
        } else {
            StoreProvider::SQLite {
                path: url.to_string(),
            }
        }
    }
}
