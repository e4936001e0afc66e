//! TOML-based configuration for Tally
//!
//! Declarative configuration for the server, authentication, and database
//! via a TOML file (`tally.toml`). Secrets are never stored in the file
//! itself; the `[auth]` section names the environment variable that holds
//! the JWT signing secret.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure loaded from tally.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT signing secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Token validity in seconds
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_token_expiry() -> i64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_expiry: default_token_expiry(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database path, or `:memory:` for an ephemeral store
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "./data/tally.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl TallyConfig {
    /// Load configuration from a TOML file. A missing file yields the
    /// defaults so a bare `tally-server` still starts.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            AppError::InvalidInput(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolve the JWT signing secret from the environment variable named
    /// in `[auth]`. The secret itself never lives in the config file.
    pub fn resolve_jwt_secret(&self) -> Result<String> {
        std::env::var(&self.auth.jwt_secret_env).map_err(|_| {
            AppError::Internal(format!(
                "environment variable {} is not set",
                self.auth.jwt_secret_env
            ))
        })
    }

    /// Render the default configuration as a commented TOML document,
    /// used by `tally-server init`.
    pub fn default_toml() -> String {
        let mut doc = String::new();
        doc.push_str("# Tally server configuration\n\n");
        doc.push_str("[server]\n");
        doc.push_str("host = \"127.0.0.1\"\n");
        doc.push_str("port = 3000\n");
        doc.push_str("log_level = \"info\"\n\n");
        doc.push_str("[auth]\n");
        doc.push_str("# Name of the environment variable holding the JWT signing secret\n");
        doc.push_str("jwt_secret_env = \"JWT_SECRET\"\n");
        doc.push_str("# Token validity in seconds\n");
        doc.push_str("token_expiry = 3600\n\n");
        doc.push_str("[database]\n");
        doc.push_str("# Database path, or \":memory:\" for an ephemeral store\n");
        doc.push_str("url = \"./data/tally.db\"\n");
        doc
    }
}
