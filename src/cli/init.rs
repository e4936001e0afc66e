//! Init command implementation
//!
//! Scaffolds a new Tally project: tally.toml, .env.example, and the
//! data directory.

use super::output::Output;
use crate::utils::config::TallyConfig;
use std::fs;
use std::path::Path;

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (tally.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Run the init command
pub fn run(base_path: &Path, force: bool, output: &Output) -> InitResult {
    let config_path = base_path.join("tally.toml");
    if config_path.exists() && !force {
        output.warning("tally.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let data_dir = base_path.join("data");
    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data directory: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    } else {
        output.skipped("data", "already exists");
    }

    if let Err(e) = fs::write(&config_path, TallyConfig::default_toml()) {
        output.error(&format!("Failed to create tally.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "tally.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = fs::write(&env_example_path, generate_env_example()) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    output.complete("Project initialized");
    output.info("Next steps:");
    output.command("cp .env.example .env   # then set a strong JWT_SECRET");
    output.command("tally-server");

    InitResult::Success
}

fn generate_env_example() -> String {
    let mut env = String::new();
    env.push_str("# Secret used to sign bearer tokens. Use a strong random value\n");
    env.push_str("# of at least 32 characters; rotate by restarting with a new value.\n");
    env.push_str("JWT_SECRET=change-me-to-a-long-random-string\n");
    env
}
