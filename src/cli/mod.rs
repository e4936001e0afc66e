//! CLI module for Tally
//!
//! Provides command-line parsing for the tally-server binary. Uses clap
//! for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally - minimal task-list server
///
/// Seeded demo accounts, JWT login, and a per-account to-do list over
/// libSQL storage.
#[derive(Parser, Debug)]
#[command(
    name = "tally-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Tally - minimal task-list server with JWT authentication",
    after_help = "EXAMPLES:\n    \
                  tally-server init             # Scaffold tally.toml and .env.example\n    \
                  tally-server                  # Start the server (reads tally.toml)\n    \
                  tally-server --config my.toml # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "tally.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Tally project with configuration files
    ///
    /// Creates tally.toml and .env.example in the target directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
