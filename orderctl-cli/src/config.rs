//! Environment loading for orderctl
//!
//! `.env` files are read in priority order:
//! 1. Current directory `.env`
//! 2. `~/.orderctl/.env`
//!
//! Variables already present in the environment are never overwritten.

use std::path::PathBuf;

use anyhow::{Context, Result};
use orderctl_server::DatabaseConfig;
use tracing::debug;

/// Get the orderctl config directory path (~/.orderctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".orderctl"))
}

/// Load `.env` files into the process environment.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

/// Load `.env` files, then read database settings from the environment.
pub fn database_config() -> Result<DatabaseConfig> {
    load_dotenv();
    DatabaseConfig::from_env().context(
        "Database settings missing. Set DATABASE_NAME, DATABASE_USER, DATABASE_PASSWORD \
         and DATABASE_HOST, or add them to ./.env or ~/.orderctl/.env",
    )
}
