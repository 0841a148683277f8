//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_PATH` - Path to the catalog JSON file
//!   (default: `content/catalog.json`)

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine application configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the catalog JSON file.
    pub catalog_path: PathBuf,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_path = get_env_or_default("CATALOG_PATH", "content/catalog.json");
        if raw_path.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_PATH".to_string(),
                "path is empty".to_string(),
            ));
        }

        Ok(Self {
            catalog_path: PathBuf::from(raw_path),
        })
    }

    /// Load and validate the catalog this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::load(&self.catalog_path)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_missing_file() {
        let config = EngineConfig {
            catalog_path: PathBuf::from("does/not/exist.json"),
        };
        assert!(matches!(config.load_catalog(), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("CATALOG_PATH".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CATALOG_PATH"
        );
    }
}
