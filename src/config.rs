use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::LibraryError, fee::FeePolicy};

/// Default number of lending records kept in memory
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Tunable settings for a `LibraryManager`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Late fee constants
    pub fee: FeePolicy,
    /// Maximum number of history entries to keep
    pub max_history_size: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { fee: FeePolicy::default(), max_history_size: DEFAULT_MAX_HISTORY_SIZE }
    }
}

impl LibraryConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the text is not valid TOML for this
    /// structure or if any fee constant is negative or not finite
    pub fn from_toml_str(contents: &str) -> Result<Self, LibraryError> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| LibraryError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The contents fail to parse or validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LibraryError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded library configuration from {}", path.display());
        log::debug!("Config: {config:?}");
        Ok(config)
    }

    /// Check that every fee constant is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` naming the first offending constant
    pub fn validate(&self) -> Result<(), LibraryError> {
        let fee = &self.fee;
        for (name, value) in [
            ("base_rate_per_day", fee.base_rate_per_day),
            ("bestseller_multiplier", fee.bestseller_multiplier),
            ("premium_discount", fee.premium_discount),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LibraryError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
