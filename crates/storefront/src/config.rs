//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROSEGOLD_STORAGE` - Durable storage backend: `file`, `memory` or `none` (default: file)
//! - `ROSEGOLD_DATA_DIR` - Directory holding persisted state for `file` (default: .rosegold)
//! - `ROSEGOLD_TOAST_DURATION_MS` - Default toast lifetime in milliseconds (default: 3000)
//! - `ROSEGOLD_TAX_RATE` - Tax rate applied to the order summary (default: 0.08)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::toast::DEFAULT_TOAST_DURATION_MS;

/// Default directory for file-backed storage.
pub const DEFAULT_DATA_DIR: &str = ".rosegold";

/// Default tax rate shown on the order summary.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// An unrecognised `ROSEGOLD_STORAGE` value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("expected file, memory or none (got {0})")]
pub struct ParseStorageModeError(String);

/// Which durable storage backend persists the cart and wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// One JSON file per key under [`StorefrontConfig::data_dir`].
    #[default]
    File,
    /// Process-local map; state is lost on exit.
    Memory,
    /// No backend at all; loads are empty and saves are skipped.
    Disabled,
}

impl FromStr for StorageMode {
    type Err = ParseStorageModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "none" | "disabled" => Ok(Self::Disabled),
            other => Err(ParseStorageModeError(other.to_string())),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Durable storage backend
    pub storage: StorageMode,
    /// Directory for file-backed storage
    pub data_dir: PathBuf,
    /// Duration applied to toasts that don't specify one
    pub toast_duration_ms: u64,
    /// Tax rate for the order summary (0.08 = 8%)
    pub tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            tax_rate: DEFAULT_TAX_RATE,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage = get_optional_env("ROSEGOLD_STORAGE")
            .map(|value| {
                value.parse::<StorageMode>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ROSEGOLD_STORAGE".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or_default();
        let data_dir = PathBuf::from(get_env_or_default("ROSEGOLD_DATA_DIR", DEFAULT_DATA_DIR));
        let toast_duration_ms = parse_toast_duration(
            "ROSEGOLD_TOAST_DURATION_MS",
            get_optional_env("ROSEGOLD_TOAST_DURATION_MS").as_deref(),
        )?;
        let tax_rate = parse_tax_rate(
            "ROSEGOLD_TAX_RATE",
            get_optional_env("ROSEGOLD_TAX_RATE").as_deref(),
        )?;

        Ok(Self {
            storage,
            data_dir,
            toast_duration_ms,
            tax_rate,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a toast duration; zero is rejected since every toast must expire.
fn parse_toast_duration(var_name: &str, raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TOAST_DURATION_MS);
    };
    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a tax rate in `[0, 1]`.
fn parse_tax_rate(var_name: &str, raw: Option<&str>) -> Result<Decimal, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TAX_RATE);
    };
    let rate = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if rate.is_sign_negative() || rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.storage, StorageMode::File);
        assert_eq!(config.data_dir, PathBuf::from(".rosegold"));
        assert_eq!(config.toast_duration_ms, 3000);
        assert_eq!(config.tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn test_storage_mode_parse() {
        assert_eq!("file".parse::<StorageMode>().unwrap(), StorageMode::File);
        assert_eq!(" Memory ".parse::<StorageMode>().unwrap(), StorageMode::Memory);
        assert_eq!("none".parse::<StorageMode>().unwrap(), StorageMode::Disabled);
        assert_eq!(
            "redis".parse::<StorageMode>().unwrap_err().to_string(),
            "expected file, memory or none (got redis)"
        );
    }

    #[test]
    fn test_toast_duration_default_and_override() {
        assert_eq!(parse_toast_duration("T", None).unwrap(), 3000);
        assert_eq!(parse_toast_duration("T", Some("1500")).unwrap(), 1500);
    }

    #[test]
    fn test_toast_duration_rejects_zero_and_garbage() {
        assert!(matches!(
            parse_toast_duration("T", Some("0")),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_toast_duration("T", Some("soon")).is_err());
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert_eq!(parse_tax_rate("T", None).unwrap(), Decimal::new(8, 2));
        assert_eq!(parse_tax_rate("T", Some("0.2")).unwrap(), Decimal::new(2, 1));
        assert!(parse_tax_rate("T", Some("-0.1")).is_err());
        assert!(parse_tax_rate("T", Some("1.5")).is_err());
        assert!(parse_tax_rate("T", Some("eight")).is_err());
    }
}
