//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MESA_TOLERANCE=1e-4                                                │
//! │     MESA_REQUIRE_CLOSED_CHAIN=true                                     │
//! │     MESA_LOG=debug                                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or MESA_CONFIG=PATH                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     house discount policy, tolerance 1e-6                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # mesa.toml
//! log_filter = "info,mesa=debug"
//!
//! [billing]
//! total_threshold = 8000000   # cents
//! total_rate_bps = 2000
//!
//! [geometry]
//! tolerance = 1e-6
//! require_closed_chain = false
//! ```

use std::path::{Path, PathBuf};

use mesa_billing::DiscountPolicy;
use mesa_geometry::GeometryConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_LOG_FILTER: &str = "info,mesa=debug";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesaConfig {
    #[serde(default)]
    pub billing: DiscountPolicy,

    #[serde(default)]
    pub geometry: GeometryConfig,

    /// `tracing_subscriber` filter directives.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Filter used while the config file is being read: `MESA_LOG`, else the
/// default. The file's `log_filter` only applies once loading is done.
pub fn startup_log_filter(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("MESA_LOG")
        .filter(|filter| !filter.trim().is_empty())
        .unwrap_or_else(default_log_filter)
}

impl Default for MesaConfig {
    fn default() -> Self {
        MesaConfig {
            billing: DiscountPolicy::default(),
            geometry: GeometryConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl MesaConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `MESA_CONFIG`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path.or_else(|| std::env::var_os("MESA_CONFIG").map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Rates at most 100%, non-negative thresholds, positive finite tolerance.
    pub fn validate(&self) -> ConfigResult<()> {
        self.billing
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("billing: {e}")))?;

        if !self.geometry.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "geometry: tolerance must be a finite number greater than 0, got {}",
                self.geometry.tolerance
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `MESA_*` overrides read through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("MESA_TOLERANCE") {
            match raw.parse::<f64>() {
                Ok(tolerance) => {
                    debug!(tolerance, "Overriding tolerance from environment");
                    self.geometry.tolerance = tolerance;
                }
                Err(_) => warn!(value = %raw, "Ignoring unparseable MESA_TOLERANCE"),
            }
        }

        if let Some(raw) = lookup("MESA_REQUIRE_CLOSED_CHAIN") {
            match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.geometry.require_closed_chain = true,
                "0" | "false" | "no" => self.geometry.require_closed_chain = false,
                _ => warn!(value = %raw, "Ignoring unparseable MESA_REQUIRE_CLOSED_CHAIN"),
            }
        }

        if let Some(filter) = lookup("MESA_LOG") {
            self.log_filter = filter;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = MesaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.billing, DiscountPolicy::default());
    }

    #[test]
    fn test_partial_file() {
        let config: MesaConfig = toml::from_str(
            r#"
            [billing]
            total_rate_bps = 2500

            [geometry]
            require_closed_chain = true
            "#,
        )
        .unwrap();

        assert_eq!(config.billing.total_rate_bps, 2500);
        assert_eq!(config.billing.seafood_rate_bps, 1000);
        assert!(config.geometry.require_closed_chain);
        assert_eq!(config.geometry.tolerance, 1e-6);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MesaConfig::default();
        config.apply_overrides(env(&[
            ("MESA_TOLERANCE", "0.001"),
            ("MESA_REQUIRE_CLOSED_CHAIN", "TRUE"),
            ("MESA_LOG", "warn"),
        ]));

        assert_eq!(config.geometry.tolerance, 0.001);
        assert!(config.geometry.require_closed_chain);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_startup_filter_precedes_file_filter() {
        assert_eq!(startup_log_filter(env(&[])), DEFAULT_LOG_FILTER);
        assert_eq!(startup_log_filter(env(&[("MESA_LOG", "trace")])), "trace");
        assert_eq!(startup_log_filter(env(&[("MESA_LOG", " ")])), DEFAULT_LOG_FILTER);

        // A file filter is picked up on load, after the startup filter is in place.
        let mut config: MesaConfig = toml::from_str(r#"log_filter = "warn""#).unwrap();
        config.apply_overrides(env(&[]));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = MesaConfig::default();
        config.apply_overrides(env(&[
            ("MESA_TOLERANCE", "tiny"),
            ("MESA_REQUIRE_CLOSED_CHAIN", "maybe"),
        ]));
        assert_eq!(config, MesaConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MesaConfig::default();
        config.billing.seafood_rate_bps = 10_001;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = MesaConfig::default();
        config.geometry.tolerance = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = MesaConfig::default();
        config.log_filter = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = MesaConfig::from_file(Path::new("/definitely/not/here/mesa.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_toml_error() {
        let path =
            std::env::temp_dir().join(format!("mesa-config-test-{}.toml", std::process::id()));
        std::fs::write(&path, "billing = [not toml").unwrap();
        let result = MesaConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
