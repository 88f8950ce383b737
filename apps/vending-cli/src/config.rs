//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VENDING_*`)
//! 2. Defaults (this file)
//!
//! The product catalog is built into `vending-core` and is not configurable.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization.

use std::env;

/// Machine name used in the banners when nothing else is configured.
pub const DEFAULT_MACHINE_NAME: &str = "Luigi's Vending Machine";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingConfig {
    /// Name shown in the greeting and farewell banners.
    pub machine_name: String,

    /// Treat a negative amount at the payment prompt as malformed input
    /// instead of letting it fail the insufficient-funds check.
    pub reject_negative_payments: bool,
}

impl Default for VendingConfig {
    /// ## Default Values
    /// - Name: "Luigi's Vending Machine"
    /// - Negative payments: reach the funds check (rejected there)
    fn default() -> Self {
        VendingConfig {
            machine_name: DEFAULT_MACHINE_NAME.to_string(),
            reject_negative_payments: false,
        }
    }
}

impl VendingConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VENDING_MACHINE_NAME`: Override the banner name
    /// - `VENDING_REJECT_NEGATIVE_PAYMENTS`: `true`/`false`/`1`/`0`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`VendingConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = VendingConfig::default();

        if let Some(name) = lookup("VENDING_MACHINE_NAME") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "VENDING_MACHINE_NAME".to_string(),
                ));
            }
            config.machine_name = name.to_string();
        }

        if let Some(flag) = lookup("VENDING_REJECT_NEGATIVE_PAYMENTS") {
            config.reject_negative_payments = parse_flag(&flag).ok_or_else(|| {
                ConfigError::InvalidValue("VENDING_REJECT_NEGATIVE_PAYMENTS".to_string())
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = VendingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VendingConfig::default());
        assert_eq!(config.machine_name, "Luigi's Vending Machine");
        assert!(!config.reject_negative_payments);
    }

    #[test]
    fn test_overrides() {
        let config = VendingConfig::from_lookup(lookup(&[
            ("VENDING_MACHINE_NAME", " Mario's Snacks "),
            ("VENDING_REJECT_NEGATIVE_PAYMENTS", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.machine_name, "Mario's Snacks");
        assert!(config.reject_negative_payments);

        let config =
            VendingConfig::from_lookup(lookup(&[("VENDING_REJECT_NEGATIVE_PAYMENTS", "0")]))
                .unwrap();
        assert!(!config.reject_negative_payments);
    }

    #[test]
    fn test_invalid_values() {
        let err = VendingConfig::from_lookup(lookup(&[(
            "VENDING_REJECT_NEGATIVE_PAYMENTS",
            "maybe",
        )]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for VENDING_REJECT_NEGATIVE_PAYMENTS"
        );

        assert!(VendingConfig::from_lookup(lookup(&[("VENDING_MACHINE_NAME", "  ")])).is_err());
    }
}
