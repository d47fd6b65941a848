//! Application configuration management.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Cash register configuration.
    #[serde(default)]
    pub cash: CashConfig,
    /// Provider fallback cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

/// Cash register configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CashConfig {
    /// Display currency for every monetary value.
    #[serde(default)]
    pub currency: Currency,
    /// IANA time zone the business day is counted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Opening balance used until an operator sets one for the day.
    #[serde(default)]
    pub opening_balance: Decimal,
}

impl Default for CashConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            timezone: default_timezone(),
            opening_balance: Decimal::ZERO,
        }
    }
}

fn default_timezone() -> String {
    "Asia/Karachi".to_string()
}

impl CashConfig {
    /// Parses the configured time zone.
    pub fn timezone(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Configuration(format!("invalid timezone '{}': {e}", self.timezone)))
    }
}

/// Provider fallback cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached provider answers.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    /// Time-to-live of a cached answer in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_cache_ttl() -> u64 {
    900 // 15 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CASHDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
