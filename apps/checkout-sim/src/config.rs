//! # Simulator Configuration
//!
//! Loads the settings a simulation runs with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the caller)        │
//! │     --registers 3                                                       │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     CHECKOUT_FLUSH_POLICY=fastest_register                              │
//! │     CHECKOUT_SECONDS_PER_NOTE=2                                         │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <path>, else                                               │
//! │     ~/.config/checkout-sim/checkout.toml (Linux)                        │
//! │     ~/Library/Application Support/com.checkout.checkout-sim/ (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! registers = 2
//!
//! [timing]
//! normal_item_seconds = 1
//! perishable_item_seconds = 2
//! seconds_per_note = 1
//!
//! [currency]
//! denominations = [1, 2, 5, 10, 20, 50]
//!
//! [policy]
//! flush = "bottleneck"
//! chain_reaction = "one_hop"
//! settlement = "least_change"
//! ```

use std::path::{Path, PathBuf};

use checkout_core::validation::validate_register_count;
use checkout_core::CheckoutConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_REGISTERS: &str = "CHECKOUT_REGISTERS";
pub const ENV_FLUSH_POLICY: &str = "CHECKOUT_FLUSH_POLICY";
pub const ENV_CHAIN_REACTION: &str = "CHECKOUT_CHAIN_REACTION";
pub const ENV_SETTLEMENT: &str = "CHECKOUT_SETTLEMENT";
pub const ENV_SECONDS_PER_NOTE: &str = "CHECKOUT_SECONDS_PER_NOTE";
pub const ENV_NORMAL_ITEM_SECONDS: &str = "CHECKOUT_NORMAL_ITEM_SECONDS";
pub const ENV_PERISHABLE_ITEM_SECONDS: &str = "CHECKOUT_PERISHABLE_ITEM_SECONDS";

const CONFIG_FILE_NAME: &str = "checkout.toml";

// =============================================================================
// Store Configuration
// =============================================================================

/// Settings of the simulated store that the core takes as arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Registers opened when a scenario does not say.
    #[serde(default = "default_registers")]
    pub registers: usize,
}

fn default_registers() -> usize {
    2
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            registers: default_registers(),
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Everything `checkout-sim` reads from its config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(flatten)]
    pub checkout: CheckoutConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist; the platform default may not)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        validate_register_count(self.store.registers)?;
        self.checkout.validate()?;
        Ok(())
    }

    /// Renders the configuration as a config file.
    pub fn to_toml(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_REGISTERS) {
            match value.parse::<usize>() {
                Ok(registers) => {
                    debug!(registers, "Overriding register count from environment");
                    self.store.registers = registers;
                }
                Err(_) => warn!(value = %value, "Invalid {} in environment", ENV_REGISTERS),
            }
        }

        let policy = &mut self.checkout.policy;

        if let Some(value) = lookup(ENV_FLUSH_POLICY) {
            match value.parse() {
                Ok(flush) => {
                    debug!(flush = %value, "Overriding flush policy from environment");
                    policy.flush = flush;
                }
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_FLUSH_POLICY),
            }
        }

        if let Some(value) = lookup(ENV_CHAIN_REACTION) {
            match value.parse() {
                Ok(mode) => {
                    debug!(chain_reaction = %value, "Overriding chain reaction from environment");
                    policy.chain_reaction = mode;
                }
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_CHAIN_REACTION),
            }
        }

        if let Some(value) = lookup(ENV_SETTLEMENT) {
            match value.parse() {
                Ok(preference) => policy.settlement = preference,
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_SETTLEMENT),
            }
        }

        let timing = &mut self.checkout.timing;
        let seconds = [
            (ENV_SECONDS_PER_NOTE, &mut timing.seconds_per_note),
            (ENV_NORMAL_ITEM_SECONDS, &mut timing.normal_item_seconds),
            (ENV_PERISHABLE_ITEM_SECONDS, &mut timing.perishable_item_seconds),
        ];
        for (key, field) in seconds {
            if let Some(value) = lookup(key) {
                match value.parse::<u64>() {
                    Ok(parsed) => *field = parsed,
                    Err(_) => warn!(value = %value, "Invalid {} in environment", key),
                }
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "checkout-sim")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
