//! # Checkout
//!
//! The store: a fixed set of registers plus the configuration they are
//! evaluated with.
//!
//! ## Store Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Checkout                                       │
//! │                                                                         │
//! │  admit(customer) ──► admission::admit ──► registers[i].enqueue          │
//! │                                                                         │
//! │  flush_time() ─────► for each register: scan + payment                  │
//! │                      └─► FlushPolicy::combine                           │
//! │                            Bottleneck      = max (default)              │
//! │                            FastestRegister = min                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `admit` needs `&mut self` and the flush calculations only `&self`, so a
//! flush computation never observes a half-finished admission.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::admission;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult, ValidationError};
use crate::register::{QueueTimes, Register, RegisterReport};
use crate::types::Customer;
use crate::validation::validate_register_count;

// =============================================================================
// Flush Policy
// =============================================================================

/// How register times combine into the store's flush time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// The store is flushed once its slowest register is done.
    #[default]
    Bottleneck,
    /// Time until the first register runs dry.
    FastestRegister,
}

impl FlushPolicy {
    /// Combines per-register totals. Zero for no registers.
    pub fn combine(&self, totals: impl IntoIterator<Item = u64>) -> u64 {
        let totals = totals.into_iter();
        let combined = match self {
            FlushPolicy::Bottleneck => totals.max(),
            FlushPolicy::FastestRegister => totals.min(),
        };
        combined.unwrap_or(0)
    }
}

impl fmt::Display for FlushPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushPolicy::Bottleneck => write!(f, "bottleneck"),
            FlushPolicy::FastestRegister => write!(f, "fastest_register"),
        }
    }
}

impl FromStr for FlushPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "bottleneck" | "max" | "slowest" => Ok(FlushPolicy::Bottleneck),
            "fastest_register" | "min" | "fastest" => Ok(FlushPolicy::FastestRegister),
            other => Err(ValidationError::InvalidFormat {
                field: "flush".to_string(),
                reason: format!("unknown policy '{}', expected bottleneck or fastest_register", other),
            }),
        }
    }
}

// =============================================================================
// Flush Report
// =============================================================================

/// Store-wide flush time with the per-register breakdown behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FlushReport {
    pub policy: FlushPolicy,
    pub flush_seconds: u64,
    pub registers: Vec<RegisterReport>,
}

// =============================================================================
// Checkout
// =============================================================================

/// A store with a fixed, non-empty set of registers.
#[derive(Debug, Clone)]
pub struct Checkout {
    registers: Vec<Register>,
    config: CheckoutConfig,
}

impl Checkout {
    /// Creates a store from existing registers.
    ///
    /// ## Errors
    /// - `NoRegisters` when `registers` is empty
    /// - `Validation` when there are too many registers or the config is invalid
    pub fn new(registers: Vec<Register>, config: CheckoutConfig) -> CheckoutResult<Self> {
        if registers.is_empty() {
            return Err(CheckoutError::NoRegisters);
        }
        validate_register_count(registers.len())?;
        config.validate()?;

        debug!(registers = registers.len(), policy = %config.policy.flush, "Opening checkout");
        Ok(Checkout { registers, config })
    }

    /// Creates a store with `count` empty registers.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Checkout, CheckoutConfig};
    ///
    /// let checkout = Checkout::with_empty_registers(2, CheckoutConfig::default()).unwrap();
    /// assert_eq!(checkout.registers().len(), 2);
    /// assert_eq!(checkout.flush_time().unwrap(), 0);
    /// ```
    pub fn with_empty_registers(count: usize, config: CheckoutConfig) -> CheckoutResult<Self> {
        Checkout::new((0..count).map(|_| Register::new()).collect(), config)
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Admits a customer to the shortest queue; returns the register index.
    pub fn admit(&mut self, customer: Customer) -> CheckoutResult<usize> {
        admission::admit(&mut self.registers, customer)
    }

    /// Scan and payment time of every register, in register order.
    pub fn register_times(&self) -> CheckoutResult<Vec<QueueTimes>> {
        self.registers
            .iter()
            .map(|register| register.times(&self.config))
            .collect()
    }

    /// Time until the store is flushed under the configured policy.
    ///
    /// Only fails with `SettlementUnreachable`, which admission rules out.
    pub fn flush_time(&self) -> CheckoutResult<u64> {
        let times = self.register_times()?;
        let flush = self
            .config
            .policy
            .flush
            .combine(times.iter().map(QueueTimes::total));

        debug!(flush_seconds = flush, policy = %self.config.policy.flush, "Computed flush time");
        Ok(flush)
    }

    /// Flush time plus a per-register, per-customer breakdown.
    pub fn flush_report(&self) -> CheckoutResult<FlushReport> {
        let registers = self
            .registers
            .iter()
            .enumerate()
            .map(|(index, register)| register.report(index, &self.config))
            .collect::<CheckoutResult<Vec<_>>>()?;

        let policy = self.config.policy.flush;
        let flush_seconds = policy.combine(registers.iter().map(|r| r.total_seconds));

        Ok(FlushReport {
            policy,
            flush_seconds,
            registers,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
