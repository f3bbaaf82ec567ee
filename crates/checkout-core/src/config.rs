//! # Checkout Configuration
//!
//! Plain serde types describing how a store is simulated. Nothing in here
//! reads files or the environment; `checkout-sim` does that and hands the
//! result over.
//!
//! ## Configuration File Format
//! ```toml
//! [timing]
//! normal_item_seconds = 1
//! perishable_item_seconds = 2
//! seconds_per_note = 1
//!
//! [currency]
//! denominations = [1, 2, 5, 10, 20, 50]
//!
//! [policy]
//! flush = "bottleneck"          # bottleneck | fastest_register
//! chain_reaction = "one_hop"    # one_hop | cascading
//! settlement = "least_change"   # least_change | fewest_notes
//! ```
//!
//! Every section and every field may be omitted.

use serde::{Deserialize, Serialize};

use crate::checkout::FlushPolicy;
use crate::error::ValidationError;
use crate::note::DenominationSet;
use crate::register::ChainReaction;
use crate::settlement::SettlementPreference;
use crate::types::ItemKind;
use crate::validation::{validate_denominations, validate_seconds};
use crate::{DEFAULT_NORMAL_ITEM_SECONDS, DEFAULT_PERISHABLE_ITEM_SECONDS, DEFAULT_SECONDS_PER_NOTE};

// =============================================================================
// Timing
// =============================================================================

/// Seconds a cashier spends per unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Seconds to scan one normal item.
    #[serde(default = "default_normal_item_seconds")]
    pub normal_item_seconds: u64,

    /// Seconds to scan one perishable item.
    #[serde(default = "default_perishable_item_seconds")]
    pub perishable_item_seconds: u64,

    /// Seconds per note handed over.
    #[serde(default = "default_seconds_per_note")]
    pub seconds_per_note: u64,
}

fn default_normal_item_seconds() -> u64 {
    DEFAULT_NORMAL_ITEM_SECONDS
}

fn default_perishable_item_seconds() -> u64 {
    DEFAULT_PERISHABLE_ITEM_SECONDS
}

fn default_seconds_per_note() -> u64 {
    DEFAULT_SECONDS_PER_NOTE
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            normal_item_seconds: default_normal_item_seconds(),
            perishable_item_seconds: default_perishable_item_seconds(),
            seconds_per_note: default_seconds_per_note(),
        }
    }
}

impl TimingConfig {
    /// Scan seconds for one item of `kind`.
    pub fn seconds_for(&self, kind: ItemKind) -> u64 {
        match kind {
            ItemKind::Normal => self.normal_item_seconds,
            ItemKind::Perishable => self.perishable_item_seconds,
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Which notes exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default)]
    pub denominations: DenominationSet,
}

// =============================================================================
// Policies
// =============================================================================

/// The three behaviour switches of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// How register times combine into the store flush time.
    #[serde(default)]
    pub flush: FlushPolicy,

    /// Whether the exact-change discount compounds.
    #[serde(default)]
    pub chain_reaction: ChainReaction,

    /// How the settlement solver ranks candidate payments.
    #[serde(default)]
    pub settlement: SettlementPreference,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

impl CheckoutConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_seconds("normal_item_seconds", self.timing.normal_item_seconds)?;
        validate_seconds("perishable_item_seconds", self.timing.perishable_item_seconds)?;
        validate_seconds("seconds_per_note", self.timing.seconds_per_note)?;
        validate_denominations(self.currency.denominations.values())?;
        Ok(())
    }

    /// The legal notes for this store.
    pub fn denominations(&self) -> &DenominationSet {
        &self.currency.denominations
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
