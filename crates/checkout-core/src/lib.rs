//! # checkout-core: Pure Simulation Logic for the Checkout Simulator
//!
//! This crate holds every rule of the store: what a wallet may contain, how
//! a customer settles a cart, how long a register takes, where a new
//! customer queues and when the whole store is flushed. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Simulator Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-sim (CLI)                           │   │
//! │  │   config file + env ──► scenario.toml ──► report / JSON         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ settlement│  │  register │  │ admission │  │  checkout │  │   │
//! │  │   │  solver   │  │ time model│  │  shortest │  │   flush   │  │   │
//! │  │   │           │  │  chaining │  │   queue   │  │   time    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS IN RESULTS • PURE RULES     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-unit money amounts
//! - [`note`] - Notes and the set of legal denominations
//! - [`types`] - Items, carts, wallets and customers
//! - [`settlement`] - Which notes a customer hands over
//! - [`register`] - Per-register scan and payment time
//! - [`admission`] - Validation and shortest-queue placement
//! - [`checkout`] - The store and its flush time
//! - [`config`] - Timing, currency and policy settings
//! - [`error`] - Domain error types
//! - [`validation`] - Rule checks shared by the modules above
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{CartItem, Checkout, CheckoutConfig, Customer, DenominationSet, Wallet};
//!
//! let notes = DenominationSet::default();
//! let mut checkout = Checkout::with_empty_registers(2, CheckoutConfig::default()).unwrap();
//!
//! let alice = Customer::new(
//!     Wallet::new(notes.notes(&[5, 10, 2]).unwrap()),
//!     vec![CartItem::perishable(12)],
//! );
//! let bob = Customer::new(Wallet::new(notes.notes(&[2]).unwrap()), vec![CartItem::normal(2)]);
//!
//! assert_eq!(checkout.admit(alice).unwrap(), 0);
//! assert_eq!(checkout.admit(bob).unwrap(), 1);
//!
//! // Slowest register: a perishable item (2 s) paid with a 10 and a 2 (2 s).
//! assert_eq!(checkout.flush_time().unwrap(), 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admission;
pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod note;
pub mod register;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Checkout, FlushPolicy, FlushReport};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use money::Money;
pub use note::{DenominationSet, Note};
pub use register::{ChainReaction, Register};
pub use settlement::{settle, settle_with, Settlement, SettlementPreference};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Notes a store accepts unless configured otherwise.
pub const DEFAULT_DENOMINATIONS: [u64; 6] = [1, 2, 5, 10, 20, 50];

/// Seconds to scan a normal item.
pub const DEFAULT_NORMAL_ITEM_SECONDS: u64 = ItemKind::Normal.scan_weight();

/// Seconds to scan a perishable item.
pub const DEFAULT_PERISHABLE_ITEM_SECONDS: u64 = ItemKind::Perishable.scan_weight();

/// Seconds a cashier spends on each note handed over.
pub const DEFAULT_SECONDS_PER_NOTE: u64 = 1;

/// Upper bound on registers in one store.
///
/// Admission scans every queue, so this keeps a mistyped register count
/// from allocating thousands of queues.
pub const MAX_REGISTERS: usize = 64;
