//! # Register Time Model
//!
//! How long one cash register needs to work through its queue.
//!
//! ## Time Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  scan time    = Σ normal items × normal_item_seconds                    │
//! │               + Σ perishable items × perishable_item_seconds            │
//! │                                                                         │
//! │  payment time = fold over the queue, in order:                          │
//! │                                                                         │
//! │    cannot afford cart ──► 0 seconds, chain broken (skipped)             │
//! │    previous paid exact ─► 0 seconds (discounted)                        │
//! │    otherwise ───────────► notes used × seconds_per_note (counted)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Chain Reaction
//! A cashier who hands back no change serves the next customer without a
//! counting delay. With [`ChainReaction::OneHop`] the discount reaches only
//! the immediate next customer: afterwards that customer's own change decides
//! again. With [`ChainReaction::Cascading`] a discounted customer counts as
//! exact too, so the whole rest of the queue pays for free until a skipped
//! customer breaks the chain.
//!
//! ```text
//! queue:   [5,2] pays 7   [5,10] pays 7   [2,1] pays 2
//! OneHop:     2 notes    +   discounted  +   1 note     = 3 s
//! Cascading:  2 notes    +   discounted  +   discounted = 2 s
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::{CheckoutConfig, TimingConfig};
use crate::error::{CheckoutResult, ValidationError};
use crate::money::Money;
use crate::settlement::{settle_with, Settlement};
use crate::types::Customer;

// =============================================================================
// Chain Reaction
// =============================================================================

/// How far the exact-change discount propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChainReaction {
    /// Only the customer right after an exact payment is free.
    #[default]
    OneHop,
    /// Every customer after an exact payment is free until the chain breaks.
    Cascading,
}

impl fmt::Display for ChainReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainReaction::OneHop => write!(f, "one_hop"),
            ChainReaction::Cascading => write!(f, "cascading"),
        }
    }
}

impl FromStr for ChainReaction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "one_hop" | "onehop" | "single" => Ok(ChainReaction::OneHop),
            "cascading" | "cascade" => Ok(ChainReaction::Cascading),
            other => Err(ValidationError::InvalidFormat {
                field: "chain_reaction".to_string(),
                reason: format!("unknown mode '{}', expected one_hop or cascading", other),
            }),
        }
    }
}

// =============================================================================
// Register
// =============================================================================

/// A cash register and the customers queued at it, in arrival order.
///
/// The queue only grows, and only through [`crate::admission::admit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    customers: Vec<Customer>,
}

impl Register {
    /// An empty register.
    pub fn new() -> Self {
        Register::default()
    }

    /// A register restored from an existing queue snapshot.
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Register { customers }
    }

    /// Queued customers in processing order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub(crate) fn enqueue(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    /// Scan and payment time for this register's queue.
    pub fn times(&self, config: &CheckoutConfig) -> CheckoutResult<QueueTimes> {
        queue_times(&self.customers, config)
    }

    /// Full per-customer breakdown for this register.
    pub fn report(&self, index: usize, config: &CheckoutConfig) -> CheckoutResult<RegisterReport> {
        let simulation = simulate_queue(&self.customers, config)?;

        Ok(RegisterReport {
            index,
            queue_length: self.customers.len(),
            scan_seconds: simulation.times.scan_seconds,
            payment_seconds: simulation.times.payment_seconds,
            total_seconds: simulation.times.total(),
            customers: simulation.customers,
        })
    }
}

// =============================================================================
// Results
// =============================================================================

/// Time one register needs for its queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct QueueTimes {
    pub scan_seconds: u64,
    pub payment_seconds: u64,
}

impl QueueTimes {
    /// Scan plus payment time.
    #[inline]
    pub fn total(&self) -> u64 {
        self.scan_seconds + self.payment_seconds
    }
}

/// What happened to one customer's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Notes were counted and charged time.
    Counted,
    /// Free because the chain reaction applied.
    Discounted,
    /// Wallet could not cover the cart; no payment happened.
    Skipped,
}

/// Timing of one queued customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CustomerTiming {
    pub customer_id: String,
    pub cart_price: Money,
    pub scan_seconds: u64,
    pub payment_seconds: u64,
    pub outcome: PaymentOutcome,
    /// Absent for skipped customers.
    pub settlement: Option<Settlement>,
}

/// Per-customer timings plus their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSimulation {
    pub times: QueueTimes,
    pub customers: Vec<CustomerTiming>,
}

/// One register's section of a flush report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RegisterReport {
    pub index: usize,
    pub queue_length: usize,
    pub scan_seconds: u64,
    pub payment_seconds: u64,
    pub total_seconds: u64,
    pub customers: Vec<CustomerTiming>,
}

// =============================================================================
// Time Model
// =============================================================================

/// Scan time of a whole queue.
pub fn scan_time(customers: &[Customer], timing: &TimingConfig) -> u64 {
    customers
        .iter()
        .map(|customer| customer_scan_seconds(customer, timing))
        .sum()
}

fn customer_scan_seconds(customer: &Customer, timing: &TimingConfig) -> u64 {
    customer
        .items
        .iter()
        .map(|item| timing.seconds_for(item.kind))
        .sum()
}

/// Scan and payment time of a queue.
///
/// ## Errors
/// Only `SettlementUnreachable`, which cannot happen for a customer whose
/// funds cover the cart.
pub fn queue_times(customers: &[Customer], config: &CheckoutConfig) -> CheckoutResult<QueueTimes> {
    simulate_queue(customers, config).map(|simulation| simulation.times)
}

/// Runs the queue in order and records what happened to every customer.
pub fn simulate_queue(
    customers: &[Customer],
    config: &CheckoutConfig,
) -> CheckoutResult<QueueSimulation> {
    let timing = &config.timing;
    let mut times = QueueTimes::default();
    let mut timings = Vec::with_capacity(customers.len());
    let mut previous_exact = false;

    for customer in customers {
        let scan_seconds = customer_scan_seconds(customer, timing);
        let cart_price = customer.cart_price().unwrap_or(Money::MAX);
        times.scan_seconds += scan_seconds;

        if !customer.can_afford() {
            debug!(
                customer = %customer.id,
                funds = %customer.funds(),
                price = %cart_price,
                "Skipping customer who cannot pay"
            );
            previous_exact = false;
            timings.push(CustomerTiming {
                customer_id: customer.id.clone(),
                cart_price,
                scan_seconds,
                payment_seconds: 0,
                outcome: PaymentOutcome::Skipped,
                settlement: None,
            });
            continue;
        }

        let settlement = settle_with(customer.wallet.notes(), cart_price, config.policy.settlement)?;

        let (payment_seconds, outcome) = if previous_exact {
            debug!(customer = %customer.id, "Previous customer paid exact, payment is free");
            (0, PaymentOutcome::Discounted)
        } else {
            (
                settlement.note_count() as u64 * timing.seconds_per_note,
                PaymentOutcome::Counted,
            )
        };

        previous_exact = match (outcome, config.policy.chain_reaction) {
            (PaymentOutcome::Discounted, ChainReaction::Cascading) => true,
            _ => settlement.is_exact(),
        };

        times.payment_seconds += payment_seconds;
        timings.push(CustomerTiming {
            customer_id: customer.id.clone(),
            cart_price,
            scan_seconds,
            payment_seconds,
            outcome,
            settlement: Some(settlement),
        });
    }

    Ok(QueueSimulation {
        times,
        customers: timings,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::DenominationSet;
    use crate::types::{CartItem, Wallet};

    fn customer(notes: &[u64], items: Vec<CartItem>) -> Customer {
        let wallet = Wallet::new(DenominationSet::default().notes(notes).unwrap());
        Customer::new(wallet, items)
    }

    fn chain_queue() -> Vec<Customer> {
        vec![
            customer(&[5, 2], vec![CartItem::perishable(7)]),
            customer(&[5, 10], vec![CartItem::normal(7)]),
            customer(&[2, 1], vec![CartItem::normal(2)]),
        ]
    }

    fn config_with(chain_reaction: ChainReaction) -> CheckoutConfig {
        let mut config = CheckoutConfig::default();
        config.policy.chain_reaction = chain_reaction;
        config
    }

    #[test]
    fn test_scan_time_weights_item_kinds() {
        let queue = vec![customer(
            &[],
            vec![CartItem::normal(0), CartItem::normal(0), CartItem::perishable(0)],
        )];
        let timing = TimingConfig {
            normal_item_seconds: 2,
            perishable_item_seconds: 3,
            seconds_per_note: 1,
        };

        assert_eq!(scan_time(&queue, &timing), 4 + 3);
    }

    #[test]
    fn test_empty_queue_takes_no_time() {
        let times = queue_times(&[], &CheckoutConfig::default()).unwrap();
        assert_eq!(times, QueueTimes::default());
        assert_eq!(times.total(), 0);
    }

    #[test]
    fn test_customer_without_items_takes_no_time() {
        let queue = vec![customer(&[], Vec::new())];
        let times = queue_times(&queue, &CheckoutConfig::default()).unwrap();
        assert_eq!(times.total(), 0);
    }

    #[test]
    fn test_one_second_per_note() {
        let queue = vec![customer(
            &[1, 5, 10, 2],
            vec![CartItem::normal(2), CartItem::normal(4), CartItem::perishable(10)],
        )];
        let times = queue_times(&queue, &CheckoutConfig::default()).unwrap();

        assert_eq!(times.payment_seconds, 3);
        assert_eq!(times.scan_seconds, 1 + 1 + 2);
    }

    #[test]
    fn test_chain_reaction_one_hop() {
        let simulation = simulate_queue(&chain_queue(), &config_with(ChainReaction::OneHop)).unwrap();
        let outcomes: Vec<PaymentOutcome> =
            simulation.customers.iter().map(|c| c.outcome).collect();

        assert_eq!(
            outcomes,
            vec![
                PaymentOutcome::Counted,
                PaymentOutcome::Discounted,
                PaymentOutcome::Counted
            ]
        );
        assert_eq!(simulation.times.payment_seconds, 2 + 0 + 1);
    }

    #[test]
    fn test_chain_reaction_cascading() {
        let times = queue_times(&chain_queue(), &config_with(ChainReaction::Cascading)).unwrap();
        assert_eq!(times.payment_seconds, 2);
    }

    #[test]
    fn test_one_hop_carries_discounted_customers_own_change() {
        // The second customer is free and also pays exact, so the third is
        // free too. The third gets change back, so the fourth pays again.
        let queue = vec![
            customer(&[5], vec![CartItem::normal(5)]),
            customer(&[5], vec![CartItem::normal(5)]),
            customer(&[10], vec![CartItem::normal(7)]),
            customer(&[2], vec![CartItem::normal(2)]),
        ];
        let simulation = simulate_queue(&queue, &CheckoutConfig::default()).unwrap();
        let outcomes: Vec<PaymentOutcome> =
            simulation.customers.iter().map(|c| c.outcome).collect();

        assert_eq!(
            outcomes,
            vec![
                PaymentOutcome::Counted,
                PaymentOutcome::Discounted,
                PaymentOutcome::Discounted,
                PaymentOutcome::Counted
            ]
        );
        assert_eq!(simulation.times.payment_seconds, 2);
    }

    #[test]
    fn test_skipped_customer_contributes_nothing() {
        let queue = vec![customer(&[5, 2], vec![CartItem::perishable(10)])];
        let simulation = simulate_queue(&queue, &CheckoutConfig::default()).unwrap();

        assert_eq!(simulation.times.payment_seconds, 0);
        assert_eq!(simulation.times.scan_seconds, 2);
        assert_eq!(simulation.customers[0].outcome, PaymentOutcome::Skipped);
        assert!(simulation.customers[0].settlement.is_none());
    }

    #[test]
    fn test_skipped_customer_breaks_the_chain() {
        for chain_reaction in [ChainReaction::OneHop, ChainReaction::Cascading] {
            let queue = vec![
                customer(&[5], vec![CartItem::normal(5)]),
                customer(&[1], vec![CartItem::normal(9)]),
                customer(&[10], vec![CartItem::normal(7)]),
            ];
            let simulation = simulate_queue(&queue, &config_with(chain_reaction)).unwrap();

            assert_eq!(simulation.customers[2].outcome, PaymentOutcome::Counted);
            assert_eq!(simulation.times.payment_seconds, 1 + 0 + 1);
        }
    }

    #[test]
    fn test_overflowing_cart_is_skipped() {
        let queue = vec![customer(
            &[10],
            vec![CartItem::normal(9_000_000_000_000_000_000); 3],
        )];
        let simulation = simulate_queue(&queue, &CheckoutConfig::default()).unwrap();

        assert_eq!(simulation.customers[0].outcome, PaymentOutcome::Skipped);
        assert_eq!(simulation.customers[0].cart_price, Money::MAX);
        assert_eq!(simulation.times.payment_seconds, 0);
    }

    #[test]
    fn test_seconds_per_note_scales_payment() {
        let mut config = CheckoutConfig::default();
        config.timing.seconds_per_note = 4;
        let queue = vec![customer(&[5, 10, 2], vec![CartItem::perishable(12)])];

        let times = queue_times(&queue, &config).unwrap();
        assert_eq!(times.payment_seconds, 2 * 4);
    }

    #[test]
    fn test_register_report() {
        let register = Register::with_customers(chain_queue());
        let report = register.report(3, &CheckoutConfig::default()).unwrap();

        assert_eq!(report.index, 3);
        assert_eq!(report.queue_length, 3);
        assert_eq!(report.scan_seconds, 2 + 1 + 1);
        assert_eq!(report.payment_seconds, 3);
        assert_eq!(report.total_seconds, 7);
        assert_eq!(report.customers[0].cart_price, Money::from_units(7));
    }

    #[test]
    fn test_chain_reaction_parsing() {
        assert_eq!("one-hop".parse::<ChainReaction>().unwrap(), ChainReaction::OneHop);
        assert_eq!("cascading".parse::<ChainReaction>().unwrap(), ChainReaction::Cascading);
        assert!("sideways".parse::<ChainReaction>().is_err());
        assert_eq!(ChainReaction::Cascading.to_string(), "cascading");
    }
}
