//! # checkout-sim
//!
//! Command-line front end for `checkout-core`.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        checkout-sim run                                 │
//! │                                                                         │
//! │  1. Load config ──────────► defaults → checkout.toml → CHECKOUT_* env   │
//! │                                                                         │
//! │  2. Load scenario ────────► customers in arrival order                  │
//! │                                                                         │
//! │  3. Open store ───────────► --registers, else scenario, else config     │
//! │                                                                         │
//! │  4. Admit customers ──────► rejected ones are logged and skipped        │
//! │                                                                         │
//! │  5. Print flush report ───► text, or JSON with --json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

use std::io::Write;
use std::path::Path;

use checkout_core::{settle_with, Checkout, CheckoutConfig, Money, SettlementPreference};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::AppConfig;
use error::AppResult;
use report::{Rejection, RunOutcome, SettleOutcome};
use scenario::Scenario;

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` takes precedence
/// - Default: INFO, DEBUG for the checkout crates
/// - Written to stderr so reports on stdout stay machine-readable
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one parsed command, writing its output to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> AppResult<()> {
    let config = AppConfig::load(cli.config)?;

    match cli.command {
        Command::Run {
            scenario,
            registers,
            json,
        } => {
            let outcome = run_scenario(&config, &scenario, registers)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &outcome)?;
                writeln!(out)?;
            } else {
                report::write_run(out, &outcome)?;
            }
        }
        Command::Settle {
            amount,
            notes,
            preference,
            json,
        } => {
            let preference = preference.unwrap_or(config.checkout.policy.settlement);
            let outcome = settle_notes(&config.checkout, amount, &notes, preference)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &outcome)?;
                writeln!(out)?;
            } else {
                report::write_settlement(out, &outcome)?;
            }
        }
        Command::Config => {
            write!(out, "{}", config.to_toml()?)?;
        }
    }

    Ok(())
}

/// Loads a scenario file and simulates it.
pub fn run_scenario(
    config: &AppConfig,
    path: &Path,
    registers: Option<usize>,
) -> AppResult<RunOutcome> {
    let scenario = Scenario::load(path)?;
    simulate(config, &scenario, registers)
}

/// Admits every scenario customer in order and reports the flush time.
///
/// The register count is taken from `registers`, then the scenario, then
/// the config.
pub fn simulate(
    config: &AppConfig,
    scenario: &Scenario,
    registers: Option<usize>,
) -> AppResult<RunOutcome> {
    let count = registers
        .or(scenario.registers)
        .unwrap_or(config.store.registers);
    let customers = scenario.customers(config.checkout.denominations())?;

    info!(registers = count, customers = customers.len(), "Starting simulation");
    let mut checkout = Checkout::with_empty_registers(count, config.checkout.clone())?;

    let mut rejected = Vec::new();
    for customer in customers {
        let customer_id = customer.id.clone();
        if let Err(e) = checkout.admit(customer) {
            warn!(customer = %customer_id, error = %e, "Customer turned away");
            rejected.push(Rejection {
                customer_id,
                reason: e.to_string(),
            });
        }
    }

    let report = checkout.flush_report()?;
    info!(
        flush_seconds = report.flush_seconds,
        rejected = rejected.len(),
        "Simulation finished"
    );

    Ok(RunOutcome { report, rejected })
}

/// Settles an ad hoc amount from raw note values.
pub fn settle_notes(
    config: &CheckoutConfig,
    amount: u64,
    values: &[u64],
    preference: SettlementPreference,
) -> AppResult<SettleOutcome> {
    let wallet = config.denominations().notes(values)?;
    let amount_due = Money::from_units(amount);
    let settlement = settle_with(&wallet, amount_due, preference)?;

    Ok(SettleOutcome {
        amount_due,
        notes: settlement.notes(&wallet),
        paid: settlement.paid,
        change: settlement.change,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
