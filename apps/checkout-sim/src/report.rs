//! Plain-text rendering of simulation results.

use std::io::Write;

use checkout_core::register::{CustomerTiming, PaymentOutcome};
use checkout_core::{FlushReport, Money, Note};
use serde::Serialize;

/// A customer the store turned away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub customer_id: String,
    pub reason: String,
}

/// Result of `checkout-sim run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub report: FlushReport,
    pub rejected: Vec<Rejection>,
}

/// Result of `checkout-sim settle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettleOutcome {
    pub amount_due: Money,
    pub notes: Vec<Note>,
    pub paid: Money,
    pub change: Money,
}

pub fn write_run(out: &mut impl Write, outcome: &RunOutcome) -> std::io::Result<()> {
    let report = &outcome.report;
    writeln!(
        out,
        "Flush time: {} s ({}, {} registers)",
        report.flush_seconds,
        report.policy,
        report.registers.len()
    )?;

    for register in &report.registers {
        writeln!(
            out,
            "Register {}: {} in queue, scan {} s + payment {} s = {} s",
            register.index,
            register.queue_length,
            register.scan_seconds,
            register.payment_seconds,
            register.total_seconds
        )?;
        for customer in &register.customers {
            write_customer(out, customer)?;
        }
    }

    if !outcome.rejected.is_empty() {
        writeln!(out, "Turned away:")?;
        for rejection in &outcome.rejected {
            writeln!(out, "  {}: {}", rejection.customer_id, rejection.reason)?;
        }
    }

    Ok(())
}

fn write_customer(out: &mut impl Write, customer: &CustomerTiming) -> std::io::Result<()> {
    let payment = match (customer.outcome, &customer.settlement) {
        (PaymentOutcome::Skipped, _) | (_, None) => "skipped, cannot pay".to_string(),
        (outcome, Some(settlement)) => format!(
            "{} notes, change {}{}",
            settlement.note_count(),
            settlement.change,
            if outcome == PaymentOutcome::Discounted {
                ", free (previous paid exact)"
            } else {
                ""
            }
        ),
    };

    writeln!(
        out,
        "  {:<12} cart {:>6}  scan {} s  pay {} s  {}",
        customer.customer_id,
        customer.cart_price.to_string(),
        customer.scan_seconds,
        customer.payment_seconds,
        payment
    )
}

pub fn write_settlement(out: &mut impl Write, outcome: &SettleOutcome) -> std::io::Result<()> {
    let notes: Vec<String> = outcome
        .notes
        .iter()
        .map(|note| note.value().units().to_string())
        .collect();

    if notes.is_empty() {
        writeln!(out, "Nothing to pay")?;
    } else {
        writeln!(
            out,
            "Pay {} with {} ({} notes, {} total)",
            outcome.amount_due,
            notes.join(" + "),
            notes.len(),
            outcome.paid
        )?;
    }
    writeln!(out, "Change: {}", outcome.change)
}
