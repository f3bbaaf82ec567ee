//! # Admission
//!
//! Lets a customer into the store: validates the cart and wallet, then
//! queues the customer at the register with the shortest line.
//!
//! ## Admission Flow
//! ```text
//! Customer arrives
//!      │
//!      ├── cart empty? ───────────► EmptyCart
//!      │
//!      ├── price overflows? ──────► Validation(OutOfRange)
//!      │
//!      ├── funds < cart price? ───► InsufficientFunds
//!      │
//!      ├── no registers? ─────────► NoRegisters
//!      │
//!      ▼
//! Shortest queue (first one on ties) ──► append customer
//! ```
//!
//! The cart is checked before the registers so that an empty cart is
//! rejected the same way whatever state the store is in. Every admission is
//! decided on its own; customers already queued are never moved.

use tracing::debug;

use crate::error::{CheckoutError, CheckoutResult};
use crate::register::Register;
use crate::types::Customer;

/// Checks that a customer may queue at all.
pub fn validate_admission(customer: &Customer) -> CheckoutResult<()> {
    if customer.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let funds = customer.funds();
    let price = customer.cart_price()?;
    if funds < price {
        return Err(CheckoutError::InsufficientFunds { funds, price });
    }

    Ok(())
}

/// Index of the register with the fewest queued customers.
///
/// Ties go to the lowest index. `None` when there are no registers.
pub fn shortest_queue(registers: &[Register]) -> Option<usize> {
    registers
        .iter()
        .enumerate()
        .min_by_key(|(_, register)| register.len())
        .map(|(index, _)| index)
}

/// Validates `customer` and appends them to the shortest queue.
///
/// Returns the index of the register the customer joined. On error no
/// register is modified.
///
/// ## Example
/// ```rust
/// use checkout_core::admission::admit;
/// use checkout_core::note::DenominationSet;
/// use checkout_core::register::Register;
/// use checkout_core::types::{CartItem, Customer, Wallet};
///
/// let mut registers = vec![Register::new(), Register::new()];
/// let notes = DenominationSet::default().notes(&[5, 2]).unwrap();
/// let customer = Customer::new(Wallet::new(notes), vec![CartItem::normal(7)]);
///
/// assert_eq!(admit(&mut registers, customer).unwrap(), 0);
/// assert_eq!(registers[0].len(), 1);
/// ```
pub fn admit(registers: &mut [Register], customer: Customer) -> CheckoutResult<usize> {
    validate_admission(&customer)?;

    let index = shortest_queue(registers).ok_or(CheckoutError::NoRegisters)?;

    debug!(
        customer = %customer.id,
        register = index,
        queue_length = registers[index].len(),
        "Admitting customer"
    );
    registers[index].enqueue(customer);

    Ok(index)
}

// =============================================================================
// Unit Tests
// =============================================================================
