//! # Domain Types
//!
//! The value objects a customer brings to the checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Wallet      │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  notes: [Note]  │   │  kind           │       │
//! │  │  wallet         │   │  funds()        │   │  price (Money)  │       │
//! │  │  items ─────────┼──────────────────────►│                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │                        ┌─────────────────┐                              │
//! │                        │    ItemKind     │                              │
//! │                        │  ─────────────  │                              │
//! │                        │  Normal     ×1  │                              │
//! │                        │  Perishable ×2  │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable once built. A customer with an empty cart can
//! be constructed; the admission step is what rejects it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CheckoutResult, ValidationError};
use crate::money::Money;
use crate::note::Note;

// =============================================================================
// Item Kind
// =============================================================================

/// How an item is handled at the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Scanned once.
    #[default]
    Normal,
    /// Needs an extra check (weight, expiry) at the scanner.
    Perishable,
}

impl ItemKind {
    /// Relative scan effort: 1 for normal items, 2 for perishables.
    #[inline]
    pub const fn scan_weight(&self) -> u64 {
        match self {
            ItemKind::Normal => 1,
            ItemKind::Perishable => 2,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A priced item in a customer's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Normal when omitted.
    #[serde(default)]
    pub kind: ItemKind,
    pub price: Money,
}

impl CartItem {
    /// A normal item at `price` units.
    pub const fn normal(price: u64) -> Self {
        CartItem {
            kind: ItemKind::Normal,
            price: Money::from_units(price),
        }
    }

    /// A perishable item at `price` units.
    pub const fn perishable(price: u64) -> Self {
        CartItem {
            kind: ItemKind::Perishable,
            price: Money::from_units(price),
        }
    }
}

// =============================================================================
// Wallet
// =============================================================================

/// The notes a customer carries, in the order they were listed.
///
/// Settlement refers to notes by their position in this list and never
/// removes anything from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    notes: Vec<Note>,
}

impl Wallet {
    pub fn new(notes: Vec<Note>) -> Self {
        Wallet { notes }
    }

    /// The notes, in wallet order.
    #[inline]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Total value of every note in the wallet, saturating at [`Money::MAX`].
    pub fn funds(&self) -> Money {
        self.notes.iter().map(Note::value).sum()
    }
}

impl From<Vec<Note>> for Wallet {
    fn from(notes: Vec<Note>) -> Self {
        Wallet::new(notes)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A shopper: a wallet plus a cart.
///
/// ## Dual-Key Identity
/// `id` defaults to a UUID v4 but callers may supply a readable name
/// (e.g. from a scenario file). It is only used for reporting and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub wallet: Wallet,
    pub items: Vec<CartItem>,
}

impl Customer {
    /// Creates a customer with a generated id.
    pub fn new(wallet: Wallet, items: Vec<CartItem>) -> Self {
        Customer::with_id(Uuid::new_v4().to_string(), wallet, items)
    }

    /// Creates a customer with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, wallet: Wallet, items: Vec<CartItem>) -> Self {
        Customer {
            id: id.into(),
            wallet,
            items,
        }
    }

    /// Sum of all item prices.
    ///
    /// ## Errors
    /// `Validation(OutOfRange)` when the total does not fit in [`Money`].
    pub fn cart_price(&self) -> CheckoutResult<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.price)).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: "cart_price".to_string(),
                min: 0,
                max: Money::MAX.units(),
            }
            .into()
        })
    }

    /// Sum of all notes in the wallet.
    #[inline]
    pub fn funds(&self) -> Money {
        self.wallet.funds()
    }

    /// Whether the wallet covers the cart (equal is enough).
    ///
    /// A cart whose total overflows is never affordable.
    pub fn can_afford(&self) -> bool {
        self.cart_price()
            .map_or(false, |price| self.funds() >= price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::note::DenominationSet;

    fn wallet(values: &[u64]) -> Wallet {
        DenominationSet::default().notes(values).unwrap().into()
    }

    #[test]
    fn test_scan_weight() {
        assert_eq!(ItemKind::Normal.scan_weight(), 1);
        assert_eq!(ItemKind::Perishable.scan_weight(), 2);
    }

    #[test]
    fn test_item_kind_defaults_to_normal() {
        assert_eq!(ItemKind::default(), ItemKind::Normal);

        let item: CartItem = serde_json::from_str(r#"{"price":3}"#).unwrap();
        assert_eq!(item, CartItem::normal(3));
    }

    #[test]
    fn test_wallet_funds() {
        assert_eq!(wallet(&[5, 10, 2]).funds(), Money::from_units(17));
        assert!(wallet(&[]).funds().is_zero());
    }

    #[test]
    fn test_customer_cart_price_and_funds() {
        let customer = Customer::new(
            wallet(&[10, 2]),
            vec![CartItem::normal(2), CartItem::normal(4), CartItem::perishable(10)],
        );

        assert_eq!(customer.cart_price().unwrap(), Money::from_units(16));
        assert_eq!(customer.funds(), Money::from_units(12));
        assert!(!customer.can_afford());
    }

    #[test]
    fn test_cart_price_overflow_is_an_error() {
        let customer = Customer::new(
            wallet(&[50]),
            vec![CartItem::normal(9_000_000_000_000_000_000); 3],
        );

        let err = customer.cart_price().unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(!customer.can_afford());
    }

    #[test]
    fn test_exact_funds_are_affordable() {
        let customer = Customer::new(wallet(&[5, 2]), vec![CartItem::perishable(7)]);
        assert!(customer.can_afford());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Customer::new(Wallet::default(), Vec::new());
        let b = Customer::new(Wallet::default(), Vec::new());
        assert_ne!(a.id, b.id);

        let named = Customer::with_id("alice", Wallet::default(), Vec::new());
        assert_eq!(named.id, "alice");
    }

    #[test]
    fn test_item_kind_serde() {
        let item: CartItem =
            serde_json::from_str(r#"{"kind":"perishable","price":12}"#).unwrap();
        assert_eq!(item, CartItem::perishable(12));
    }
}
