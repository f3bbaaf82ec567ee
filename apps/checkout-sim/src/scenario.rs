//! # Scenario Files
//!
//! A scenario lists the customers who walk into the store, in arrival order.
//!
//! ```toml
//! registers = 2
//!
//! [[customers]]
//! id = "alice"
//! notes = [5, 10, 2]
//! items = [{ kind = "perishable", price = 12 }]
//!
//! [[customers]]
//! notes = [2]
//! items = [{ kind = "normal", price = 2 }]
//! ```
//!
//! Note values are checked against the configured denominations when the
//! customers are built, not when the file is parsed.

use std::path::Path;
use std::str::FromStr;

use checkout_core::{CartItem, Customer, DenominationSet, Wallet};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// One customer as written in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerEntry {
    /// Generated when absent.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub notes: Vec<u64>,

    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CustomerEntry {
    /// Builds the customer, rejecting notes outside `denominations`.
    pub fn to_customer(&self, denominations: &DenominationSet) -> AppResult<Customer> {
        let wallet = Wallet::new(denominations.notes(&self.notes)?);
        let items = self.items.clone();

        Ok(match &self.id {
            Some(id) => Customer::with_id(id.clone(), wallet, items),
            None => Customer::new(wallet, items),
        })
    }
}

/// A parsed scenario file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// Overrides the configured register count.
    #[serde(default)]
    pub registers: Option<usize>,

    #[serde(default)]
    pub customers: Vec<CustomerEntry>,
}

impl Scenario {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds every customer, failing on the first illegal note.
    pub fn customers(&self, denominations: &DenominationSet) -> AppResult<Vec<Customer>> {
        self.customers
            .iter()
            .map(|entry| entry.to_customer(denominations))
            .collect()
    }
}

impl FromStr for Scenario {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{CheckoutError, ItemKind, Money};

    const TWO_CUSTOMERS: &str = r#"
        registers = 3

        [[customers]]
        id = "alice"
        notes = [5, 10, 2]
        items = [{ kind = "perishable", price = 12 }]

        [[customers]]
        notes = [2]
        items = [{ kind = "normal", price = 2 }]
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = TWO_CUSTOMERS.parse().unwrap();

        assert_eq!(scenario.registers, Some(3));
        assert_eq!(scenario.customers.len(), 2);
        assert_eq!(scenario.customers[0].id.as_deref(), Some("alice"));
        assert_eq!(scenario.customers[0].items[0].kind, ItemKind::Perishable);
        assert_eq!(scenario.customers[1].id, None);
    }

    #[test]
    fn test_build_customers() {
        let scenario: Scenario = TWO_CUSTOMERS.parse().unwrap();
        let customers = scenario.customers(&DenominationSet::default()).unwrap();

        assert_eq!(customers[0].id, "alice");
        assert_eq!(customers[0].funds(), Money::from_units(17));
        assert_eq!(customers[0].cart_price().unwrap(), Money::from_units(12));
        assert!(!customers[1].id.is_empty());
    }

    #[test]
    fn test_empty_scenario() {
        let scenario: Scenario = "".parse().unwrap();
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn test_illegal_note_rejected() {
        let scenario: Scenario = "[[customers]]\nnotes = [3]\nitems = []\n".parse().unwrap();
        let err = scenario.customers(&DenominationSet::default()).unwrap_err();

        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::InvalidDenomination { value: 3, .. })
        ));
    }

    #[test]
    fn test_custom_denominations() {
        let scenario: Scenario = "[[customers]]\nnotes = [3]\n".parse().unwrap();
        let threes = DenominationSet::new([1, 3]).unwrap();
        assert!(scenario.customers(&threes).is_ok());
    }

    #[test]
    fn test_unknown_item_kind() {
        let result = "[[customers]]\nitems = [{ kind = \"frozen\", price = 1 }]\n".parse::<Scenario>();
        assert!(matches!(result, Err(AppError::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, TWO_CUSTOMERS).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.customers.len(), 2);
    }
}
