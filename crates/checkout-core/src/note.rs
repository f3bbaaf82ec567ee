//! # Notes and Denominations
//!
//! A `Note` is a single piece of paper money. Its value must come from a
//! `DenominationSet`; anything else is rejected when the note is built.
//!
//! ```text
//! raw value 20 ──► DenominationSet {1,2,5,10,20,50} ──► Ok(Note($20))
//! raw value  3 ──► DenominationSet {1,2,5,10,20,50} ──► Err(InvalidDenomination)
//! ```
//!
//! The set is configurable so that other currencies (or test fixtures with
//! unusual notes such as 3 or 8) can be modelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::validation::validate_denominations;
use crate::DEFAULT_DENOMINATIONS;

// =============================================================================
// Note
// =============================================================================

/// A currency note of a legal denomination. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Note(Money);

impl Note {
    /// Builds a note checked against [`DEFAULT_DENOMINATIONS`].
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::note::Note;
    ///
    /// assert_eq!(Note::new(20).unwrap().value().units(), 20);
    /// assert!(Note::new(3).is_err());
    /// ```
    pub fn new(value: u64) -> CheckoutResult<Self> {
        DenominationSet::default().note(value)
    }

    /// The face value of the note.
    #[inline]
    pub const fn value(&self) -> Money {
        self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Denomination Set
// =============================================================================

/// The legal note values, sorted ascending and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct DenominationSet {
    values: Vec<u64>,
}

impl DenominationSet {
    /// Creates a set from raw values.
    ///
    /// ## Rules
    /// - At least one value
    /// - Every value positive
    /// - No value listed twice
    pub fn new(values: impl IntoIterator<Item = u64>) -> CheckoutResult<Self> {
        let mut values: Vec<u64> = values.into_iter().collect();
        validate_denominations(&values)?;
        values.sort_unstable();
        Ok(DenominationSet { values })
    }

    /// The legal values in ascending order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Checks whether `value` is a legal denomination.
    pub fn contains(&self, value: u64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Builds a single note, rejecting values outside the set.
    pub fn note(&self, value: u64) -> CheckoutResult<Note> {
        if !self.contains(value) {
            return Err(CheckoutError::InvalidDenomination {
                value,
                allowed: self.values.clone(),
            });
        }

        Ok(Note(Money::from_units(value)))
    }

    /// Builds a wallet's worth of notes; fails on the first illegal value.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::note::DenominationSet;
    ///
    /// let set = DenominationSet::default();
    /// let notes = set.notes(&[5, 10, 2]).unwrap();
    /// assert_eq!(notes.len(), 3);
    /// ```
    pub fn notes(&self, values: &[u64]) -> CheckoutResult<Vec<Note>> {
        values.iter().map(|&value| self.note(value)).collect()
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        DenominationSet {
            values: DEFAULT_DENOMINATIONS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u64>> for DenominationSet {
    type Error = CheckoutError;

    fn try_from(values: Vec<u64>) -> Result<Self, Self::Error> {
        DenominationSet::new(values)
    }
}

impl From<DenominationSet> for Vec<u64> {
    fn from(set: DenominationSet) -> Self {
        set.values
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_default_denominations() {
        for value in [1, 2, 5, 10, 20, 50] {
            assert_eq!(Note::new(value).unwrap().value().units(), value);
        }
    }

    #[test]
    fn test_invalid_denomination() {
        for value in [0, 3, 4, 100] {
            let err = Note::new(value).unwrap_err();
            assert!(matches!(
                err,
                CheckoutError::InvalidDenomination { value: v, .. } if v == value
            ));
        }
    }

    #[test]
    fn test_custom_set_is_sorted() {
        let set = DenominationSet::new([8, 3, 5]).unwrap();
        assert_eq!(set.values(), &[3, 5, 8]);
        assert!(set.contains(3));
        assert!(!set.contains(1));
        assert!(set.note(8).is_ok());
    }

    #[test]
    fn test_rejects_bad_sets() {
        assert!(matches!(
            DenominationSet::new(Vec::new()),
            Err(CheckoutError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            DenominationSet::new([1, 0]),
            Err(CheckoutError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            DenominationSet::new([5, 1, 5]),
            Err(CheckoutError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_notes_stops_on_first_invalid_value() {
        let set = DenominationSet::default();
        let err = set.notes(&[5, 7, 3]).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidDenomination { value: 7, .. }));
    }

    #[test]
    fn test_set_deserializes_through_validation() {
        let set: DenominationSet = serde_json::from_str("[20, 1, 5]").unwrap();
        assert_eq!(set.values(), &[1, 5, 20]);

        assert!(serde_json::from_str::<DenominationSet>("[]").is_err());
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,5,20]");
    }
}
