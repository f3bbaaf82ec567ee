//! # Validation Module
//!
//! Rule checks for raw input that arrives before any checkout logic runs:
//! config values, denomination lists, register counts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Types, unknown enum names                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Rule checks returning ValidationError                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Admission                                                    │
//! │  └── EmptyCart / InsufficientFunds / NoRegisters                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_denominations, validate_register_count};
//!
//! assert!(validate_denominations(&[1, 2, 5]).is_ok());
//! assert!(validate_register_count(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::MAX_REGISTERS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a list of note denominations.
///
/// ## Rules
/// - Must not be empty
/// - Every value must be positive
/// - No value may appear twice
pub fn validate_denominations(values: &[u64]) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::Required {
            field: "denominations".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(values.len());
    for &value in values {
        if value == 0 {
            return Err(ValidationError::MustBePositive {
                field: "denomination".to_string(),
            });
        }

        if !seen.insert(value) {
            return Err(ValidationError::Duplicate {
                field: "denomination".to_string(),
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates the number of registers a store is built with.
///
/// ## Rules
/// - At least one register
/// - At most [`MAX_REGISTERS`]
pub fn validate_register_count(count: usize) -> ValidationResult<()> {
    if count == 0 || count > MAX_REGISTERS {
        return Err(ValidationError::OutOfRange {
            field: "registers".to_string(),
            min: 1,
            max: MAX_REGISTERS as u64,
        });
    }

    Ok(())
}

/// Validates a per-unit timing value.
///
/// Zero is allowed (e.g. to measure scan time only); the upper bound keeps
/// totals far away from overflow.
pub fn validate_seconds(field: &str, seconds: u64) -> ValidationResult<()> {
    if seconds > MAX_UNIT_SECONDS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_UNIT_SECONDS,
        });
    }

    Ok(())
}

/// Upper bound for any single timing value (one hour).
const MAX_UNIT_SECONDS: u64 = 3600;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_denominations() {
        assert!(validate_denominations(&[1, 2, 5, 10, 20, 50]).is_ok());
        assert!(validate_denominations(&[3, 8]).is_ok());

        assert!(validate_denominations(&[]).is_err());
        assert!(validate_denominations(&[0, 1]).is_err());
        assert!(validate_denominations(&[2, 2]).is_err());
    }

    #[test]
    fn test_validate_register_count() {
        assert!(validate_register_count(1).is_ok());
        assert!(validate_register_count(MAX_REGISTERS).is_ok());

        assert!(validate_register_count(0).is_err());
        assert!(validate_register_count(MAX_REGISTERS + 1).is_err());
    }

    #[test]
    fn test_validate_seconds() {
        assert!(validate_seconds("seconds_per_note", 0).is_ok());
        assert!(validate_seconds("seconds_per_note", 3600).is_ok());

        let err = validate_seconds("seconds_per_note", 3601).unwrap_err();
        assert_eq!(
            err.to_string(),
            "seconds_per_note must be between 0 and 3600"
        );
    }
}
