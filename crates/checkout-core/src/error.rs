//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CheckoutError    - Admission, settlement and construction errors  │
//! │  └── ValidationError  - Config / input rule violations                 │
//! │                                                                         │
//! │  checkout-sim errors (app crate)                                       │
//! │  └── AppError         - What the CLI prints before exiting             │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → AppError → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, offending values)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retried: every failure is a consequence of the input

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A note value is not part of the legal denomination set.
    ///
    /// ## When This Occurs
    /// - Building a `Note` from a raw value (scenario file, CLI argument)
    /// - The value is valid money but not a printed denomination (e.g. 3)
    #[error("Invalid denomination {value}: allowed values are {allowed:?}")]
    InvalidDenomination { value: u64, allowed: Vec<u64> },

    /// Customer tried to queue with nothing in the cart.
    #[error("Shopping cart must not be empty")]
    EmptyCart,

    /// Wallet does not cover the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Customer arrives: wallet [10, 2], cart total 15
    ///      │
    ///      ▼
    /// funds 12 < price 15
    ///      │
    ///      ▼
    /// InsufficientFunds { funds: $12, price: $15 }
    ///      │
    ///      ▼
    /// Customer is turned away, no register is touched
    /// ```
    #[error("Insufficient funds: wallet holds {funds}, cart costs {price}")]
    InsufficientFunds { funds: Money, price: Money },

    /// The store has no registers to queue at.
    #[error("Checkout has no cash registers")]
    NoRegisters,

    /// The solver found no way to cover an amount the wallet can afford.
    ///
    /// Only reachable if funds were not checked beforehand.
    #[error("No note combination settles {amount_due}")]
    SettlementUnreachable { amount_due: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for config and raw-input checks before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. unknown policy name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. a denomination listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckoutError::InsufficientFunds {
            funds: Money::from_units(12),
            price: Money::from_units(15),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: wallet holds $12, cart costs $15"
        );

        let err = CheckoutError::InvalidDenomination {
            value: 3,
            allowed: vec![1, 2, 5],
        };
        assert_eq!(
            err.to_string(),
            "Invalid denomination 3: allowed values are [1, 2, 5]"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "denominations".to_string(),
        };
        assert_eq!(err.to_string(), "denominations is required");

        let err = ValidationError::Duplicate {
            field: "denomination".to_string(),
            value: "5".to_string(),
        };
        assert_eq!(err.to_string(), "denomination '5' already exists");
    }

    #[test]
    fn test_validation_converts_to_checkout_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "denomination".to_string(),
        };
        let err: CheckoutError = validation_err.into();
        assert!(matches!(err, CheckoutError::Validation(_)));
    }
}
