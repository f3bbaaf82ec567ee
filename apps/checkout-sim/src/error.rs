//! # Application Error Types
//!
//! Everything that can stop a `checkout-sim` command.
//!
//! ## Error Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AppError Sources                                 │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  checkout-core  │  │   File system   │  │     Formats             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  CheckoutError  │  │  io::Error      │  │  toml::de / toml::ser   │ │
//! │  │  ValidationError│  │  (with path)    │  │  serde_json             │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `main` prints the error and exits with status 1. Nothing is retried.

use std::path::PathBuf;

use checkout_core::{CheckoutError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    // =========================================================================
    // File Errors
    // =========================================================================
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Parse failure of TOML that did not come from a file.
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to render TOML: {0}")]
    RenderToml(#[from] toml::ser::Error),

    #[error("Failed to render JSON: {0}")]
    RenderJson(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Returns true if the problem is in a config or scenario file rather
    /// than in the simulation.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidConfig(_)
                | AppError::Read { .. }
                | AppError::Parse { .. }
                | AppError::Toml(_)
                | AppError::Checkout(CheckoutError::InvalidDenomination { .. })
                | AppError::Checkout(CheckoutError::Validation(_))
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_message_is_kept() {
        let err: AppError = CheckoutError::NoRegisters.into();
        assert_eq!(err.to_string(), CheckoutError::NoRegisters.to_string());
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_read_error_names_path() {
        let err = AppError::Read {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.toml"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_validation_is_input_error() {
        let err: AppError = ValidationError::Required {
            field: "denominations".to_string(),
        }
        .into();
        assert!(err.is_input_error());
    }
}
