//! # Error Types
//!
//! Strict-path error types for mesa-billing.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mesa-billing errors (this file)                                       │
//! │  ├── BillingError     - Order-level failures                           │
//! │  └── ValidationError  - Constructor / setter argument failures         │
//! │                                                                         │
//! │  mesa-cli errors (app)                                                 │
//! │  └── ConfigError      - Config file / env failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → BillingError → CLI exit message               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Strict vs Tolerant
//! Every constructor and setter in this crate fails fast with one of these
//! errors. The only tolerant billing operation is [`Order::remove_item`],
//! which reports "not found" through its return value instead.
//!
//! [`Order::remove_item`]: crate::order::Order::remove_item

use thiserror::Error;

// =============================================================================
// Billing Error
// =============================================================================

/// Order-level billing errors.
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// Something other than a menu item was offered to an order.
    ///
    /// ## When This Occurs
    /// Only through [`Order::add_any`](crate::order::Order::add_any); the
    /// typed `add_item` path rules this out at compile time.
    #[error("Only menu items can be added to an order, got {type_name}")]
    WrongItemType { type_name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a constructor or setter argument breaks a field rule.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} must be a non-empty string")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., card number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with BillingError.
pub type BillingResult<T> = Result<T, BillingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name must be a non-empty string");

        let err = ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 digits".to_string(),
        };
        assert_eq!(err.to_string(), "cvv has invalid format: must be 3 digits");
    }

    #[test]
    fn test_wrong_item_type_message() {
        let err = BillingError::WrongItemType {
            type_name: "alloc::string::String".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Only menu items can be added to an order, got alloc::string::String"
        );
    }

    #[test]
    fn test_validation_converts_to_billing_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        let billing_err: BillingError = validation_err.into();
        assert!(matches!(billing_err, BillingError::Validation(_)));
    }
}
