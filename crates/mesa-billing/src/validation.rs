//! # Validation Module
//!
//! Field validators shared by menu items, orders and payment methods.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Runs                              │
//! │                                                                         │
//! │  MenuItem::new / set_*  ──► validate_text, validate_price,             │
//! │                             validate_amount, validate_line_total        │
//! │                                                                         │
//! │  Order::new / set_order_number ──► validate_order_number               │
//! │                                                                         │
//! │  Card::new / set_* ──► validate_card_number, validate_cvv              │
//! │  Cash::new / set_* ──► validate_cash_given                             │
//! │                                                                         │
//! │  Every validator fails fast with a ValidationError.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mesa_billing::validation::{validate_card_number, validate_text};
//!
//! assert_eq!(validate_text("name", "  Steak ").unwrap(), "Steak");
//! assert!(validate_card_number("1234567890123").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accepted card number lengths.
pub const CARD_NUMBER_LENGTHS: [usize; 2] = [13, 16];

/// Required CVV length.
pub const CVV_LENGTH: usize = 3;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ```rust
/// use mesa_billing::validation::validate_text;
///
/// assert!(validate_text("name", "Cola").is_ok());
/// assert!(validate_text("name", "   ").is_err());
/// ```
pub fn validate_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a card number.
///
/// ## Rules
/// - ASCII digits only
/// - Exactly 13 or 16 characters
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    if !is_all_digits(number) || !CARD_NUMBER_LENGTHS.contains(&number.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must be 13 or 16 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a card verification value.
///
/// ## Rules
/// - ASCII digits only
/// - Exactly 3 characters
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if !is_all_digits(cvv) || cvv.len() != CVV_LENGTH {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 digits".to_string(),
        });
    }

    Ok(())
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (complimentary items)
///
/// ```rust
/// use mesa_billing::money::Money;
/// use mesa_billing::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    non_negative_money("price", price)
}

/// Validates the cash handed over by a customer.
pub fn validate_cash_given(cash: Money) -> ValidationResult<()> {
    non_negative_money("cash given", cash)
}

/// Validates an item amount (quantity).
///
/// ## Rules
/// - Must be non-negative; zero keeps a placeholder line on the order
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates that `price × amount` fits in a [`Money`].
///
/// ## Rules
/// - The line total must not overflow i64 cents
///
/// ```rust
/// use mesa_billing::money::Money;
/// use mesa_billing::validation::validate_line_total;
///
/// assert!(validate_line_total(Money::from_cents(1099), 3).is_ok());
/// assert!(validate_line_total(Money::from_cents(i64::MAX / 2), 3).is_err());
/// ```
pub fn validate_line_total(price: Money, amount: i64) -> ValidationResult<()> {
    if price.checked_multiply_quantity(amount).is_none() {
        return Err(ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("{} x {} exceeds the largest representable total", price, amount),
        });
    }

    Ok(())
}

/// Validates an order number.
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_order_number(order_number: i64) -> ValidationResult<()> {
    if order_number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "order number".to_string(),
        });
    }

    Ok(())
}

fn non_negative_money(field: &str, value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
