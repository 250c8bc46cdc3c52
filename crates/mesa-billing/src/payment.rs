//! # Payments
//!
//! Binds an order to a payment method and settles the discounted total.
//!
//! ## Payment Flow
//! ```text
//! Payment::make_payment()
//!      │
//!      ▼
//! order.calculate_discount()  ──► amount due (post-discount)
//!      │
//!      ▼
//! method.pay(amount due)
//!      │
//!      ├── Card  ──► PaymentReceipt::Card  (masked number)
//!      │
//!      └── Cash  ──► PaymentReceipt::Cash(Change | Shortage)
//! ```
//!
//! Neither outcome is an error: a shortage is an informational receipt.
//! Construction of the methods themselves is strict.

use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::{info, warn};

use crate::discount::DiscountPolicy;
use crate::money::Money;
use crate::order::Order;
use crate::validation::{
    validate_card_number, validate_cash_given, validate_cvv, ValidationResult,
};

// =============================================================================
// Payment Method Capability
// =============================================================================

/// Something that can settle an amount.
pub trait PaymentMethod: fmt::Debug {
    /// Settles `amount` and reports what happened.
    fn pay(&self, amount: Money) -> PaymentReceipt;
}

// =============================================================================
// Receipts
// =============================================================================

/// Outcome of a cash payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "amount", rename_all = "snake_case")]
pub enum CashOutcome {
    /// Enough cash was given; this much goes back to the customer.
    Change(Money),
    /// Not enough cash; this much is still owed.
    Shortage(Money),
}

/// What a payment method reports after `pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentReceipt {
    Card { masked_number: String, amount: Money },
    Cash { given: Money, outcome: CashOutcome },
}

impl PaymentReceipt {
    /// True unless cash fell short.
    pub fn is_settled(&self) -> bool {
        !matches!(
            self,
            PaymentReceipt::Cash {
                outcome: CashOutcome::Shortage(_),
                ..
            }
        )
    }
}

impl fmt::Display for PaymentReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentReceipt::Card {
                masked_number,
                amount,
            } => write!(
                f,
                "Paying {} with card ending in {}",
                amount,
                &masked_number[masked_number.len().saturating_sub(4)..]
            ),
            PaymentReceipt::Cash {
                outcome: CashOutcome::Change(change),
                ..
            } => write!(f, "Payment successful. Change: {}", change),
            PaymentReceipt::Cash {
                outcome: CashOutcome::Shortage(shortage),
                ..
            } => write!(f, "Insufficient funds. Need additional {}", shortage),
        }
    }
}

// =============================================================================
// Card
// =============================================================================

/// A payment card. No balance is tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    number: String,
    cvv: String,
}

impl Card {
    /// ## Errors
    /// `InvalidFormat` unless `number` is 13 or 16 ASCII digits and `cvv`
    /// is exactly 3 ASCII digits.
    pub fn new(number: &str, cvv: &str) -> ValidationResult<Self> {
        validate_card_number(number)?;
        validate_cvv(cvv)?;
        Ok(Card {
            number: number.to_string(),
            cvv: cvv.to_string(),
        })
    }

    pub fn set_number(&mut self, number: &str) -> ValidationResult<()> {
        validate_card_number(number)?;
        self.number = number.to_string();
        Ok(())
    }

    pub fn set_cvv(&mut self, cvv: &str) -> ValidationResult<()> {
        validate_cvv(cvv)?;
        self.cvv = cvv.to_string();
        Ok(())
    }

    pub fn last_four(&self) -> &str {
        &self.number[self.number.len() - 4..]
    }

    /// `*********3456`
    pub fn masked_number(&self) -> String {
        let hidden = self.number.len() - 4;
        format!("{}{}", "*".repeat(hidden), self.last_four())
    }
}

// Keep the full number and CVV out of logs.
impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.masked_number())
            .field("cvv", &"***")
            .finish()
    }
}

impl PaymentMethod for Card {
    fn pay(&self, amount: Money) -> PaymentReceipt {
        info!(card = %self.last_four(), amount = %amount, "Card payment");
        PaymentReceipt::Card {
            masked_number: self.masked_number(),
            amount,
        }
    }
}

// =============================================================================
// Cash
// =============================================================================

/// Cash handed over by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cash {
    cash_given: Money,
}

impl Cash {
    /// ## Errors
    /// `MustBeNonNegative` when `cash_given` is negative.
    pub fn new(cash_given: Money) -> ValidationResult<Self> {
        validate_cash_given(cash_given)?;
        Ok(Cash { cash_given })
    }

    pub fn cash_given(&self) -> Money {
        self.cash_given
    }

    pub fn set_cash_given(&mut self, cash_given: Money) -> ValidationResult<()> {
        validate_cash_given(cash_given)?;
        self.cash_given = cash_given;
        Ok(())
    }
}

impl PaymentMethod for Cash {
    fn pay(&self, amount: Money) -> PaymentReceipt {
        let outcome = if self.cash_given >= amount {
            let change = self.cash_given - amount;
            info!(given = %self.cash_given, change = %change, "Cash payment successful");
            CashOutcome::Change(change)
        } else {
            let shortage = amount - self.cash_given;
            warn!(given = %self.cash_given, shortage = %shortage, "Insufficient cash");
            CashOutcome::Shortage(shortage)
        };
        PaymentReceipt::Cash {
            given: self.cash_given,
            outcome,
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// One order settled by one payment method.
#[derive(Debug)]
pub struct Payment {
    order: Rc<Order>,
    method: Box<dyn PaymentMethod>,
}

impl Payment {
    pub fn new(order: Rc<Order>, method: Box<dyn PaymentMethod>) -> Self {
        Payment { order, method }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn set_order(&mut self, order: Rc<Order>) {
        self.order = order;
    }

    pub fn payment_method(&self) -> &dyn PaymentMethod {
        self.method.as_ref()
    }

    pub fn set_payment_method(&mut self, method: Box<dyn PaymentMethod>) {
        self.method = method;
    }

    /// Recomputes the discounted total and hands it to the payment method.
    pub fn make_payment(&self) -> PaymentReceipt {
        self.make_payment_with(&DiscountPolicy::default())
    }

    /// Same as [`Payment::make_payment`] under a custom discount ladder.
    pub fn make_payment_with(&self, policy: &DiscountPolicy) -> PaymentReceipt {
        let due = self.order.calculate_discount_with(policy).total;
        info!(order_number = self.order.order_number(), due = %due, "Total to pay");
        self.method.pay(due)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::menu::MenuItem;

    fn dollars(major: i64) -> Money {
        Money::from_major_minor(major, 0)
    }

    #[test]
    fn test_card_validation() {
        assert!(matches!(
            Card::new("123", "12"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Card::new("1234567890123", "123").is_ok());
        assert!(Card::new("1234567890123456", "123").is_ok());
        assert!(Card::new("1234567890123456", "1234").is_err());
    }

    #[test]
    fn test_card_setters_keep_value_on_error() {
        let mut card = Card::new("1234567890123456", "123").unwrap();
        assert!(card.set_number("12ab").is_err());
        assert_eq!(card.last_four(), "3456");

        card.set_number("9999999999999").unwrap();
        assert_eq!(card.last_four(), "9999");
        assert!(card.set_cvv("").is_err());
    }

    #[test]
    fn test_card_debug_is_masked() {
        let card = Card::new("1234567890123456", "987").unwrap();
        let debug = format!("{:?}", card);
        assert!(!debug.contains("1234567890123456"));
        assert!(!debug.contains("987"));
        assert!(debug.contains("3456"));
    }

    #[test]
    fn test_card_pay() {
        let card = Card::new("1234567890123456", "123").unwrap();
        let receipt = card.pay(Money::from_cents(1550));
        assert!(receipt.is_settled());
        assert_eq!(receipt.to_string(), "Paying $15.50 with card ending in 3456");
    }

    #[test]
    fn test_cash_change_and_shortage() {
        let receipt = Cash::new(dollars(100)).unwrap().pay(dollars(80));
        assert_eq!(
            receipt,
            PaymentReceipt::Cash {
                given: dollars(100),
                outcome: CashOutcome::Change(dollars(20)),
            }
        );
        assert_eq!(receipt.to_string(), "Payment successful. Change: $20.00");

        let receipt = Cash::new(dollars(50)).unwrap().pay(dollars(80));
        assert!(!receipt.is_settled());
        assert_eq!(receipt.to_string(), "Insufficient funds. Need additional $30.00");
    }

    #[test]
    fn test_cash_exact_amount() {
        let receipt = Cash::new(dollars(80)).unwrap().pay(dollars(80));
        assert_eq!(receipt.to_string(), "Payment successful. Change: $0.00");
    }

    #[test]
    fn test_cash_rejects_negative() {
        assert!(Cash::new(Money::from_cents(-1)).is_err());

        let mut cash = Cash::new(dollars(5)).unwrap();
        assert!(cash.set_cash_given(Money::from_cents(-1)).is_err());
        assert_eq!(cash.cash_given(), dollars(5));
    }

    #[test]
    fn test_make_payment_uses_discounted_total() {
        let mut order = Order::new(1).unwrap();
        order.add(MenuItem::main_course("Steak", dollars(100), 1, "").unwrap());
        order.add(MenuItem::beverage("Wine", dollars(50), 1, "Red").unwrap());
        let order = Rc::new(order);

        // 150 - 10% of 50
        let payment = Payment::new(Rc::clone(&order), Box::new(Cash::new(dollars(200)).unwrap()));
        assert_eq!(
            payment.make_payment(),
            PaymentReceipt::Cash {
                given: dollars(200),
                outcome: CashOutcome::Change(dollars(55)),
            }
        );

        let mut payment = payment;
        payment.set_payment_method(Box::new(Card::new("1234567890123", "321").unwrap()));
        assert_eq!(
            payment.make_payment().to_string(),
            "Paying $145.00 with card ending in 0123"
        );
    }

    #[test]
    fn test_make_payment_with_custom_policy() {
        let mut order = Order::new(2).unwrap();
        order.add(MenuItem::main_course("Steak", dollars(100), 1, "").unwrap());
        order.add(MenuItem::beverage("Wine", dollars(50), 1, "Red").unwrap());

        let policy = DiscountPolicy {
            main_course_beverage_rate_bps: 5000,
            ..DiscountPolicy::default()
        };
        let payment = Payment::new(Rc::new(order), Box::new(Cash::new(dollars(125)).unwrap()));
        assert_eq!(
            payment.make_payment_with(&policy).to_string(),
            "Payment successful. Change: $0.00"
        );
    }

    #[test]
    fn test_receipt_serializes() {
        let receipt = Cash::new(dollars(10)).unwrap().pay(dollars(4));
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["method"], "cash");
        assert_eq!(json["outcome"]["result"], "change");
        assert_eq!(json["outcome"]["amount"], 600);
    }
}
