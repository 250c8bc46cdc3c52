//! # Orders
//!
//! An order is an ordered list of menu item handles plus an order number.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation              Regime      Effect                              │
//! │  ─────────────────────  ──────────  ──────────────────────────────────  │
//! │  add_item(Rc<MenuItem>) strict      items.push(handle)                 │
//! │  add_any(value)         strict      Err(WrongItemType) if not an item  │
//! │  remove_item(&handle)   tolerant    first identical handle removed,    │
//! │                                     `false` + warning when absent      │
//! │  total_price()          pure        Σ item totals                      │
//! │  calculate_discount()   pure        DiscountPolicy::default() ladder   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are shared handles (`Rc<MenuItem>`): the same item may appear more
//! than once, and removal matches by handle identity rather than by value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::discount::{DiscountOutcome, DiscountPolicy};
use crate::error::{BillingError, BillingResult};
use crate::menu::{MenuItem, Priceable};
use crate::money::Money;
use crate::validation::{validate_order_number, ValidationResult};

/// A restaurant order.
///
/// ## Invariants
/// - `order_number > 0`
/// - `total_price()` always equals the sum of current item totals
/// - the discount is recomputed on every call, never cached
#[derive(Debug, Clone)]
pub struct Order {
    order_number: i64,
    items: Vec<Rc<MenuItem>>,
    /// Informational only; `calculate_discount` never reads it.
    requested_discount: Money,
    opened_at: DateTime<Utc>,
}

impl Order {
    /// Opens an empty order.
    ///
    /// ## Errors
    /// `MustBePositive` when `order_number <= 0`.
    pub fn new(order_number: i64) -> ValidationResult<Self> {
        validate_order_number(order_number)?;
        Ok(Order {
            order_number,
            items: Vec::new(),
            requested_discount: Money::zero(),
            opened_at: Utc::now(),
        })
    }

    /// Records a manually requested discount for display purposes.
    pub fn with_requested_discount(mut self, discount: Money) -> Self {
        self.requested_discount = discount;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn order_number(&self) -> i64 {
        self.order_number
    }

    pub fn set_order_number(&mut self, order_number: i64) -> ValidationResult<()> {
        validate_order_number(order_number)?;
        self.order_number = order_number;
        Ok(())
    }

    pub fn items(&self) -> &[Rc<MenuItem>] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn requested_discount(&self) -> Money {
        self.requested_discount
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Appends an item handle.
    pub fn add_item(&mut self, item: Rc<MenuItem>) {
        debug!(
            order_number = self.order_number,
            item = %item.name(),
            amount = item.amount(),
            "Adding item to order"
        );
        self.items.push(item);
    }

    /// Wraps `item` in a handle, appends it and returns the handle.
    pub fn add(&mut self, item: MenuItem) -> Rc<MenuItem> {
        let handle = Rc::new(item);
        self.add_item(Rc::clone(&handle));
        handle
    }

    /// Appends a dynamically typed value, accepting only menu items.
    ///
    /// Accepts a `MenuItem` or an `Rc<MenuItem>`; anything else fails with
    /// [`BillingError::WrongItemType`] and leaves the order unchanged.
    ///
    /// ```rust
    /// use mesa_billing::order::Order;
    ///
    /// let mut order = Order::new(7).unwrap();
    /// assert!(order.add_any("Cola".to_string()).is_err());
    /// assert!(order.is_empty());
    /// ```
    pub fn add_any<T: Any>(&mut self, value: T) -> BillingResult<Rc<MenuItem>> {
        let boxed: Box<dyn Any> = Box::new(value);
        let boxed = match boxed.downcast::<MenuItem>() {
            Ok(item) => return Ok(self.add(*item)),
            Err(other) => other,
        };
        match boxed.downcast::<Rc<MenuItem>>() {
            Ok(handle) => {
                self.add_item(Rc::clone(&handle));
                Ok(*handle)
            }
            Err(_) => Err(BillingError::WrongItemType {
                type_name: type_name::<T>().to_string(),
            }),
        }
    }

    /// Removes the first occurrence of `item` (by handle identity).
    ///
    /// Returns `false` and logs a warning when the handle is not on the order;
    /// the item list is left unchanged in that case.
    pub fn remove_item(&mut self, item: &Rc<MenuItem>) -> bool {
        match self.items.iter().position(|i| Rc::ptr_eq(i, item)) {
            Some(index) => {
                let removed = self.items.remove(index);
                debug!(
                    order_number = self.order_number,
                    item = %removed.name(),
                    "Removed item from order"
                );
                true
            }
            None => {
                warn!(
                    order_number = self.order_number,
                    item = %item.name(),
                    "Item not found in the order"
                );
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Sum of every item's total.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|item| item.total_price()).sum()
    }

    /// Sum of item *amounts* whose category equals `category` exactly.
    pub fn count_by_type(&self, category: &str) -> i64 {
        self.items
            .iter()
            .filter(|item| item.is_category(category))
            .map(|item| item.amount())
            .sum()
    }

    /// Sum of item totals whose category equals `category` exactly.
    pub fn total_by_type(&self, category: &str) -> Money {
        self.items
            .iter()
            .filter(|item| item.is_category(category))
            .map(|item| item.total_price())
            .sum()
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    /// Evaluates the house discount ladder against the current items.
    pub fn calculate_discount(&self) -> DiscountOutcome {
        self.calculate_discount_with(&DiscountPolicy::default())
    }

    /// Evaluates a custom discount ladder against the current items.
    pub fn calculate_discount_with(&self, policy: &DiscountPolicy) -> DiscountOutcome {
        let outcome = policy.evaluate(self);
        debug!(
            order_number = self.order_number,
            rule = ?outcome.rule,
            discount = %outcome.discount,
            total = %outcome.total,
            "Discount evaluated"
        );
        outcome
    }

    /// Same as [`Order::calculate_discount`].
    pub fn apply_discount(&self) -> DiscountOutcome {
        self.calculate_discount()
    }

    /// Serializable snapshot for receipts.
    pub fn summary(&self, policy: &DiscountPolicy) -> OrderSummary {
        let outcome = self.calculate_discount_with(policy);
        OrderSummary {
            order_number: self.order_number,
            opened_at: self.opened_at,
            items: self.items.iter().map(|item| (**item).clone()).collect(),
            subtotal: self.total_price(),
            message: outcome.message(),
            outcome,
        }
    }
}

/// Itemized receipt body followed by the discount line and the final total.
///
/// ```text
/// Order #1
/// Items:
///  - Beverage - Cola (Cola) - $3500.00 x 3
/// 10% discount on beverages with main course: -$1550.00
/// Total after discount: $28950.00
/// ```
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order #{}", self.order_number)?;
        writeln!(f, "Items:")?;
        for item in &self.items {
            writeln!(f, " - {}", item)?;
        }
        let outcome = self.calculate_discount();
        writeln!(f, "{}", outcome.message())?;
        write!(f, "Total after discount: {}", outcome.total)
    }
}

/// Snapshot of an order and its discount outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_number: i64,
    pub opened_at: DateTime<Utc>,
    pub items: Vec<MenuItem>,
    pub subtotal: Money,
    pub outcome: DiscountOutcome,
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
