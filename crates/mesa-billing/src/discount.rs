//! # Discount Policy
//!
//! Tiered discount rules for an order. Exactly one rule applies: the first
//! one whose condition holds, checked in this fixed order.
//!
//! ## Rule Ladder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Condition (strict >)                   Discount                    │
//! │  ─  ─────────────────────────────────────  ──────────────────────────  │
//! │  1  order total       > $80000.00          20% of order total          │
//! │  2  dessert amount    > 4                  30% of beverage subtotal    │
//! │  3  seafood subtotal  > $50000.00          10% of seafood subtotal     │
//! │  4  main course amount > 0                 10% of beverage subtotal    │
//! │  5  dessert amount    > 0                  15% of beverage subtotal    │
//! │  -  otherwise                              nothing                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Counts are summed item *amounts*, not line counts. Thresholds and rates
//! are configurable through [`DiscountPolicy`]; the ladder order is not.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::menu::{BEVERAGE, DESSERT, MAIN_COURSE, SEA_FOOD};
use crate::money::{Money, FULL_BPS};
use crate::order::Order;
use crate::validation::ValidationResult;

/// Message used when no discount reduces the total.
pub const NO_DISCOUNT_MESSAGE: &str = "No discount applied";

// =============================================================================
// Policy
// =============================================================================

/// Thresholds and rates for the discount ladder.
///
/// `Default` is the house policy. Money fields are in cents and rates in
/// basis points (2000 = 20%).
///
/// ## Example Config
/// ```toml
/// [billing]
/// total_threshold = 8000000
/// total_rate_bps = 2000
/// dessert_count_threshold = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountPolicy {
    /// Rule 1 threshold on the order total.
    pub total_threshold: Money,
    pub total_rate_bps: u32,

    /// Rule 2 threshold on the number of desserts.
    pub dessert_count_threshold: i64,
    pub many_desserts_beverage_rate_bps: u32,

    /// Rule 3 threshold on the seafood subtotal.
    pub seafood_threshold: Money,
    pub seafood_rate_bps: u32,

    /// Rule 4 rate on beverages.
    pub main_course_beverage_rate_bps: u32,

    /// Rule 5 rate on beverages.
    pub dessert_beverage_rate_bps: u32,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy {
            total_threshold: Money::from_major_minor(80_000, 0),
            total_rate_bps: 2000,
            dessert_count_threshold: 4,
            many_desserts_beverage_rate_bps: 3000,
            seafood_threshold: Money::from_major_minor(50_000, 0),
            seafood_rate_bps: 1000,
            main_course_beverage_rate_bps: 1000,
            dessert_beverage_rate_bps: 1500,
        }
    }
}

impl DiscountPolicy {
    /// Checks that every rate is at most 100% and thresholds are not negative.
    pub fn validate(&self) -> ValidationResult<()> {
        let rates = [
            ("total_rate_bps", self.total_rate_bps),
            ("many_desserts_beverage_rate_bps", self.many_desserts_beverage_rate_bps),
            ("seafood_rate_bps", self.seafood_rate_bps),
            ("main_course_beverage_rate_bps", self.main_course_beverage_rate_bps),
            ("dessert_beverage_rate_bps", self.dessert_beverage_rate_bps),
        ];
        for (field, bps) in rates {
            if bps > FULL_BPS {
                return Err(ValidationError::InvalidFormat {
                    field: field.to_string(),
                    reason: format!("{bps} exceeds {FULL_BPS} basis points"),
                });
            }
        }

        for (field, value) in [
            ("total_threshold", self.total_threshold),
            ("seafood_threshold", self.seafood_threshold),
        ] {
            if value.is_negative() {
                return Err(ValidationError::MustBeNonNegative {
                    field: field.to_string(),
                });
            }
        }

        if self.dessert_count_threshold < 0 {
            return Err(ValidationError::MustBeNonNegative {
                field: "dessert_count_threshold".to_string(),
            });
        }

        Ok(())
    }

    /// Runs the ladder against the current items of `order`.
    ///
    /// Pure: reads the order, never mutates it.
    pub fn evaluate(&self, order: &Order) -> DiscountOutcome {
        let total = order.total_price();

        let (rule, discount) = if total > self.total_threshold {
            (
                Some(DiscountRule::TotalOrder {
                    rate_bps: self.total_rate_bps,
                }),
                total.percentage(self.total_rate_bps),
            )
        } else if order.count_by_type(DESSERT) > self.dessert_count_threshold {
            (
                Some(DiscountRule::BeveragesForManyDesserts {
                    rate_bps: self.many_desserts_beverage_rate_bps,
                    dessert_threshold: self.dessert_count_threshold,
                }),
                order
                    .total_by_type(BEVERAGE)
                    .percentage(self.many_desserts_beverage_rate_bps),
            )
        } else if order.total_by_type(SEA_FOOD) > self.seafood_threshold {
            (
                Some(DiscountRule::Seafood {
                    rate_bps: self.seafood_rate_bps,
                }),
                order.total_by_type(SEA_FOOD).percentage(self.seafood_rate_bps),
            )
        } else if order.count_by_type(MAIN_COURSE) > 0 {
            (
                Some(DiscountRule::BeveragesWithMainCourse {
                    rate_bps: self.main_course_beverage_rate_bps,
                }),
                order
                    .total_by_type(BEVERAGE)
                    .percentage(self.main_course_beverage_rate_bps),
            )
        } else if order.count_by_type(DESSERT) > 0 {
            (
                Some(DiscountRule::BeveragesWithDessert {
                    rate_bps: self.dessert_beverage_rate_bps,
                }),
                order
                    .total_by_type(BEVERAGE)
                    .percentage(self.dessert_beverage_rate_bps),
            )
        } else {
            (None, Money::zero())
        };

        DiscountOutcome {
            rule,
            discount,
            total: total - discount,
        }
    }
}

// =============================================================================
// Rules and Outcome
// =============================================================================

/// The rule that won the ladder, with the rate it applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DiscountRule {
    TotalOrder { rate_bps: u32 },
    BeveragesForManyDesserts { rate_bps: u32, dessert_threshold: i64 },
    Seafood { rate_bps: u32 },
    BeveragesWithMainCourse { rate_bps: u32 },
    BeveragesWithDessert { rate_bps: u32 },
}

impl fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DiscountRule::TotalOrder { rate_bps } => {
                write!(f, "{}% discount on total order", Percent(rate_bps))
            }
            DiscountRule::BeveragesForManyDesserts {
                rate_bps,
                dessert_threshold,
            } => write!(
                f,
                "{}% discount on beverages for ordering >{} desserts",
                Percent(rate_bps),
                dessert_threshold
            ),
            DiscountRule::Seafood { rate_bps } => {
                write!(f, "{}% discount on seafood", Percent(rate_bps))
            }
            DiscountRule::BeveragesWithMainCourse { rate_bps } => write!(
                f,
                "{}% discount on beverages with main course",
                Percent(rate_bps)
            ),
            DiscountRule::BeveragesWithDessert { rate_bps } => {
                write!(f, "{}% discount on beverages with dessert", Percent(rate_bps))
            }
        }
    }
}

/// Basis points shown as a percentage, without decimals when whole.
struct Percent(u32);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}", self.0 / 100)
        } else {
            write!(f, "{:.2}", self.0 as f64 / 100.0)
        }
    }
}

/// Result of evaluating the discount ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    /// Winning rule, `None` when no condition held.
    pub rule: Option<DiscountRule>,
    /// Amount taken off.
    pub discount: Money,
    /// Order total after the discount.
    pub total: Money,
}

impl DiscountOutcome {
    /// Human-readable summary: `"<rule>: -$X.XX"`, or
    /// [`NO_DISCOUNT_MESSAGE`] when nothing was taken off.
    ///
    /// A rule can win with a zero discount (e.g. a main course but no
    /// beverages); that still reads as no discount.
    pub fn message(&self) -> String {
        match self.rule {
            Some(rule) if self.discount.is_positive() => format!("{}: -{}", rule, self.discount),
            _ => NO_DISCOUNT_MESSAGE.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
