//! # mesa-billing: Restaurant Orders, Discounts and Payments
//!
//! Pure billing logic with zero I/O. Payment "side effects" come back as
//! receipts and structured `tracing` events.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          mesa-billing                                   │
//! │                                                                         │
//! │   ┌───────────┐     ┌───────────┐     ┌────────────┐     ┌──────────┐  │
//! │   │   menu    │ ──► │   order   │ ──► │  discount  │ ──► │ payment  │  │
//! │   │ MenuItem  │     │   Order   │     │  Policy    │     │ Card     │  │
//! │   │ Beverage  │     │  totals   │     │  Outcome   │     │ Cash     │  │
//! │   │ MainCourse│     │  filters  │     │  Rule      │     │ Payment  │  │
//! │   └───────────┘     └───────────┘     └────────────┘     └──────────┘  │
//! │                                                                         │
//! │   money (Money in cents) · validation · error                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: every amount is in cents (i64)
//! 2. **Fail Fast**: constructors and setters return `ValidationError`
//! 3. **Pure Discounts**: recomputed from the current items on every call
//!
//! ## Example Usage
//!
//! ```rust
//! use mesa_billing::{Cash, MenuItem, Money, Order, Payment, PaymentMethod};
//! use std::rc::Rc;
//!
//! let mut order = Order::new(1).unwrap();
//! let cola = MenuItem::beverage("Cola", Money::from_major_minor(3500, 0), 3, "Cola").unwrap();
//! let steak = MenuItem::main_course("Steak", Money::from_major_minor(15000, 0), 1, "Salad").unwrap();
//! order.add(cola);
//! order.add(steak);
//!
//! let outcome = order.calculate_discount();
//! assert_eq!(outcome.discount, Money::from_major_minor(1050, 0));
//!
//! let cash = Cash::new(Money::from_major_minor(30000, 0)).unwrap();
//! let payment = Payment::new(Rc::new(order), Box::new(cash));
//! assert!(payment.make_payment().is_settled());
//! ```

pub mod discount;
pub mod error;
pub mod menu;
pub mod money;
pub mod order;
pub mod payment;
pub mod validation;

pub use discount::{DiscountOutcome, DiscountPolicy, DiscountRule};
pub use error::{BillingError, BillingResult, ValidationError};
pub use menu::{MenuItem, MenuKind, Priceable};
pub use money::Money;
pub use order::{Order, OrderSummary};
pub use payment::{Card, Cash, CashOutcome, Payment, PaymentMethod, PaymentReceipt};
