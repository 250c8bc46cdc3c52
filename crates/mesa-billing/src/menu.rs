//! # Menu Items
//!
//! A menu item is one order line: name, unit price, amount and a category tag.
//!
//! ## Item Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         MenuItem                                        │
//! │  name (trimmed) · price (Money ≥ 0) · amount (≥ 0) · category tag       │
//! │                                                                         │
//! │  kind: MenuKind                                                         │
//! │  ├── Standard                     category: caller's choice            │
//! │  ├── Beverage { flavour }         category default "Beverage"          │
//! │  └── MainCourse { appetizer }     category default "Main Course"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is validated on construction and on every setter; a
//! failing check returns a [`ValidationError`] and leaves the item untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_amount, validate_line_total, validate_price, validate_text, ValidationResult,
};

// =============================================================================
// Category Tags
// =============================================================================

/// Category tag used by beverages and the beverage discount rules.
pub const BEVERAGE: &str = "Beverage";
/// Category tag used by main courses.
pub const MAIN_COURSE: &str = "Main Course";
/// Category tag counted by the dessert rules.
pub const DESSERT: &str = "Dessert";
/// Category tag totalled by the seafood rule.
pub const SEA_FOOD: &str = "Sea Food";

// =============================================================================
// Priceable
// =============================================================================

/// Anything that contributes a line total to an order.
pub trait Priceable {
    /// Price × amount.
    fn total_price(&self) -> Money;
}

// =============================================================================
// Item Kinds
// =============================================================================

/// Extra data carried by a beverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Beverage {
    flavour: String,
}

impl Beverage {
    /// Creates beverage data; the flavour must be non-blank.
    pub fn new(flavour: &str) -> ValidationResult<Self> {
        Ok(Beverage {
            flavour: validate_text("flavour", flavour)?,
        })
    }

    pub fn flavour(&self) -> &str {
        &self.flavour
    }

    pub fn set_flavour(&mut self, flavour: &str) -> ValidationResult<()> {
        self.flavour = validate_text("flavour", flavour)?;
        Ok(())
    }
}

/// Extra data carried by a main course.
///
/// The appetizer may be empty (no starter); it is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainCourse {
    appetizer: String,
}

impl MainCourse {
    pub fn new(appetizer: &str) -> Self {
        MainCourse {
            appetizer: appetizer.trim().to_string(),
        }
    }

    pub fn appetizer(&self) -> &str {
        &self.appetizer
    }

    pub fn set_appetizer(&mut self, appetizer: &str) {
        self.appetizer = appetizer.trim().to_string();
    }
}

/// Which kind of menu item this is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuKind {
    /// Plain item (desserts, seafood, sides...).
    #[default]
    Standard,
    Beverage(Beverage),
    MainCourse(MainCourse),
}

// =============================================================================
// Menu Item
// =============================================================================

/// A single order line.
///
/// ## Example
/// ```rust
/// use mesa_billing::menu::{MenuItem, Priceable};
/// use mesa_billing::money::Money;
///
/// let cola = MenuItem::beverage("Cola", Money::from_major_minor(3500, 0), 3, "Cola").unwrap();
/// assert_eq!(cola.category(), Some("Beverage"));
/// assert_eq!(cola.total_price(), Money::from_major_minor(10500, 0));
/// ```
///
/// Deserialization goes through the same validation as the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MenuItemRecord")]
pub struct MenuItem {
    name: String,
    price: Money,
    amount: i64,
    category: Option<String>,
    #[serde(flatten)]
    kind: MenuKind,
}

/// Unvalidated wire form of a [`MenuItem`].
#[derive(Deserialize)]
struct MenuItemRecord {
    name: String,
    price: Money,
    amount: i64,
    #[serde(default)]
    category: Option<String>,
    #[serde(flatten)]
    kind: MenuKindRecord,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum MenuKindRecord {
    Standard,
    Beverage { flavour: String },
    MainCourse { appetizer: String },
}

impl TryFrom<MenuItemRecord> for MenuItem {
    type Error = ValidationError;

    fn try_from(record: MenuItemRecord) -> ValidationResult<Self> {
        let MenuItemRecord {
            name,
            price,
            amount,
            category,
            kind,
        } = record;
        let mut item = match kind {
            MenuKindRecord::Standard => MenuItem::new(&name, price, amount)?,
            MenuKindRecord::Beverage { flavour } => {
                MenuItem::beverage(&name, price, amount, &flavour)?
            }
            MenuKindRecord::MainCourse { appetizer } => {
                MenuItem::main_course(&name, price, amount, &appetizer)?
            }
        };
        item.category = category;
        Ok(item)
    }
}

impl MenuItem {
    /// Creates a standard item with no category tag.
    ///
    /// ## Errors
    /// - blank `name` → `Required`
    /// - negative `price` or `amount` → `MustBeNonNegative`
    pub fn new(name: &str, price: Money, amount: i64) -> ValidationResult<Self> {
        validate_price(price)?;
        validate_amount(amount)?;
        validate_line_total(price, amount)?;
        Ok(MenuItem {
            name: validate_text("name", name)?,
            price,
            amount,
            category: None,
            kind: MenuKind::Standard,
        })
    }

    /// Creates a beverage tagged `"Beverage"`.
    pub fn beverage(
        name: &str,
        price: Money,
        amount: i64,
        flavour: &str,
    ) -> ValidationResult<Self> {
        let mut item = MenuItem::new(name, price, amount)?;
        item.kind = MenuKind::Beverage(Beverage::new(flavour)?);
        item.category = Some(BEVERAGE.to_string());
        Ok(item)
    }

    /// Creates a main course tagged `"Main Course"`.
    pub fn main_course(
        name: &str,
        price: Money,
        amount: i64,
        appetizer: &str,
    ) -> ValidationResult<Self> {
        let mut item = MenuItem::new(name, price, amount)?;
        item.kind = MenuKind::MainCourse(MainCourse::new(appetizer));
        item.category = Some(MAIN_COURSE.to_string());
        Ok(item)
    }

    /// Replaces the category tag at construction time.
    ///
    /// ```rust
    /// use mesa_billing::menu::MenuItem;
    /// use mesa_billing::money::Money;
    ///
    /// let cake = MenuItem::new("Cake", Money::from_cents(900), 1)
    ///     .unwrap()
    ///     .with_category("Dessert");
    /// assert_eq!(cake.category(), Some("Dessert"));
    /// ```
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn kind(&self) -> &MenuKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut MenuKind {
        &mut self.kind
    }

    /// True when the category tag equals `category` exactly.
    pub fn is_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate_text("name", name)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: Money) -> ValidationResult<()> {
        validate_price(price)?;
        validate_line_total(price, self.amount)?;
        self.price = price;
        Ok(())
    }

    pub fn set_amount(&mut self, amount: i64) -> ValidationResult<()> {
        validate_amount(amount)?;
        validate_line_total(self.price, amount)?;
        self.amount = amount;
        Ok(())
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    /// Updates the flavour of a beverage.
    ///
    /// ## Errors
    /// `InvalidFormat` when this item is not a beverage.
    pub fn set_flavour(&mut self, flavour: &str) -> ValidationResult<()> {
        match &mut self.kind {
            MenuKind::Beverage(beverage) => beverage.set_flavour(flavour),
            _ => Err(ValidationError::InvalidFormat {
                field: "flavour".to_string(),
                reason: format!("{} is not a beverage", self.name),
            }),
        }
    }

    /// Updates the appetizer of a main course.
    ///
    /// ## Errors
    /// `InvalidFormat` when this item is not a main course.
    pub fn set_appetizer(&mut self, appetizer: &str) -> ValidationResult<()> {
        match &mut self.kind {
            MenuKind::MainCourse(course) => {
                course.set_appetizer(appetizer);
                Ok(())
            }
            _ => Err(ValidationError::InvalidFormat {
                field: "appetizer".to_string(),
                reason: format!("{} is not a main course", self.name),
            }),
        }
    }
}

impl Priceable for MenuItem {
    fn total_price(&self) -> Money {
        self.price.multiply_quantity(self.amount)
    }
}

/// `Beverage - Cola (Cola) - $3500.00 x 3`
impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.as_deref().unwrap_or("Uncategorized");
        match &self.kind {
            MenuKind::Standard => write!(f, "{} - {}", category, self.name)?,
            MenuKind::Beverage(beverage) => {
                write!(f, "{} - {} ({})", category, self.name, beverage.flavour)?
            }
            MenuKind::MainCourse(course) => write!(
                f,
                "{} - {} with appetizer {}",
                category, self.name, course.appetizer
            )?,
        }
        write!(f, " - {} x {}", self.price, self.amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dollars(major: i64) -> Money {
        Money::from_major_minor(major, 0)
    }

    #[test]
    fn test_new_trims_name() {
        let item = MenuItem::new("  Flan ", dollars(12), 2).unwrap();
        assert_eq!(item.name(), "Flan");
        assert_eq!(item.category(), None);
        assert_eq!(item.kind(), &MenuKind::Standard);
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        assert_eq!(
            MenuItem::new("", dollars(1), 1),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(matches!(
            MenuItem::new("x", Money::from_cents(-100), 1),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            MenuItem::new("x", dollars(1), -1),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_beverage_requires_flavour() {
        assert!(MenuItem::beverage("Juice", dollars(5), 1, "  ").is_err());

        let juice = MenuItem::beverage("Juice", dollars(5), 1, " Mango ").unwrap();
        assert_eq!(juice.category(), Some(BEVERAGE));
        match juice.kind() {
            MenuKind::Beverage(b) => assert_eq!(b.flavour(), "Mango"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_main_course_allows_empty_appetizer() {
        let steak = MenuItem::main_course("Steak", dollars(15000), 1, "").unwrap();
        assert_eq!(steak.category(), Some(MAIN_COURSE));
        assert_eq!(
            steak.to_string(),
            "Main Course - Steak with appetizer  - $15000.00 x 1"
        );
    }

    #[test]
    fn test_category_override() {
        let mocktail = MenuItem::beverage("Mojito", dollars(20), 1, "Mint")
            .unwrap()
            .with_category("Cocktail");
        assert!(mocktail.is_category("Cocktail"));
        assert!(!mocktail.is_category(BEVERAGE));
    }

    #[test]
    fn test_setters_keep_value_on_error() {
        let mut item = MenuItem::new("Soup", dollars(8), 2).unwrap();

        assert!(item.set_price(Money::from_cents(-1)).is_err());
        assert_eq!(item.price(), dollars(8));

        assert!(item.set_amount(-4).is_err());
        assert_eq!(item.amount(), 2);

        assert!(item.set_name(" ").is_err());
        assert_eq!(item.name(), "Soup");

        item.set_amount(5).unwrap();
        assert_eq!(item.total_price(), dollars(40));
    }

    #[test]
    fn test_kind_specific_setters() {
        let mut cola = MenuItem::beverage("Cola", dollars(3), 1, "Cola").unwrap();
        cola.set_flavour("Cherry").unwrap();
        assert!(cola.set_flavour("").is_err());
        assert!(cola.set_appetizer("Bread").is_err());
        assert_eq!(cola.to_string(), "Beverage - Cola (Cherry) - $3.00 x 1");

        let mut steak = MenuItem::main_course("Steak", dollars(30), 1, "Salad").unwrap();
        steak.set_appetizer(" Soup ").unwrap();
        assert!(steak.set_flavour("Smoky").is_err());
        assert!(steak.to_string().contains("with appetizer Soup"));
    }

    #[test]
    fn test_display_standard() {
        let cake = MenuItem::new("Cake", Money::from_cents(950), 2)
            .unwrap()
            .with_category(DESSERT);
        assert_eq!(cake.to_string(), "Dessert - Cake - $9.50 x 2");

        let bare = MenuItem::new("Bread", Money::zero(), 1).unwrap();
        assert_eq!(bare.to_string(), "Uncategorized - Bread - $0.00 x 1");
    }

    #[test]
    fn test_line_total_overflow_is_rejected() {
        let half = Money::from_cents(i64::MAX / 2);
        assert!(matches!(
            MenuItem::new("Caviar", half, 3),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mut caviar = MenuItem::new("Caviar", half, 2).unwrap();
        assert_eq!(caviar.total_price().cents(), i64::MAX - 1);
        assert!(caviar.set_amount(3).is_err());
        assert_eq!(caviar.amount(), 2);
        assert!(caviar.set_price(Money::from_cents(i64::MAX)).is_err());
        assert_eq!(caviar.price(), half);
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"name":"","price":500,"amount":-3,"category":null,"kind":"standard"}"#;
        assert!(serde_json::from_str::<MenuItem>(bad).is_err());

        let negative = r#"{"name":"Soup","price":500,"amount":-3,"kind":"standard"}"#;
        assert!(serde_json::from_str::<MenuItem>(negative).is_err());

        let blank_flavour =
            r#"{"name":"Cola","price":350,"amount":1,"kind":"beverage","flavour":" "}"#;
        assert!(serde_json::from_str::<MenuItem>(blank_flavour).is_err());
    }

    #[test]
    fn test_deserialize_round_trips_valid_items() {
        let cola = MenuItem::beverage("Cola", dollars(3), 2, "Cola").unwrap();
        let json = serde_json::to_string(&cola).unwrap();
        assert_eq!(serde_json::from_str::<MenuItem>(&json).unwrap(), cola);

        let steak = MenuItem::main_course("Steak", dollars(30), 1, "Salad")
            .unwrap()
            .with_category("Grill");
        let json = serde_json::to_string(&steak).unwrap();
        assert_eq!(serde_json::from_str::<MenuItem>(&json).unwrap(), steak);
    }

    proptest! {
        #[test]
        fn prop_total_is_price_times_amount(cents in 0i64..10_000_000, amount in 0i64..1_000) {
            let item = MenuItem::new("Dish", Money::from_cents(cents), amount).unwrap();
            prop_assert_eq!(item.total_price().cents(), cents * amount);
            prop_assert!(!item.total_price().is_negative());
        }
    }
}
