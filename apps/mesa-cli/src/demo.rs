//! Sample order and shapes printed by the `mesa` binary.

use std::rc::Rc;

use mesa_billing::{BillingResult, Card, MenuItem, Money, Order};
use mesa_geometry::{
    GeometryConfig, Measure, Parts, Point, QuadKind, Rectangle, Shape, Triangle, TriangleKind,
};
use serde::Serialize;

pub const SAMPLE_CARD_NUMBER: &str = "1234567890123456";
pub const SAMPLE_CVV: &str = "123";

fn dollars(major: i64) -> Money {
    Money::from_major_minor(major, 0)
}

/// Two beverages and a main course: the main-course beverage discount applies.
pub fn sample_order() -> BillingResult<Order> {
    let mut order = Order::new(1)?;
    order.add_item(Rc::new(MenuItem::beverage("Cola", dollars(3500), 3, "Cola")?));
    order.add_item(Rc::new(MenuItem::main_course("Steak", dollars(15000), 1, "Salad")?));
    order.add_item(Rc::new(MenuItem::beverage("Lemonade", dollars(2500), 2, "Lemon")?));
    Ok(order)
}

pub fn sample_card() -> BillingResult<Card> {
    Ok(Card::new(SAMPLE_CARD_NUMBER, SAMPLE_CVV)?)
}

pub fn sample_shapes(config: &GeometryConfig) -> Vec<Shape> {
    let h = 3f64.sqrt();
    vec![
        Triangle::build(
            TriangleKind::Right,
            Parts::points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]),
            config,
        )
        .into(),
        Triangle::build(
            TriangleKind::Equilateral,
            Parts::points(&[(0.0, 0.0), (2.0, 0.0), (1.0, h)]),
            config,
        )
        .into(),
        Rectangle::build(
            QuadKind::Rectangle,
            Parts::points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]),
            config,
        )
        .into(),
        Rectangle::build(
            QuadKind::Square,
            Parts::points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)]),
            config,
        )
        .into(),
    ]
}

/// Measurements of one shape, ready for printing or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeReport {
    pub kind: String,
    pub vertices: Vec<Point>,
    pub area: Option<f64>,
    pub perimeter: Option<f64>,
    pub inner_angles: Option<Vec<f64>>,
    pub warnings: Vec<String>,
}

impl ShapeReport {
    pub fn measure(shape: &mut Shape) -> Self {
        let inner_angles = shape.refresh_inner_angles();
        ShapeReport {
            kind: shape.kind().to_string(),
            vertices: shape.outline().vertices().iter().map(|v| v.get()).collect(),
            area: shape.area(),
            perimeter: shape.perimeter(),
            inner_angles,
            warnings: shape.diagnostics().iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_order_total() {
        let order = sample_order().unwrap();
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.total_price(), dollars(30500));

        let outcome = order.calculate_discount();
        assert_eq!(outcome.discount, dollars(1550));
        assert_eq!(outcome.total, dollars(28950));
    }

    #[test]
    fn test_sample_card_is_valid() {
        assert_eq!(sample_card().unwrap().last_four(), "3456");
    }

    #[test]
    fn test_sample_shapes_report() {
        let mut shapes = sample_shapes(&GeometryConfig::default());
        let reports: Vec<ShapeReport> = shapes.iter_mut().map(ShapeReport::measure).collect();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].kind, "right triangle");
        assert_eq!(reports[0].area, Some(6.0));
        assert!(reports[0].warnings.is_empty());
        assert!(reports[1].warnings.is_empty());
        assert_eq!(reports[2].perimeter, Some(12.0));
        assert_eq!(reports[3].kind, "square");
        assert_eq!(
            reports[3].warnings,
            vec!["this square does not have four equal sides".to_string()]
        );
    }
}
