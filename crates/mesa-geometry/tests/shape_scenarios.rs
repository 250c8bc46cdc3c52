//! End-to-end geometry scenarios: build shapes from points or edges, measure them.

use mesa_geometry::{
    Diagnostic, GeometryConfig, Line, Measure, Parts, Point, QuadKind, Rectangle, Shape,
    ShapeKind, SharedPoint, Triangle, TriangleKind,
};

fn edges_of(coords: &[(f64, f64)]) -> Vec<Line> {
    let points: Vec<SharedPoint> = coords.iter().map(|&(x, y)| SharedPoint::new(x, y)).collect();
    let n = points.len();
    (0..n)
        .map(|i| Line::new(points[i].clone(), points[(i + 1) % n].clone()))
        .collect()
}

fn check_failed(shape: &Shape) -> bool {
    shape.diagnostics().iter().any(Diagnostic::is_check_failure)
}

// =============================================================================
// Points and lines
// =============================================================================

#[test]
fn line_follows_a_moved_shared_point() {
    let end = SharedPoint::new(3.0, 4.0);
    let line = Line::new(SharedPoint::from(Point::ORIGIN), end.clone());
    assert_eq!(line.length(), 5.0);

    end.set_x(0.0);
    assert_eq!(line.length(), 4.0);
    assert_eq!(line.slope(), 90.0);
}

#[test]
fn non_finite_coordinates_keep_the_old_value() {
    let p = SharedPoint::new(1.0, 1.0);
    assert!(p.set_y(f64::NAN).is_some());
    assert_eq!(p.get(), Point::new(1.0, 1.0));
}

// =============================================================================
// Triangles
// =============================================================================

#[test]
fn right_triangle_area_perimeter_and_angles() {
    let parts = Parts::points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
    let shape = Shape::from(Triangle::new(parts));

    assert_eq!(shape.area(), Some(6.0));
    assert_eq!(shape.perimeter(), Some(12.0));

    let angles = shape.inner_angles().unwrap();
    assert_eq!(angles.len(), 3);
    assert!((angles.iter().sum::<f64>() - 180.0).abs() < 1e-6);
    // The right angle faces the hypotenuse, which is the second edge.
    assert!((angles[1] - 90.0).abs() < 1e-6);
}

#[test]
fn equilateral_from_equal_edges_has_no_warning() {
    let h = 3f64.sqrt() / 2.0;
    let edges = edges_of(&[(0.0, 0.0), (1.0, 0.0), (0.5, h)]);
    let triangle = Triangle::equilateral(Parts::Edges(edges));
    let shape = Shape::from(triangle);

    assert_eq!(shape.kind(), ShapeKind::Triangle(TriangleKind::Equilateral));
    assert!(!check_failed(&shape));
    assert!(shape.outline().is_regular());
}

#[test]
fn equilateral_from_unequal_edges_warns_but_builds() {
    let edges = edges_of(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
    let triangle = Triangle::equilateral(Parts::Edges(edges));
    let shape = Shape::from(triangle);

    assert!(check_failed(&shape));
    assert_eq!(shape.outline().vertices().len(), 3);
    assert_eq!(shape.area(), Some(6.0));
}

#[test]
fn wrong_vertex_count_is_reported_not_fatal() {
    let triangle = Triangle::new(Parts::points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 3.0)]));
    assert!(matches!(
        triangle.outline().diagnostics(),
        [Diagnostic::MalformedShape { expected: 3, vertices: 4, edges: 0, .. }]
    ));
    assert_eq!(triangle.compute_area(), 0.0);
}

#[test]
fn open_edge_chain_is_flagged_when_configured() {
    let config = GeometryConfig {
        require_closed_chain: true,
        ..GeometryConfig::default()
    };
    let mut edges = edges_of(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
    edges[2] = Line::new(SharedPoint::new(0.0, 3.5), SharedPoint::new(0.0, 0.0));

    let triangle = Triangle::build(TriangleKind::Plain, Parts::Edges(edges), &config);
    assert_eq!(triangle.outline().diagnostics(), &[Diagnostic::OpenChain { edge: 1 }]);
}

// =============================================================================
// Rectangles and squares
// =============================================================================

#[test]
fn true_square_has_no_warning() {
    let edges = edges_of(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    let square = Rectangle::square(Parts::Edges(edges));
    let shape = Shape::from(square);

    assert_eq!(shape.kind(), ShapeKind::Square);
    assert!(!check_failed(&shape));
    assert_eq!(shape.area(), Some(4.0));
    assert_eq!(shape.perimeter(), Some(8.0));
}

#[test]
fn square_with_unequal_edges_warns() {
    let edges = edges_of(&[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)]);
    let square = Rectangle::square(Parts::Edges(edges));
    assert_eq!(square.kind(), QuadKind::Square);
    assert!(check_failed(&Shape::from(square)));
}

#[test]
fn refresh_stores_angles_on_the_shape() {
    let parts = Parts::points(&[(0.0, 0.0), (5.0, 0.0), (5.0, 1.0), (0.0, 1.0)]);
    let mut shape = Shape::from(Rectangle::new(parts));
    assert!(shape.outline().inner_angles().is_empty());

    assert_eq!(shape.refresh_inner_angles(), Some(vec![90.0; 4]));
    assert_eq!(shape.outline().inner_angles(), &[90.0; 4]);
    assert_eq!(
        shape.to_string(),
        "rectangle [Point(0, 0), Point(5, 0), Point(5, 1), Point(0, 1)]"
    );
}
