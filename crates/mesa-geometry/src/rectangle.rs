//! # Rectangles and Squares
//!
//! Width is the length of the first edge and height the length of the
//! second. Opposite sides and corner angles are never checked, so a skewed
//! quadrilateral still measures as `width × height` with four right angles.

use tracing::debug;

use crate::config::GeometryConfig;
use crate::diagnostic::Diagnostic;
use crate::shape::{Measure, Outline, Parts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadKind {
    #[default]
    Rectangle,
    /// Four equal sides, checked after construction.
    Square,
}

impl QuadKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuadKind::Rectangle => "rectangle",
            QuadKind::Square => "square",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rectangle {
    outline: Outline,
    kind: QuadKind,
}

impl Rectangle {
    pub fn new(parts: Parts) -> Self {
        Self::build(QuadKind::Rectangle, parts, &GeometryConfig::default())
    }

    pub fn square(parts: Parts) -> Self {
        Self::build(QuadKind::Square, parts, &GeometryConfig::default())
    }

    /// Builds from 4 vertices or 4 edges. Both kinds are regular.
    pub fn build(kind: QuadKind, parts: Parts, config: &GeometryConfig) -> Self {
        let mut outline = Outline::assemble(kind.name(), 4, parts, config);
        outline.set_regular(true);

        let mut rectangle = Rectangle { outline, kind };
        if kind == QuadKind::Square {
            rectangle.check_square(config);
        }
        debug!(
            kind = kind.name(),
            width = rectangle.width(),
            height = rectangle.height(),
            "Rectangle built"
        );
        rectangle
    }

    fn check_square(&mut self, config: &GeometryConfig) {
        let lengths = self.outline.edge_lengths();
        if lengths.len() != 4 {
            return;
        }
        if !lengths.iter().all(|&l| config.same_length(l, lengths[0])) {
            self.outline.record(Diagnostic::CheckFailed {
                shape: QuadKind::Square.name(),
                reason: "does not have four equal sides",
            });
        }
    }

    pub fn kind(&self) -> QuadKind {
        self.kind
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut Outline {
        &mut self.outline
    }

    /// Length of the first edge, `0` when there is none.
    pub fn width(&self) -> f64 {
        self.outline.edges().first().map_or(0.0, |e| e.length())
    }

    /// Length of the second edge, `0` when there is none.
    pub fn height(&self) -> f64 {
        self.outline.edges().get(1).map_or(0.0, |e| e.length())
    }

    pub fn compute_area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn compute_perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    pub fn compute_inner_angles(&self) -> Vec<f64> {
        vec![90.0; 4]
    }

    pub fn refresh_inner_angles(&mut self) -> Vec<f64> {
        let angles = self.compute_inner_angles();
        self.outline.set_inner_angles(angles.clone());
        angles
    }
}

impl Measure for Rectangle {
    fn area(&self) -> Option<f64> {
        Some(self.compute_area())
    }

    fn perimeter(&self) -> Option<f64> {
        Some(self.compute_perimeter())
    }

    fn inner_angles(&self) -> Option<Vec<f64>> {
        Some(self.compute_inner_angles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use crate::point::SharedPoint;

    fn corners(w: f64, h: f64) -> Parts {
        Parts::points(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
    }

    #[test]
    fn test_measurements() {
        let r = Rectangle::new(corners(4.0, 2.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
        assert_eq!(r.compute_area(), 8.0);
        assert_eq!(r.compute_perimeter(), 12.0);
        assert_eq!(r.compute_inner_angles(), vec![90.0; 4]);
        assert!(r.outline().is_regular());
        assert!(r.outline().diagnostics().is_empty());
    }

    #[test]
    fn test_from_edges_takes_chain_vertices() {
        let p: Vec<SharedPoint> = [(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]
            .iter()
            .map(|&(x, y)| SharedPoint::new(x, y))
            .collect();
        let edges = (0..4)
            .map(|i| Line::new(p[i].clone(), p[(i + 1) % 4].clone()))
            .collect();
        let sq = Rectangle::square(Parts::Edges(edges));
        let vertices = sq.outline().vertices();
        assert_eq!(vertices.len(), 4);
        assert!(vertices[3].ptr_eq(&p[3]));
        assert!(sq.outline().diagnostics().is_empty());
    }

    #[test]
    fn test_square_check() {
        assert!(Rectangle::square(corners(2.0, 2.0)).outline().diagnostics().is_empty());

        let skewed = Rectangle::square(corners(2.0, 3.0));
        assert_eq!(
            skewed.outline().diagnostics(),
            &[Diagnostic::CheckFailed {
                shape: "square",
                reason: "does not have four equal sides",
            }]
        );
        assert_eq!(skewed.kind(), QuadKind::Square);
        assert_eq!(skewed.compute_area(), 6.0);
    }

    #[test]
    fn test_malformed_rectangle() {
        let r = Rectangle::new(Parts::points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
        assert_eq!(r.outline().diagnostics().len(), 1);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.compute_area(), 0.0);
    }

    #[test]
    fn test_refresh_stores_angles() {
        let mut r = Rectangle::new(corners(1.0, 1.0));
        assert!(r.outline().inner_angles().is_empty());
        r.refresh_inner_angles();
        assert_eq!(r.outline().inner_angles(), &[90.0; 4]);
    }
}
