//! # Triangles
//!
//! Area by Heron's formula, inner angles by the law of cosines.
//!
//! Sides are named in edge order, and each angle is named after the side
//! opposite it, so `inner_angles()[i]` faces edge `i`.
//!
//! ```text
//!            P2
//!           / \          a = |P0P1|   b = |P1P2|   c = |P2P0|
//!        c /   \ b       s = (a + b + c) / 2
//!         /     \        area = √(s(s-a)(s-b)(s-c))
//!       P0───────P1      A = acos((b² + c² - a²) / 2bc)   (at P2)
//!            a           B = acos((a² + c² - b²) / 2ac)   (at P0)
//!                        C = 180 - A - B                  (at P1)
//! ```
//!
//! Variant kinds run a consistency check after construction. A failed check
//! is recorded as a `CheckFailed` diagnostic; the triangle is still built.

use tracing::debug;

use crate::config::GeometryConfig;
use crate::diagnostic::Diagnostic;
use crate::shape::{Measure, Outline, Parts};

/// Which consistency check a triangle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleKind {
    #[default]
    Plain,
    /// At least two sides equal.
    Isosceles,
    /// All three sides equal. The only regular triangle.
    Equilateral,
    /// No two sides equal.
    Scalene,
    /// One inner angle of 90 degrees (rounded).
    Right,
}

impl TriangleKind {
    pub fn name(&self) -> &'static str {
        match self {
            TriangleKind::Plain => "triangle",
            TriangleKind::Isosceles => "isosceles triangle",
            TriangleKind::Equilateral => "equilateral triangle",
            TriangleKind::Scalene => "scalene triangle",
            TriangleKind::Right => "right triangle",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Triangle {
    outline: Outline,
    kind: TriangleKind,
}

impl Triangle {
    pub fn new(parts: Parts) -> Self {
        Self::build(TriangleKind::Plain, parts, &GeometryConfig::default())
    }

    pub fn isosceles(parts: Parts) -> Self {
        Self::build(TriangleKind::Isosceles, parts, &GeometryConfig::default())
    }

    pub fn equilateral(parts: Parts) -> Self {
        Self::build(TriangleKind::Equilateral, parts, &GeometryConfig::default())
    }

    pub fn scalene(parts: Parts) -> Self {
        Self::build(TriangleKind::Scalene, parts, &GeometryConfig::default())
    }

    pub fn right(parts: Parts) -> Self {
        Self::build(TriangleKind::Right, parts, &GeometryConfig::default())
    }

    /// Builds a triangle of `kind` from 3 vertices or 3 edges.
    ///
    /// The kind check is skipped for a malformed triangle.
    pub fn build(kind: TriangleKind, parts: Parts, config: &GeometryConfig) -> Self {
        let mut outline = Outline::assemble(kind.name(), 3, parts, config);
        outline.set_regular(kind == TriangleKind::Equilateral);

        let mut triangle = Triangle { outline, kind };
        if let Some(sides) = triangle.sides() {
            triangle.check_kind(sides, config);
        }
        debug!(
            kind = kind.name(),
            diagnostics = triangle.outline.diagnostics().len(),
            "Triangle built"
        );
        triangle
    }

    pub fn kind(&self) -> TriangleKind {
        self.kind
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut Outline {
        &mut self.outline
    }

    /// Side lengths `[a, b, c]` in edge order, if there are exactly 3 edges.
    fn sides(&self) -> Option<[f64; 3]> {
        match *self.outline.edge_lengths().as_slice() {
            [a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    fn check_kind(&mut self, [ab, bc, ca]: [f64; 3], config: &GeometryConfig) {
        let eq = |x: f64, y: f64| config.same_length(x, y);
        let kind = self.kind;
        let reason = match kind {
            TriangleKind::Plain => None,
            TriangleKind::Isosceles => (!(eq(ab, bc) || eq(bc, ca) || eq(ca, ab)))
                .then_some("does not have two equal sides"),
            TriangleKind::Equilateral => {
                (!(eq(ab, bc) && eq(bc, ca))).then_some("does not have three equal sides")
            }
            TriangleKind::Scalene => {
                (eq(ab, bc) || eq(bc, ca) || eq(ca, ab)).then_some("has two equal sides")
            }
            TriangleKind::Right => {
                let angles = self.refresh_inner_angles();
                (!angles.iter().any(|a| a.round() == 90.0)).then_some("has no 90 degree angle")
            }
        };
        if let Some(reason) = reason {
            self.outline.record(Diagnostic::CheckFailed {
                shape: kind.name(),
                reason,
            });
        }
    }

    fn heron(&self) -> Result<f64, Diagnostic> {
        let [a, b, c] = self.sides().ok_or(Diagnostic::DegenerateTriangle)?;
        let s = (a + b + c) / 2.0;
        let product = s * (s - a) * (s - b) * (s - c);
        if !(product >= 0.0) {
            return Err(Diagnostic::DegenerateTriangle);
        }
        Ok(product.sqrt())
    }

    /// Heron's formula; `0` (with a warning) when the sides cannot form a
    /// triangle.
    pub fn compute_area(&self) -> f64 {
        self.heron().unwrap_or_else(|d| {
            d.emit();
            0.0
        })
    }

    /// Sum of the edge lengths.
    pub fn compute_perimeter(&self) -> f64 {
        self.outline.edge_lengths().iter().sum()
    }

    fn law_of_cosines(&self) -> Result<Vec<f64>, Diagnostic> {
        let [a, b, c] = self.sides().ok_or(Diagnostic::InvalidAngles)?;
        let angle = |opposite: f64, x: f64, y: f64| {
            let cos = (x * x + y * y - opposite * opposite) / (2.0 * x * y);
            if cos.is_finite() && (-1.0..=1.0).contains(&cos) {
                Ok(cos.acos().to_degrees())
            } else {
                Err(Diagnostic::InvalidAngles)
            }
        };
        let at_a = angle(a, b, c)?;
        let at_b = angle(b, a, c)?;
        Ok(vec![at_a, at_b, 180.0 - at_a - at_b])
    }

    /// Angles in degrees, the `i`-th one opposite edge `i`; empty (with a
    /// warning) when they are undefined.
    pub fn compute_inner_angles(&self) -> Vec<f64> {
        self.law_of_cosines().unwrap_or_else(|d| {
            d.emit();
            Vec::new()
        })
    }

    /// Computes the inner angles and stores them on the outline.
    pub fn refresh_inner_angles(&mut self) -> Vec<f64> {
        let angles = self.compute_inner_angles();
        self.outline.set_inner_angles(angles.clone());
        angles
    }
}

impl Measure for Triangle {
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
