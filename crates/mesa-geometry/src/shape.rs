//! # Shapes
//!
//! Every shape is an [`Outline`] (vertices, edges, inner angles, regular
//! flag, construction diagnostics) plus variant-specific measurement rules.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shape                                                                  │
//! │  ├── Polygon(Outline)    measurements not implemented → None            │
//! │  ├── Triangle(Triangle)  Heron area, law-of-cosines angles              │
//! │  │     kind: Plain | Isosceles | Equilateral | Scalene | Right          │
//! │  └── Rectangle(Rectangle) width × height, four right angles             │
//! │        kind: Rectangle | Square                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Building From Parts
//! A triangle or rectangle is built from exactly N vertices (edges are
//! derived cyclically: v0→v1, v1→v2, …, vN-1→v0) or exactly N edges
//! (vertices are taken from the chain: e0.start, e0.end, e1.end, …).
//! An edge list is assumed to be a closed chain; it is only checked when
//! [`GeometryConfig::require_closed_chain`] is set.

use std::fmt;

use crate::config::GeometryConfig;
use crate::diagnostic::Diagnostic;
use crate::line::Line;
use crate::point::SharedPoint;
use crate::rectangle::{QuadKind, Rectangle};
use crate::triangle::{Triangle, TriangleKind};

// =============================================================================
// Measurement Capability
// =============================================================================

/// Area, perimeter and inner angles of a shape.
///
/// `None` means the shape does not know how to measure itself.
pub trait Measure {
    fn area(&self) -> Option<f64>;
    fn perimeter(&self) -> Option<f64>;
    /// Inner angles in degrees, one per vertex.
    fn inner_angles(&self) -> Option<Vec<f64>>;
}

// =============================================================================
// Parts
// =============================================================================

/// What a triangle or rectangle is built from.
#[derive(Debug, Clone)]
pub enum Parts {
    Vertices(Vec<SharedPoint>),
    Edges(Vec<Line>),
}

impl Parts {
    /// Vertices from plain coordinate pairs, each in its own shared point.
    pub fn points(coords: &[(f64, f64)]) -> Self {
        Parts::Vertices(coords.iter().map(|&(x, y)| SharedPoint::new(x, y)).collect())
    }
}

// =============================================================================
// Outline
// =============================================================================

/// Data common to every shape.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    vertices: Vec<SharedPoint>,
    edges: Vec<Line>,
    inner_angles: Vec<f64>,
    is_regular: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Outline {
    /// Stores the given parts as they are, without deriving anything.
    pub fn new(vertices: Vec<SharedPoint>, edges: Vec<Line>) -> Self {
        Outline {
            vertices,
            edges,
            ..Outline::default()
        }
    }

    /// Builds an outline with exactly `expected` vertices and edges.
    ///
    /// A wrong count keeps the given parts unchanged and records a
    /// `MalformedShape` diagnostic.
    pub(crate) fn assemble(
        shape: &'static str,
        expected: usize,
        parts: Parts,
        config: &GeometryConfig,
    ) -> Self {
        match parts {
            Parts::Vertices(vertices) if vertices.len() == expected => {
                let edges = cyclic_edges(&vertices);
                Outline::new(vertices, edges)
            }
            Parts::Edges(edges) if edges.len() == expected => {
                let vertices = chain_vertices(&edges);
                let mut outline = Outline::new(vertices, edges);
                if config.require_closed_chain {
                    for edge in open_joints(&outline.edges, config.tolerance) {
                        outline.record(Diagnostic::OpenChain { edge });
                    }
                }
                outline
            }
            parts => {
                let (vertices, edges) = match parts {
                    Parts::Vertices(v) => (v, Vec::new()),
                    Parts::Edges(e) => (Vec::new(), e),
                };
                let mut outline = Outline::new(vertices, edges);
                outline.record(Diagnostic::MalformedShape {
                    shape,
                    expected,
                    vertices: outline.vertices.len(),
                    edges: outline.edges.len(),
                });
                outline
            }
        }
    }

    pub fn vertices(&self) -> &[SharedPoint] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Line] {
        &self.edges
    }

    pub fn inner_angles(&self) -> &[f64] {
        &self.inner_angles
    }

    pub fn is_regular(&self) -> bool {
        self.is_regular
    }

    /// Diagnostics recorded while the shape was built.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Replaces the vertex list; rejected if any vertex is non-finite.
    pub fn set_vertices(&mut self, vertices: Vec<SharedPoint>) -> Option<Diagnostic> {
        if vertices.iter().any(|v| !v.get().is_finite()) {
            return Some(Diagnostic::NonFinitePoint { role: "vertex" }.emit());
        }
        self.vertices = vertices;
        None
    }

    /// Replaces the edge list; rejected if any endpoint is non-finite.
    pub fn set_edges(&mut self, edges: Vec<Line>) -> Option<Diagnostic> {
        let finite = edges
            .iter()
            .all(|e| e.start().get().is_finite() && e.end().get().is_finite());
        if !finite {
            return Some(Diagnostic::NonFinitePoint { role: "edge endpoint" }.emit());
        }
        self.edges = edges;
        None
    }

    /// Replaces the stored inner angles; rejected if any is non-finite.
    pub fn set_inner_angles(&mut self, angles: Vec<f64>) -> Option<Diagnostic> {
        if let Some(&value) = angles.iter().find(|a| !a.is_finite()) {
            return Some(Diagnostic::NonFiniteAngle { value }.emit());
        }
        self.inner_angles = angles;
        None
    }

    pub fn set_regular(&mut self, is_regular: bool) {
        self.is_regular = is_regular;
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic.emit());
    }

    pub(crate) fn edge_lengths(&self) -> Vec<f64> {
        self.edges.iter().map(Line::length).collect()
    }
}

fn cyclic_edges(vertices: &[SharedPoint]) -> Vec<Line> {
    let n = vertices.len();
    (0..n)
        .map(|i| Line::new(vertices[i].clone(), vertices[(i + 1) % n].clone()))
        .collect()
}

fn chain_vertices(edges: &[Line]) -> Vec<SharedPoint> {
    let Some(first) = edges.first() else {
        return Vec::new();
    };
    std::iter::once(first.start().clone())
        .chain(edges[..edges.len() - 1].iter().map(|e| e.end().clone()))
        .collect()
}

/// Indices `i` where `edges[i].end` is not `edges[i + 1].start` (cyclic).
fn open_joints(edges: &[Line], tolerance: f64) -> Vec<usize> {
    let n = edges.len();
    (0..n)
        .filter(|&i| {
            let end = edges[i].end().get();
            let next_start = edges[(i + 1) % n].start().get();
            !end.approx_eq(&next_start, tolerance)
        })
        .collect()
}

// =============================================================================
// Shape
// =============================================================================

/// What kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Polygon,
    Triangle(TriangleKind),
    Rectangle,
    Square,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Polygon => f.write_str("polygon"),
            ShapeKind::Triangle(kind) => f.write_str(kind.name()),
            ShapeKind::Rectangle => f.write_str(QuadKind::Rectangle.name()),
            ShapeKind::Square => f.write_str(QuadKind::Square.name()),
        }
    }
}

/// Any supported shape.
#[derive(Debug, Clone)]
pub enum Shape {
    Polygon(Outline),
    Triangle(Triangle),
    Rectangle(Rectangle),
}

impl Shape {
    /// A generic shape that stores its parts but cannot measure itself.
    pub fn polygon(vertices: Vec<SharedPoint>, edges: Vec<Line>) -> Self {
        Shape::Polygon(Outline::new(vertices, edges))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Triangle(t) => ShapeKind::Triangle(t.kind()),
            Shape::Rectangle(r) => match r.kind() {
                QuadKind::Rectangle => ShapeKind::Rectangle,
                QuadKind::Square => ShapeKind::Square,
            },
        }
    }

    pub fn outline(&self) -> &Outline {
        match self {
            Shape::Polygon(outline) => outline,
            Shape::Triangle(t) => t.outline(),
            Shape::Rectangle(r) => r.outline(),
        }
    }

    pub fn outline_mut(&mut self) -> &mut Outline {
        match self {
            Shape::Polygon(outline) => outline,
            Shape::Triangle(t) => t.outline_mut(),
            Shape::Rectangle(r) => r.outline_mut(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.outline().diagnostics()
    }

    /// Computes the inner angles and stores them on the outline.
    pub fn refresh_inner_angles(&mut self) -> Option<Vec<f64>> {
        let angles = self.inner_angles()?;
        self.outline_mut().inner_angles = angles.clone();
        Some(angles)
    }
}

fn not_implemented(operation: &'static str) {
    Diagnostic::NotImplemented { operation }.emit();
}

impl Measure for Shape {
    fn area(&self) -> Option<f64> {
        match self {
            Shape::Polygon(_) => {
                not_implemented("area");
                None
            }
            Shape::Triangle(t) => t.area(),
            Shape::Rectangle(r) => r.area(),
        }
    }

    fn perimeter(&self) -> Option<f64> {
        match self {
            Shape::Polygon(_) => {
                not_implemented("perimeter");
                None
            }
            Shape::Triangle(t) => t.perimeter(),
            Shape::Rectangle(r) => r.perimeter(),
        }
    }

    fn inner_angles(&self) -> Option<Vec<f64>> {
        match self {
            Shape::Polygon(_) => {
                not_implemented("inner angles");
                None
            }
            Shape::Triangle(t) => Measure::inner_angles(t),
            Shape::Rectangle(r) => Measure::inner_angles(r),
        }
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}

/// `right triangle [Point(0, 0), Point(4, 0), Point(0, 3)]`
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.kind())?;
        for (i, vertex) in self.outline().vertices().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", vertex)?;
        }
        f.write_str("]")
    }
}
