//! # mesa-geometry: 2D Shape Measurements
//!
//! Points, lines and shapes with area, perimeter and inner angles.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          mesa-geometry                                  │
//! │                                                                         │
//! │   ┌───────────┐     ┌───────────┐     ┌──────────────────────────────┐  │
//! │   │   point   │ ──► │   line    │ ──► │ shape                        │  │
//! │   │ Point     │     │ length    │     │ ├── triangle  (5 kinds)      │  │
//! │   │ SharedPt  │     │ slope     │     │ └── rectangle (rect, square) │  │
//! │   └───────────┘     └───────────┘     └──────────────────────────────┘  │
//! │                                                                         │
//! │   diagnostic (lenient warnings) · config (tolerance)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Lenient**: bad input yields a [`Diagnostic`] and a safe fallback
//! 2. **Shared Vertices**: lines hold [`SharedPoint`] handles, so moving a
//!    vertex moves every edge that touches it
//! 3. **Computed on Access**: lengths, slopes and areas are never cached
//!
//! ## Example Usage
//!
//! ```rust
//! use mesa_geometry::{Measure, Parts, Shape, Triangle};
//!
//! let triangle = Triangle::right(Parts::points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]));
//! assert!(triangle.outline().diagnostics().is_empty());
//!
//! let shape = Shape::from(triangle);
//! assert_eq!(shape.area(), Some(6.0));
//! assert_eq!(shape.perimeter(), Some(12.0));
//! ```

pub mod config;
pub mod diagnostic;
pub mod line;
pub mod point;
pub mod rectangle;
pub mod shape;
pub mod triangle;

pub use config::{GeometryConfig, DEFAULT_TOLERANCE};
pub use diagnostic::Diagnostic;
pub use line::Line;
pub use point::{Point, SharedPoint};
pub use rectangle::{QuadKind, Rectangle};
pub use shape::{Measure, Outline, Parts, Shape, ShapeKind};
pub use triangle::{Triangle, TriangleKind};
