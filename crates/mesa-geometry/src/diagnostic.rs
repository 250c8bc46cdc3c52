//! # Diagnostics
//!
//! Geometry is lenient: invalid input never aborts an operation. Instead a
//! [`Diagnostic`] is logged at `WARN` and either returned to the caller or
//! stored on the shape, while the previous state (or a zero/empty result)
//! is kept.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                      Diagnostic             Fallback           │
//! │  ──────────────────────────  ─────────────────────  ─────────────────  │
//! │  Point::set_x(NaN)           NonFiniteCoordinate    keep old x         │
//! │  Line::set_start(bad point)  NonFinitePoint         keep old start     │
//! │  Outline::set_inner_angles   NonFiniteAngle         keep old angles    │
//! │  Triangle with 2 vertices    MalformedShape         keep given parts   │
//! │  Heron on collinear points   DegenerateTriangle     area 0             │
//! │  acos outside [-1, 1]        InvalidAngles          no angles          │
//! │  area of a bare polygon      NotImplemented         None               │
//! │  Square with unequal sides   CheckFailed            shape still built  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::warn;

/// A non-fatal geometry condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("coordinate {axis} must be a finite number, got {value}")]
    NonFiniteCoordinate { axis: char, value: f64 },

    #[error("{role} must be a point with finite coordinates")]
    NonFinitePoint { role: &'static str },

    #[error("inner angles must be finite numbers, got {value}")]
    NonFiniteAngle { value: f64 },

    #[error("a {shape} needs {expected} vertices or {expected} edges, got {vertices} vertices and {edges} edges")]
    MalformedShape {
        shape: &'static str,
        expected: usize,
        vertices: usize,
        edges: usize,
    },

    #[error("side lengths do not form a valid triangle")]
    DegenerateTriangle,

    #[error("inner angles are undefined for these side lengths")]
    InvalidAngles,

    #[error("{operation} is not implemented for a generic shape")]
    NotImplemented { operation: &'static str },

    #[error("this {shape} {reason}")]
    CheckFailed {
        shape: &'static str,
        reason: &'static str,
    },

    #[error("edge {edge} does not end where the next edge starts")]
    OpenChain { edge: usize },
}

impl Diagnostic {
    /// Logs the diagnostic at `WARN` and hands it back.
    pub fn emit(self) -> Self {
        warn!(diagnostic = %self, "Geometry diagnostic");
        self
    }

    /// True for diagnostics raised by a variant's post-construction check.
    pub fn is_check_failure(&self) -> bool {
        matches!(self, Diagnostic::CheckFailed { .. })
    }
}
