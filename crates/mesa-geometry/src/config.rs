//! # Geometry Configuration
//!
//! Tolerances and optional checks used while building shapes.
//!
//! ## Config File Section
//! ```toml
//! [geometry]
//! tolerance = 1e-6
//! require_closed_chain = false
//! ```

use serde::{Deserialize, Serialize};

/// Absolute tolerance for side-length equality checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Settings shared by every shape constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Absolute tolerance for "equal length" and "same point" comparisons.
    pub tolerance: f64,

    /// When true, shapes built from edges warn if consecutive edges do not
    /// meet (`edges[i].end != edges[i + 1].start`). Construction still
    /// succeeds either way.
    pub require_closed_chain: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig {
            tolerance: DEFAULT_TOLERANCE,
            require_closed_chain: false,
        }
    }
}

impl GeometryConfig {
    /// True when the tolerance is a usable positive number.
    pub fn is_valid(&self) -> bool {
        self.tolerance.is_finite() && self.tolerance > 0.0
    }

    /// Compares two lengths within the tolerance.
    pub fn same_length(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.tolerance
    }
}
