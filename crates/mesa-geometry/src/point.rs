//! # Points
//!
//! [`Point`] is a plain 2D coordinate. [`SharedPoint`] is a handle to a
//! point that several lines and shapes can hold at once: moving the point
//! through any handle is seen by every line that uses it.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::diagnostic::Diagnostic;

// =============================================================================
// Point
// =============================================================================

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Moves the point horizontally.
    ///
    /// Non-finite values are rejected: the old `x` is kept and the
    /// diagnostic is returned.
    pub fn set_x(&mut self, x: f64) -> Option<Diagnostic> {
        if !x.is_finite() {
            return Some(Diagnostic::NonFiniteCoordinate { axis: 'x', value: x }.emit());
        }
        self.x = x;
        None
    }

    /// Moves the point vertically. Same rules as [`Point::set_x`].
    pub fn set_y(&mut self, y: f64) -> Option<Diagnostic> {
        if !y.is_finite() {
            return Some(Diagnostic::NonFiniteCoordinate { axis: 'y', value: y }.emit());
        }
        self.y = y;
        None
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// True when both coordinates differ by less than `tolerance`.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

// =============================================================================
// Shared Point
// =============================================================================

/// A point shared between lines and shapes.
///
/// Cloning the handle shares the point; use [`SharedPoint::detach`] for an
/// independent copy.
#[derive(Clone, Default)]
pub struct SharedPoint(Rc<RefCell<Point>>);

impl SharedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        SharedPoint::from(Point::new(x, y))
    }

    /// Current coordinates.
    pub fn get(&self) -> Point {
        *self.0.borrow()
    }

    pub fn x(&self) -> f64 {
        self.0.borrow().x
    }

    pub fn y(&self) -> f64 {
        self.0.borrow().y
    }

    pub fn set_x(&self, x: f64) -> Option<Diagnostic> {
        self.0.borrow_mut().set_x(x)
    }

    pub fn set_y(&self, y: f64) -> Option<Diagnostic> {
        self.0.borrow_mut().set_y(y)
    }

    /// True when both handles refer to the same point.
    pub fn ptr_eq(&self, other: &SharedPoint) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A new handle to a copy of the current coordinates.
    pub fn detach(&self) -> SharedPoint {
        SharedPoint::from(self.get())
    }
}

impl From<Point> for SharedPoint {
    fn from(point: Point) -> Self {
        SharedPoint(Rc::new(RefCell::new(point)))
    }
}

impl fmt::Debug for SharedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl fmt::Display for SharedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}
