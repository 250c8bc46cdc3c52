//! # Lines
//!
//! A line segment between two shared points. Length and slope are computed
//! from the current coordinates on every call, so they stay correct when an
//! endpoint is moved through any handle.

use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::point::SharedPoint;

/// A segment from `start` to `end`.
#[derive(Clone, Default)]
pub struct Line {
    start: SharedPoint,
    end: SharedPoint,
}

impl Line {
    pub fn new(start: SharedPoint, end: SharedPoint) -> Self {
        Line { start, end }
    }

    pub fn start(&self) -> &SharedPoint {
        &self.start
    }

    pub fn end(&self) -> &SharedPoint {
        &self.end
    }

    /// Replaces the start point; points with non-finite coordinates are
    /// rejected and the old start is kept.
    pub fn set_start(&mut self, start: SharedPoint) -> Option<Diagnostic> {
        if !start.get().is_finite() {
            return Some(Diagnostic::NonFinitePoint { role: "start" }.emit());
        }
        self.start = start;
        None
    }

    /// Replaces the end point. Same rules as [`Line::set_start`].
    pub fn set_end(&mut self, end: SharedPoint) -> Option<Diagnostic> {
        if !end.get().is_finite() {
            return Some(Diagnostic::NonFinitePoint { role: "end" }.emit());
        }
        self.end = end;
        None
    }

    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f64 {
        (self.end.get().to_vector() - self.start.get().to_vector()).norm()
    }

    /// Direction of `end - start` in degrees, in (-180, 180].
    ///
    /// A vertical segment is exactly `90` going up and `-90` otherwise; a
    /// zero-length segment therefore reports `-90`.
    pub fn slope(&self) -> f64 {
        let delta = self.end.get().to_vector() - self.start.get().to_vector();
        if delta.x == 0.0 {
            if delta.y > 0.0 {
                90.0
            } else {
                -90.0
            }
        } else {
            let degrees = delta.y.atan2(delta.x).to_degrees();
            // atan2(-0.0, x < 0) lands on the excluded -180 end.
            if degrees <= -180.0 {
                180.0
            } else {
                degrees
            }
        }
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line(Start={}, End={})", self.start, self.end)
    }
}
