//! Minimal 2D primitives backing the embedding layer.

use grava_core::GravaError;

/// Tolerance applied to the parametric intersection coefficients.
pub const EPSILON: f64 = 1e-9;

/// A finite point in the embedding plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point, rejecting non-finite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, GravaError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GravaError::invalid_argument(
                "invalid-position",
                "coordinates must be finite numbers",
            )
            .with_context("x", x)
            .with_context("y", y));
        }
        Ok(Self { x, y })
    }

    /// Returns the horizontal coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the vertical coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Computes the parametric intersection coefficients of two segments.
///
/// Returns `(t, u)` such that `p1 + t * (p2 - p1) == q1 + u * (q2 - q1)`,
/// or `None` when the segments are parallel or degenerate. The segments
/// intersect as drawn exactly when both coefficients lie in `[0, 1]`.
pub fn segment_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<(f64, f64)> {
    let dx_p = p2.x - p1.x;
    let dy_p = p2.y - p1.y;
    let dx_q = q2.x - q1.x;
    let dy_q = q2.y - q1.y;
    let denominator = dx_p * dy_q - dy_p * dx_q;
    if denominator.abs() < EPSILON {
        return None;
    }
    let dx = q1.x - p1.x;
    let dy = q1.y - p1.y;
    let t = (dx * dy_q - dy * dx_q) / denominator;
    let u = (dx * dy_p - dy * dx_p) / denominator;
    Some((t, u))
}

/// Returns whether two segments cross within epsilon tolerance.
pub fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    match segment_intersection(p1, p2, q1, q2) {
        Some((t, u)) => in_unit_range(t) && in_unit_range(u),
        None => false,
    }
}

fn in_unit_range(value: f64) -> bool {
    value >= -EPSILON && value <= 1.0 + EPSILON
}
