//! Screen-space curve primitives for the route overlay
//!
//! Each route leg is an independent quadratic Bézier bowed to one side of its
//! chord. Legs are not tangent-continuous at their joins.

use crate::core::{
    constants::{ARROW_TANGENT_STEP, DEGENERATE_SEGMENT_EPSILON},
    geo::Point,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A quadratic Bézier curve in container pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadraticBezier {
    pub fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Builds the leg from `start` to `end` whose control point sits on the chord's
    /// perpendicular bisector, `bulge * chord_length` away from the midpoint.
    ///
    /// The offset direction is the chord rotated by +90° in screen space, `(-dy, dx)`:
    /// a left-to-right chord bows downward. Coincident endpoints give a straight,
    /// zero-length leg with the control point on the midpoint.
    pub fn bowed(start: Point, end: Point, bulge: f64) -> Self {
        let mid = start.midpoint(&end);
        let chord = end.subtract(&start);
        let distance = chord.length();

        if distance < DEGENERATE_SEGMENT_EPSILON {
            return Self::new(start, mid, end);
        }

        let normal = chord.perpendicular().multiply(1.0 / distance);
        let control = mid.add(&normal.multiply(distance * bulge));
        Self::new(start, control, end)
    }

    /// Straight-line distance between the endpoints
    pub fn chord_length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.chord_length() < DEGENERATE_SEGMENT_EPSILON
    }

    /// Evaluates the curve at parameter `t ∈ [0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let a = u * u;
        let b = 2.0 * u * t;
        let c = t * t;
        Point::new(
            a * self.start.x + b * self.control.x + c * self.end.x,
            a * self.start.y + b * self.control.y + c * self.end.y,
        )
    }

    /// Axis-aligned box around the part of the curve between `t0` and `t1`.
    ///
    /// Built from that piece's own control polygon, so the piece lies inside it.
    pub fn hull_between(&self, t0: f64, t1: f64) -> (Point, Point) {
        let a = self.point_at(t0);
        let b = self.point_at(t1);
        let (u0, u1) = (1.0 - t0, 1.0 - t1);
        let ws = u0 * u1;
        let wc = u0 * t1 + t0 * u1;
        let we = t0 * t1;
        let c = Point::new(
            ws * self.start.x + wc * self.control.x + we * self.end.x,
            ws * self.start.y + wc * self.control.y + we * self.end.y,
        );
        (
            Point::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            Point::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        )
    }

    /// Direction of travel at `t`, in degrees from +x towards +y.
    ///
    /// Taken from the secant between samples `ARROW_TANGENT_STEP` either side of `t`,
    /// clamped to the curve's parameter range.
    pub fn heading_at(&self, t: f64) -> f64 {
        let t1 = (t - ARROW_TANGENT_STEP).max(0.0);
        let t2 = (t + ARROW_TANGENT_STEP).min(1.0);
        let secant = self.point_at(t2).subtract(&self.point_at(t1));
        secant.angle_degrees()
    }
}

/// Renders legs as an SVG path `d` attribute: `M x y Q cx cy, x y Q ...`.
///
/// Consecutive legs share endpoints, so only the first leg emits a move-to.
pub fn svg_path_data(segments: &[QuadraticBezier]) -> String {
    let mut data = String::new();
    let Some(first) = segments.first() else {
        return data;
    };

    let _ = write!(data, "M {} {}", first.start.x, first.start.y);
    for segment in segments {
        let _ = write!(
            data,
            " Q {} {}, {} {}",
            segment.control.x, segment.control.y, segment.end.x, segment.end.y
        );
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_control_point_convention() {
        let curve = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.15);
        assert_close(curve.control, Point::new(50.0, 15.0));

        // Reversing the chord flips the bulge to the other side
        let reversed = QuadraticBezier::bowed(Point::new(100.0, 0.0), Point::new(0.0, 0.0), 0.15);
        assert_close(reversed.control, Point::new(50.0, -15.0));
    }

    #[test]
    fn test_vertical_chord_bows_left() {
        let curve = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(0.0, 200.0), 0.15);
        assert_close(curve.control, Point::new(-30.0, 100.0));
    }

    #[test]
    fn test_endpoints_and_midpoint_evaluation() {
        let curve = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.15);
        assert_close(curve.point_at(0.0), curve.start);
        assert_close(curve.point_at(1.0), curve.end);
        // Peak of a symmetric quadratic is half-way to the control point
        assert_close(curve.point_at(0.5), Point::new(50.0, 7.5));
    }

    #[test]
    fn test_hull_contains_its_piece() {
        let curve = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(300.0, 120.0), 0.15);
        let (min, max) = curve.hull_between(0.2, 0.6);
        for i in 0..=40 {
            let p = curve.point_at(0.2 + 0.4 * i as f64 / 40.0);
            assert!(p.x >= min.x - 1e-9 && p.x <= max.x + 1e-9);
            assert!(p.y >= min.y - 1e-9 && p.y <= max.y + 1e-9);
        }

        // The whole curve's hull is its own control polygon
        let (min, max) = curve.hull_between(0.0, 1.0);
        assert_close(min, Point::new(0.0_f64.min(curve.control.x), 0.0_f64.min(curve.control.y)));
        assert_close(max, Point::new(300.0_f64.max(curve.control.x), 120.0_f64.max(curve.control.y)));
    }

    #[test]
    fn test_degenerate_leg() {
        let p = Point::new(42.0, 17.0);
        let curve = QuadraticBezier::bowed(p, p, 0.15);
        assert!(curve.is_degenerate());
        assert_eq!(curve.control, p);
        assert!(curve.point_at(0.3).is_finite());
        assert_eq!(curve.chord_length(), 0.0);
    }

    #[test]
    fn test_heading() {
        let straight = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.0);
        assert!(straight.heading_at(0.5).abs() < 1e-9);

        let bowed = QuadraticBezier::bowed(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.15);
        // Heading turns from downward-right to upward-right along a downward bulge
        assert!(bowed.heading_at(0.25) > 0.0);
        assert!(bowed.heading_at(0.75) < 0.0);
        assert!(bowed.heading_at(0.5).abs() < 1e-6);

        // Samples clamp at the ends instead of leaving the curve
        assert!(bowed.heading_at(0.0).is_finite());
        assert!(bowed.heading_at(1.0).is_finite());
    }

    #[test]
    fn test_svg_path_data() {
        let a = QuadraticBezier::new(
            Point::new(0.0, 0.0),
            Point::new(50.0, 15.0),
            Point::new(100.0, 0.0),
        );
        let b = QuadraticBezier::new(
            Point::new(100.0, 0.0),
            Point::new(115.0, 50.0),
            Point::new(100.0, 100.0),
        );
        assert_eq!(
            svg_path_data(&[a, b]),
            "M 0 0 Q 50 15, 100 0 Q 115 50, 100 100"
        );
        assert_eq!(svg_path_data(&[]), "");
    }
}
