// Segment-segment intersection with four acceptance policies.
//
// Every policy returns the intersection as an absolute point (or
// Point::INVALID), never the raw (s, t) parametrization. Collinear
// overlapping segments are not resolved: they are parallel, hence invalid.

use super::point::Point;
use super::tolerance::{near_zero, NEAR_LIMIT, TOLERANCE};

/// Solve for (s, t) such that `p1 + s (q1 - p1) == p2 + t (q2 - p2)`.
///
/// The pair is returned packed in a point (x = s, y = t), invalid when the
/// segments are parallel within tolerance.
pub fn get_intersection_params(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> Point {
    let d1x = q1.x - p1.x;
    let d1y = q1.y - p1.y;
    let d2x = q2.x - p2.x;
    let d2y = q2.y - p2.y;

    let det = d1x * d2y - d1y * d2x;
    if near_zero(det) {
        return Point::INVALID;
    }

    // O'Rourke's segment-segment form.
    let s = -(p1.x * d2y + p2.x * (p1.y - q2.y) + q2.x * (p2.y - p1.y)) / det;
    let t = (p1.x * (p2.y - q1.y) + q1.x * (p1.y - p2.y) + p2.x * d1y) / det;
    Point::new(s, t)
}

/// Keep the params only if both lie on their unit segment (within tolerance).
pub fn stay_on_units(ip: Point) -> Point {
    if ip.is_invalid() {
        return ip;
    }
    let outside = |v: f64| v < -TOLERANCE || v > 1.0 + TOLERANCE;
    if outside(ip.x) || outside(ip.y) { Point::INVALID } else { ip }
}

/// Keep the params only if both lie within NEAR_LIMIT of their unit segment.
pub fn stay_near_units(ip: Point) -> Point {
    if ip.is_invalid() {
        return ip;
    }
    let outside = |v: f64| v < -NEAR_LIMIT || v > 1.0 + NEAR_LIMIT;
    if outside(ip.x) || outside(ip.y) { Point::INVALID } else { ip }
}

fn to_absolute(p1: &Point, q1: &Point, ip: Point) -> Point {
    if ip.is_invalid() {
        return ip;
    }
    p1.convex_sum(q1, ip.x)
}

/// Intersection on both segments.
pub fn intersect(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> Point {
    to_absolute(p1, q1, stay_on_units(get_intersection_params(p1, q1, p2, q2)))
}

/// Intersection on or slightly beyond both segments (used to snap to nearby vertices).
pub fn intersect_near(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> Point {
    to_absolute(p1, q1, stay_near_units(get_intersection_params(p1, q1, p2, q2)))
}

/// Intersection of the infinite lines.
pub fn intersect_anywhere(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> Point {
    to_absolute(p1, q1, get_intersection_params(p1, q1, p2, q2))
}

/// Like `intersect`, but rejects a point that is an endpoint of both segments.
pub fn intersect_within(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> Point {
    let ip = stay_on_units(get_intersection_params(p1, q1, p2, q2));
    if ip.is_invalid() {
        return ip;
    }
    let at_end = |v: f64| v <= TOLERANCE || (1.0 - v) <= TOLERANCE;
    if at_end(ip.x) && at_end(ip.y) {
        return Point::INVALID;
    }
    p1.convex_sum(q1, ip.x)
}
