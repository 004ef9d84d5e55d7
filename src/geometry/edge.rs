use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::tolerance::{TOLERANCE, VERY_NEGATIVE};
use super::transform::Transform;

/// Oriented edge between two points of a map.
///
/// `order` caches the absolute angle of p1 -> p2 and is only a sort key:
/// edges sort by p1 first, then by `order`, which gives the rotational
/// order of the edges leaving a vertex. Equality only looks at the
/// endpoints.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub p1: Point,
    pub p2: Point,
    pub order: f64,
}

impl Edge {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2, order: p1.angle_to(&p2) }
    }

    pub const fn invalid() -> Self {
        Self { p1: Point::INVALID, p2: Point::INVALID, order: VERY_NEGATIVE }
    }

    pub fn unit_x() -> Self { Self::new(Point::ORIGIN, Point::UNIT_X) }
    pub fn unit_y() -> Self { Self::new(Point::ORIGIN, Point::UNIT_Y) }

    /// Binary search bound: sorts before every edge leaving `p1`.
    pub const fn lowest_edge(p1: Point) -> Self {
        Self { p1, p2: Point::INVALID, order: VERY_NEGATIVE }
    }

    /// Binary search bound: sorts after every edge leaving `p1`.
    pub const fn highest_edge(p1: Point) -> Self {
        Self { p1, p2: Point::INVALID, order: -VERY_NEGATIVE }
    }

    /// Map sort relation: first point, then angle.
    ///
    /// Two overlapping edges from the same point with different p2 are
    /// neither less nor equal to each other; a map never holds such a pair.
    pub fn less(&self, other: &Edge) -> bool {
        self.p1.less(&other.p1) || (self.p1 == other.p1 && self.order < other.order - TOLERANCE)
    }

    /// `less` folded into an `Ordering` for sorting and searching.
    pub fn cmp_order(&self, other: &Edge) -> Ordering {
        if self.less(other) {
            Ordering::Less
        } else if other.less(self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Copy whose first point is the smaller one.
    pub fn canonical(&self) -> Edge {
        if self.p1.less(&self.p2) { Edge::new(self.p1, self.p2) } else { Edge::new(self.p2, self.p1) }
    }

    pub fn twin(&self) -> Edge {
        Edge::new(self.p2, self.p1)
    }

    #[inline] pub fn is_canonical(&self) -> bool { self.p1.less(&self.p2) }
    #[inline] pub fn is_invalid(&self) -> bool { self.order == VERY_NEGATIVE }
    #[inline] pub fn is_trivial(&self) -> bool { self.p1 == self.p2 }

    /// True if either endpoint is the invalid sentinel or has a NaN or
    /// infinite coordinate.
    pub fn has_invalid_point(&self) -> bool {
        !self.p1.is_finite() || !self.p2.is_finite()
    }

    /// Absolute angle of p1 -> p2.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.p1.angle_to(&self.p2)
    }

    /// Counter-clockwise sweep from this edge's direction to `other`'s, in 0..2PI.
    pub fn angle_between(&self, other: &Edge) -> f64 {
        let mut res = other.angle() - self.angle();
        while res < 0.0 {
            res += 2.0 * std::f64::consts::PI;
        }
        res
    }

    pub fn apply(&self, t: &Transform) -> Edge {
        Edge::new(self.p1.apply(t), self.p2.apply(t))
    }
}

impl Default for Edge {
    fn default() -> Self {
        Edge::invalid()
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        self.p1 == other.p1 && self.p2 == other.p2
    }
}
