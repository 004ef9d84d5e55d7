use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::tolerance::{near, near_greater, near_less, near_zero};
use super::transform::Transform;

/// A point (or vector) of the plane.
///
/// Equality and ordering are tolerant: coordinates within
/// [`TOLERANCE`](super::tolerance::TOLERANCE) compare equal, and ordering is
/// lexicographic on x then y. A reserved NaN marks an invalid point; two
/// invalid points are equal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
    pub const UNIT_X: Point = Point { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Point = Point { x: 0.0, y: 1.0 };
    pub const INVALID: Point = Point { x: f64::NAN, y: f64::NAN };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True only for the reserved NaN bit pattern, not for any NaN.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.x.to_bits() == f64::NAN.to_bits()
    }

    /// Tolerant lexicographic less-than.
    pub fn less(&self, other: &Point) -> bool {
        if near_less(self.x, other.x) {
            return true;
        }
        if near_greater(self.x, other.x) {
            return false;
        }
        near_less(self.y, other.y)
    }

    /// Both coordinates are finite. False for the invalid point and for any
    /// other NaN or infinite coordinate.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn greater(&self, other: &Point) -> bool {
        self != other && !self.less(other)
    }

    #[inline] pub fn mag_2(&self) -> f64 { self.x * self.x + self.y * self.y }
    #[inline] pub fn mag(&self) -> f64 { self.mag_2().sqrt() }

    #[inline]
    pub fn distance_2(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline] pub fn distance(&self, other: &Point) -> f64 { self.distance_2(other).sqrt() }

    /// Scale onto the unit circle. The zero vector is returned unchanged.
    pub fn normalize(&self) -> Point {
        let m = self.mag();
        if m != 0.0 { self.scale(1.0 / m) } else { *self }
    }

    #[inline] pub fn dot(&self, other: &Point) -> f64 { self.x * other.x + self.y * other.y }
    #[inline] pub fn cross(&self, other: &Point) -> f64 { self.x * other.y - self.y * other.x }
    #[inline] pub fn perp(&self) -> Point { Point::new(-self.y, self.x) }
    #[inline] pub fn scale(&self, r: f64) -> Point { Point::new(self.x * r, self.y * r) }
    #[inline] pub fn scale_xy(&self, xr: f64, yr: f64) -> Point { Point::new(self.x * xr, self.y * yr) }

    pub fn is_perp(&self, other: &Point) -> bool {
        near_zero(self.dot(other))
    }

    /// `self * (1 - t) + other * t`.
    #[inline]
    pub fn convex_sum(&self, other: &Point, t: f64) -> Point {
        let mt = 1.0 - t;
        Point::new(mt * self.x + t * other.x, mt * self.y + t * other.y)
    }

    /// Angle with the x axis, seen from the origin.
    #[inline] pub fn angle(&self) -> f64 { self.y.atan2(self.x) }

    /// Absolute angle of the vector self -> other, in -PI..=PI.
    #[inline]
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Arc swept counter-clockwise from self -> from to self -> to, in 0..2PI.
    pub fn sweep(&self, from: &Point, to: &Point) -> f64 {
        let mut res = self.angle_to(to) - self.angle_to(from);
        while res < 0.0 {
            res += 2.0 * std::f64::consts::PI;
        }
        res
    }

    /// Squared distance to the segment p-q (clamped to its endpoints).
    pub fn distance_2_to_line(&self, p: &Point, q: &Point) -> f64 {
        let t = self.parameterization_on_line(p, q);
        if (0.0..=1.0).contains(&t) {
            self.distance_2(&p.convex_sum(q, t))
        } else if t < 0.0 {
            self.distance_2(p)
        } else {
            self.distance_2(q)
        }
    }

    pub fn distance_to_line(&self, p: &Point, q: &Point) -> f64 {
        self.distance_2_to_line(p, q).sqrt()
    }

    /// Parameter of the projection onto the line p-q; 0 at p, 1 at q.
    pub fn parameterization_on_line(&self, p: &Point, q: &Point) -> f64 {
        let qmp = *q - *p;
        (*self - *p).dot(&qmp) / qmp.dot(&qmp)
    }

    #[inline]
    pub fn apply(&self, t: &Transform) -> Point {
        t.apply_point(self)
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::INVALID
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        if self.is_invalid() {
            return other.is_invalid();
        }
        near(self.x, other.x) && near(self.y, other.y)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.less(other) {
            Some(Ordering::Less)
        } else if other.less(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point { Point::new(self.x + o.x, self.y + o.y) }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point { Point::new(self.x - o.x, self.y - o.y) }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point { Point::new(-self.x, -self.y) }
}
