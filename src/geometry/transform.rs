// Two-dimensional affine transform: the top two rows of the homogeneous
// 3x3 matrix, i.e. the linear part ((scale_x rot_1) (rot_2 scale_y)) plus
// the translation (trans_x trans_y). Field names are only indicative; a
// rotation mixes into the scale terms.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::tolerance::near;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Transform {
    pub scale_x: f64,
    pub rot_1: f64,
    pub trans_x: f64,
    pub rot_2: f64,
    pub scale_y: f64,
    pub trans_y: f64,
}

impl Transform {
    pub const fn new(scale_x: f64, rot_1: f64, trans_x: f64, rot_2: f64, scale_y: f64, trans_y: f64) -> Self {
        Self { scale_x, rot_1, trans_x, rot_2, scale_y, trans_y }
    }

    pub const fn identity() -> Self { Self::scale(1.0) }

    pub const fn scale(r: f64) -> Self { Self::scale_xy(r, r) }

    pub const fn scale_xy(xs: f64, ys: f64) -> Self {
        Self::new(xs, 0.0, 0.0, 0.0, ys, 0.0)
    }

    /// Uniform scaling centered on `pt`.
    pub fn scale_around(pt: Point, r: f64) -> Self {
        Self::translate(pt.x, pt.y)
            .compose(&Self::scale(r).compose(&Self::translate(-pt.x, -pt.y)))
    }

    pub const fn translate(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, x, 0.0, 1.0, y)
    }

    /// Counter-clockwise rotation around the origin, in radians.
    pub fn rotate(t: f64) -> Self {
        let (s, c) = t.sin_cos();
        Self::new(c, -s, 0.0, s, c, 0.0)
    }

    pub fn rotate_around(pt: Point, t: f64) -> Self {
        Self::translate(pt.x, pt.y)
            .compose(&Self::rotate(t).compose(&Self::translate(-pt.x, -pt.y)))
    }

    /// Carries the unit interval of the x axis onto the segment p-q.
    pub fn match_line(p: Point, q: Point) -> Self {
        Self::new(q.x - p.x, p.y - q.y, p.x, q.y - p.y, q.x - p.x, p.y)
    }

    /// Reflection across the line through p and q. None if p == q.
    pub fn reflect(p: Point, q: Point) -> Option<Self> {
        let m = Self::match_line(p, q);
        let inv = m.invert()?;
        Some(m.compose(&Self::scale_xy(1.0, -1.0).compose(&inv)))
    }

    /// `self ∘ other`: applies `other` first.
    pub fn compose(&self, o: &Transform) -> Self {
        Self::new(
            self.scale_x * o.scale_x + self.rot_1 * o.rot_2,
            self.scale_x * o.rot_1 + self.rot_1 * o.scale_y,
            self.scale_x * o.trans_x + self.rot_1 * o.trans_y + self.trans_x,
            self.rot_2 * o.scale_x + self.scale_y * o.rot_2,
            self.rot_2 * o.rot_1 + self.scale_y * o.scale_y,
            self.rot_2 * o.trans_x + self.scale_y * o.trans_y + self.trans_y,
        )
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.scale_x * self.scale_y - self.rot_1 * self.rot_2
    }

    /// None for a singular transform.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        Some(Self::new(
            self.scale_y / det,
            -self.rot_1 / det,
            (self.rot_1 * self.trans_y - self.trans_x * self.scale_y) / det,
            -self.rot_2 / det,
            self.scale_x / det,
            (self.trans_x * self.rot_2 - self.scale_x * self.trans_y) / det,
        ))
    }

    /// True if the transform includes a reflection (reverses angular order).
    #[inline]
    pub fn flips(&self) -> bool {
        self.determinant() < 0.0
    }

    #[inline]
    pub fn apply_point(&self, p: &Point) -> Point {
        Point::new(
            self.scale_x * p.x + self.rot_1 * p.y + self.trans_x,
            self.rot_2 * p.x + self.scale_y * p.y + self.trans_y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Transform {
    fn eq(&self, t: &Transform) -> bool {
        near(self.scale_x, t.scale_x) && near(self.rot_1, t.rot_1) && near(self.trans_x, t.trans_x)
            && near(self.rot_2, t.rot_2) && near(self.scale_y, t.scale_y) && near(self.trans_y, t.trans_y)
    }
}
