// Centralized tolerances and tolerant comparisons for map geometry.
//
// These relations are consistent with each other (near excludes both
// near_less and near_greater) but not transitive. The map's sort order is
// built on them, so every comparison must go through here.

pub const TOLERANCE: f64 = 1e-7;              // point coincidence / parameter slack
pub const TOLERANCE_2: f64 = TOLERANCE * TOLERANCE; // same, for squared distances
pub const NEAR_LIMIT: f64 = 0.2;              // parameter slack for intersect_near
pub const VERY_NEGATIVE: f64 = -1e100;        // edge order sentinel (invalid / lowest)

#[inline] pub fn near_zero_with(a: f64, tol: f64) -> bool { a.abs() <= tol }
#[inline] pub fn near_zero(a: f64) -> bool { near_zero_with(a, TOLERANCE) }
#[inline] pub fn near_with(a: f64, b: f64, tol: f64) -> bool { near_zero_with(a - b, tol) }
#[inline] pub fn near(a: f64, b: f64) -> bool { near_with(a, b, TOLERANCE) }
#[inline] pub fn near_less(a: f64, b: f64) -> bool { a < b - TOLERANCE }
#[inline] pub fn near_greater(a: f64, b: f64) -> bool { a > b + TOLERANCE }
#[inline] pub fn near_negative(a: f64) -> bool { near_less(a, 0.0) }
#[inline] pub fn near_positive(a: f64) -> bool { near_greater(a, 0.0) }

// Squared-distance variants: compare d2 against TOLERANCE_2 so no sqrt is needed.
#[inline] pub fn near_zero_2(d2: f64) -> bool { d2 <= TOLERANCE_2 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_excludes_less_and_greater() {
        let pairs = [(0.0, 0.0), (1.0, 1.0 + 0.5e-7), (1.0, 1.0 - 0.9e-7), (-3.0, -3.0)];
        for (a, b) in pairs {
            assert!(near(a, b));
            assert!(!near_less(a, b));
            assert!(!near_greater(a, b));
        }
    }

    #[test]
    fn strict_outside_tolerance() {
        assert!(near_less(1.0, 1.0 + 1e-6));
        assert!(near_greater(1.0 + 1e-6, 1.0));
        assert!(!near(1.0, 1.0 + 1e-6));
        assert!(near_negative(-1e-6));
        assert!(!near_negative(-1e-8));
        assert!(near_positive(1e-6));
    }

    #[test]
    fn not_transitive() {
        // a ~ b and b ~ c but a !~ c: accepted limitation.
        let a = 0.0;
        let b = 0.6e-7;
        let c = 1.2e-7;
        assert!(near(a, b) && near(b, c));
        assert!(!near(a, c));
    }

    #[test]
    fn squared_uses_squared_tolerance() {
        assert!(near_zero_2(0.5e-14));
        assert!(!near_zero_2(1e-13));
    }
}
