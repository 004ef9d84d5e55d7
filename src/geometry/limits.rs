// Ingestion limits for edge lists coming from untrusted input (JSON).

// Map size cap, in undirected edges
pub const MAX_EDGES: usize = 500_000;

// Numeric bounds
pub const COORD_MIN: f64 = -1.0e12;
pub const COORD_MAX: f64 = 1.0e12;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }
