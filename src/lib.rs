//! Planar subdivision of straight segments.
//!
//! A [`Map`] keeps segments that never cross: inserting or merging splits
//! every edge at the points where it meets another one. The map answers
//! rotational queries around its vertices and can be cut into faces with
//! a checkerboard coloring ([`make_faces`]).
//!
//! All comparisons are tolerant, see [`geometry::tolerance`].

pub mod error;
pub mod map;
pub mod geometry {
    pub mod edge;
    pub mod intersect;
    pub mod limits;
    pub mod point;
    pub mod tolerance;
    pub mod transform;
}
pub mod algorithms {
    pub mod faces;
    pub mod planarize;
}
mod json;

pub use algorithms::faces::{make_faces, make_faces_with, FaceColor, FaceLimits, Faces, Polygon};
pub use error::MapError;
pub use geometry::{edge::Edge, point::Point, transform::Transform};
pub use json::FORMAT_VERSION;
pub use map::Map;
