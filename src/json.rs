//! JSON snapshot of a map's edges, for tests, debugging and fixtures.
//!
//! This is not a persisted format of the map: only the canonical edge list
//! is written, and loading rebuilds the map through insertion.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::MapError;
use crate::geometry::{edge::Edge, limits, point::Point};
use crate::Map;

pub const FORMAT_VERSION: u64 = 1;

pub fn to_json_impl(m: &Map) -> Value {
    #[derive(Serialize)]
    struct Doc {
        version: u64,
        edges: Vec<[f64; 4]>,
    }
    let edges = m.canonicals().map(|e| [e.p1.x, e.p1.y, e.p2.x, e.p2.y]).collect();
    serde_json::json!(Doc { version: FORMAT_VERSION, edges })
}

pub fn from_json_value(v: Value) -> Result<Map, MapError> {
    #[derive(Deserialize)]
    struct DocDe {
        version: Option<u64>,
        edges: Vec<[f64; 4]>,
    }
    let doc: DocDe = serde_json::from_value(v)?;

    let version = doc.version.unwrap_or(FORMAT_VERSION);
    if version != FORMAT_VERSION {
        return Err(MapError::Version(version));
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(MapError::Limit { what: "edges", max: limits::MAX_EDGES, got: doc.edges.len() });
    }
    if let Some(index) = doc.edges.iter().position(|c| !c.iter().all(|&x| limits::in_coord_bounds(x))) {
        return Err(MapError::BadCoordinate { index });
    }

    let mut m = Map::new();
    m.reserve(doc.edges.len() * 2);
    m.insert_edges(
        doc.edges
            .iter()
            .map(|[x1, y1, x2, y2]| Edge::new(Point::new(*x1, *y1), Point::new(*x2, *y2))),
    );
    debug!(input = doc.edges.len(), edges = m.len(), "map from json");
    Ok(m)
}

impl Map {
    /// `{ "version": 1, "edges": [[x1, y1, x2, y2], ...] }`, canonical edges only.
    pub fn to_json(&self) -> Value {
        to_json_impl(self)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Rebuild a map through insertion, so crossing input edges get split.
    pub fn from_json_value(v: Value) -> Result<Map, MapError> {
        from_json_value(v)
    }

    pub fn from_json_str(s: &str) -> Result<Map, MapError> {
        let v: Value = serde_json::from_str(s)?;
        from_json_value(v)
    }
}
