use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MapError;
use crate::geometry::point::Point;
use crate::Map;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceColor {
    White,
    Black,
    Red,
    Exterior,
}

/// Closed boundary of a face; the last point connects back to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Signed area, positive when counter-clockwise.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let mut a = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            a += self.points[i].cross(&self.points[j]);
        }
        0.5 * a
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Faces {
    pub white: Vec<Polygon>,
    pub black: Vec<Polygon>,
    /// Faces touching a vertex of odd degree, which breaks the two-coloring.
    pub red: Vec<Polygon>,
    /// Walks longer than `FaceLimits::exterior_points`, taken as unbounded.
    pub exteriors: Vec<Polygon>,
}

impl Faces {
    pub fn len(&self) -> usize {
        self.white.len() + self.black.len() + self.red.len() + self.exteriors.len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn iter(&self) -> impl Iterator<Item = (FaceColor, &Polygon)> + '_ {
        self.white
            .iter()
            .map(|p| (FaceColor::White, p))
            .chain(self.black.iter().map(|p| (FaceColor::Black, p)))
            .chain(self.red.iter().map(|p| (FaceColor::Red, p)))
            .chain(self.exteriors.iter().map(|p| (FaceColor::Exterior, p)))
    }
}

/// Face walk heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceLimits {
    /// Faces with more points are classified as exterior.
    pub exterior_points: usize,
    /// Hard cap on the points of a single walk.
    pub max_points: usize,
}

impl Default for FaceLimits {
    fn default() -> Self {
        Self { exterior_points: 50, max_points: 50_000 }
    }
}

// For each edge: the index of the next edge counter-clockwise around its
// first point, and whether that point is an odd crossing.
fn build_next_around(map: &Map) -> (Vec<usize>, Vec<bool>) {
    let edges = map.all();
    let n = edges.len();
    let mut next = vec![0usize; n];
    let mut odd = vec![false; n];

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && edges[end].p1 == edges[start].p1 {
            end += 1;
        }
        let degree = end - start;
        let is_odd = degree > 1 && degree % 2 == 1;
        for i in start..end {
            next[i] = if i + 1 == end { start } else { i + 1 };
            odd[i] = is_odd;
        }
        start = end;
    }
    (next, odd)
}

pub fn make_faces(map: &Map) -> Faces {
    make_faces_with(map, &FaceLimits::default())
}

/// Walk every face of the map and color them as a checkerboard.
///
/// A walk ends when it comes back to its starting edge, not merely to its
/// starting point. A boundary that passes through the start vertex more
/// than once (a dangling edge, a pinched face) stays one face instead of
/// being cut at the first return. Each directed edge belongs to exactly
/// one walk. A face gets the color opposite to any already colored
/// neighbor across the edge just taken, and its own twins are queued with
/// the opposite color.
pub fn make_faces_with(map: &Map, limits: &FaceLimits) -> Faces {
    let edges = map.all();
    let n = edges.len();
    let mut faces = Faces::default();
    if n == 0 {
        return faces;
    }

    let twin_of: Vec<Option<usize>> = edges.iter().map(|e| map.index_of(&e.twin())).collect();
    let (next_around, odd) = build_next_around(map);

    let mut done = vec![false; n];
    let mut seen = vec![false; n];
    let mut colors = vec![false; n];
    let mut todo: VecDeque<(usize, bool)> = VecDeque::new();

    for start in 0..n {
        if done[start] {
            continue;
        }
        seen[start] = true;
        todo.push_back((start, true));

        while let Some((first, should_be_white)) = todo.pop_front() {
            if done[first] {
                continue;
            }

            let mut walk: Vec<usize> = Vec::new();
            let mut is_white = should_be_white;
            let mut has_odd = false;
            let mut cur = first;
            loop {
                walk.push(cur);
                done[cur] = true;
                seen[cur] = true;
                has_odd |= odd[cur];

                let Some(twin) = twin_of[cur] else {
                    warn!(edge = ?edges[cur], "face walk: missing twin");
                    break;
                };
                if done[twin] {
                    is_white = !colors[twin];
                }
                let next = next_around[twin];
                if next == first {
                    break;
                }
                if done[next] {
                    warn!(edge = ?edges[next], "face walk: edge reached twice");
                    break;
                }
                if walk.len() >= limits.max_points {
                    warn!(points = walk.len(), "face walk: safety cap reached");
                    break;
                }
                cur = next;
            }

            let polygon = Polygon { points: walk.iter().map(|&i| edges[i].p1).collect() };
            if polygon.len() > limits.exterior_points {
                faces.exteriors.push(polygon);
                continue;
            }
            if has_odd {
                faces.red.push(polygon);
                continue;
            }

            for &i in &walk {
                colors[i] = is_white;
                if let Some(t) = twin_of[i] {
                    if !done[t] && !seen[t] {
                        seen[t] = true;
                        todo.push_back((t, !is_white));
                    }
                }
            }
            if is_white {
                faces.white.push(polygon);
            } else {
                faces.black.push(polygon);
            }
        }
    }

    debug!(
        white = faces.white.len(),
        black = faces.black.len(),
        red = faces.red.len(),
        exteriors = faces.exteriors.len(),
        "make_faces"
    );
    faces
}

/// Check every face is non-empty and follows edges of the map.
pub fn verify(map: &Map, faces: &Faces) -> Vec<String> {
    let mut errors = Vec::new();
    for (color, face) in faces.iter() {
        if face.is_empty() {
            errors.push(format!("Empty {:?} face.", color));
            continue;
        }
        let mut p1 = face.points[face.len() - 1];
        for &p2 in &face.points {
            if !map.are_connected(&p1, &p2) {
                errors.push(format!(
                    "Face points {}/{} and {}/{} are not connected.",
                    p1.x, p1.y, p2.x, p2.y
                ));
            }
            p1 = p2;
        }
    }
    errors
}

pub fn verify_and_throw(map: &Map, faces: &Faces) -> Result<(), MapError> {
    let errors = verify(map, faces);
    if errors.is_empty() { Ok(()) } else { Err(MapError::InvalidFaces(errors)) }
}
