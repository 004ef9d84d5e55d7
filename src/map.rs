//! Planar map storage and queries.
//!
//! A planar map is an undirected graph drawn on the plane so that edges
//! never cross each other or pass through a point. What is stored is a
//! single vector of directed edges: every connection appears twice, once
//! per direction, and the vector is sorted by first point then angle. All
//! the edges leaving a point therefore sit in one contiguous range, in
//! counter-clockwise order.
//!
//! Insertion and merging live in [`crate::algorithms::planarize`].

use std::ops::Range;

use tracing::debug;

use crate::error::MapError;
use crate::geometry::{edge::Edge, point::Point, transform::Transform};

#[derive(Clone, Debug, Default)]
pub struct Map {
    pub(crate) edges: Vec<Edge>, // sorted, twin-paired, no duplicates
}

impl Map {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Map with all given edges inserted, splitting them where they cross.
    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut m = Self::new();
        m.insert_edges(edges);
        m
    }

    /// Number of directed edges (twice the number of connections).
    pub fn len(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// All directed edges, in map order.
    pub fn all(&self) -> &[Edge] { &self.edges }

    pub fn canonicals(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_canonical())
    }

    pub fn non_canonicals(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| !e.is_canonical())
    }

    /// Distinct vertices, in map order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(i, e)| *i == 0 || self.edges[i - 1].p1 != e.p1)
            .map(|(_, e)| e.p1)
    }

    pub fn reserve(&mut self, edge_count: usize) {
        self.edges.reserve(edge_count);
    }

    // First index whose edge is not less than `e`.
    pub(crate) fn lower_bound(&self, e: &Edge) -> usize {
        self.edges.partition_point(|x| x.less(e))
    }

    // First index whose edge is greater than `e`.
    pub(crate) fn upper_bound(&self, e: &Edge) -> usize {
        self.edges.partition_point(|x| !e.less(x))
    }

    pub(crate) fn index_of(&self, e: &Edge) -> Option<usize> {
        let i = self.lower_bound(e);
        (i < self.edges.len() && self.edges[i] == *e).then_some(i)
    }

    pub(crate) fn outbound_range(&self, p: &Point) -> Range<usize> {
        let lo = self.lower_bound(&Edge::lowest_edge(*p));
        let hi = self.upper_bound(&Edge::highest_edge(*p));
        lo..hi.max(lo)
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        let i = self.lower_bound(&Edge::lowest_edge(*p));
        i < self.edges.len() && self.edges[i].p1 == *p
    }

    pub fn contains_edge(&self, e: &Edge) -> bool {
        self.index_of(e).is_some()
    }

    pub fn are_connected(&self, a: &Point, b: &Point) -> bool {
        self.contains_edge(&Edge::new(*a, *b))
    }

    /// Edges leaving `p`, counter-clockwise.
    pub fn outbounds(&self, p: &Point) -> &[Edge] {
        &self.edges[self.outbound_range(p)]
    }

    /// Edges arriving at `p`, in the same rotational order as `outbounds`.
    pub fn inbounds(&self, p: &Point) -> Vec<Edge> {
        self.outbounds(p).iter().map(Edge::twin).collect()
    }

    /// Outbound then inbound edges of `p`.
    pub fn connections(&self, p: &Point) -> Vec<Edge> {
        let outs = self.outbounds(p);
        let mut conns = Vec::with_capacity(outs.len() * 2);
        conns.extend_from_slice(outs);
        conns.extend(outs.iter().map(Edge::twin));
        conns
    }

    fn twin_position(outbounds: &[Edge], e: &Edge) -> Option<usize> {
        let twin = e.twin();
        let i = outbounds.partition_point(|x| x.less(&twin));
        (i < outbounds.len() && outbounds[i] == twin).then_some(i)
    }

    /// Edge preceding the twin of `e` around `e.p2`, wrapping around.
    pub fn before_in(outbounds: &[Edge], e: &Edge) -> Option<Edge> {
        let i = Self::twin_position(outbounds, e)?;
        Some(if i == 0 { outbounds[outbounds.len() - 1] } else { outbounds[i - 1] })
    }

    /// Edge following the twin of `e` around `e.p2`, wrapping around.
    pub fn after_in(outbounds: &[Edge], e: &Edge) -> Option<Edge> {
        let i = Self::twin_position(outbounds, e)?;
        Some(if i + 1 == outbounds.len() { outbounds[0] } else { outbounds[i + 1] })
    }

    pub fn before_after_in(outbounds: &[Edge], e: &Edge) -> Option<(Edge, Edge)> {
        Some((Self::before_in(outbounds, e)?, Self::after_in(outbounds, e)?))
    }

    /// Edge half-way around `e.p2` from the twin of `e`: a plausible
    /// straight-through continuation at a crossing of any valence.
    pub fn continuation_in(outbounds: &[Edge], e: &Edge) -> Option<Edge> {
        let i = Self::twin_position(outbounds, e)?;
        let delta = outbounds.len() / 2;
        Some(if i >= delta { outbounds[i - delta] } else { outbounds[i + delta] })
    }

    pub fn before(&self, e: &Edge) -> Option<Edge> {
        Self::before_in(self.outbounds(&e.p2), e)
    }

    pub fn after(&self, e: &Edge) -> Option<Edge> {
        Self::after_in(self.outbounds(&e.p2), e)
    }

    pub fn before_after(&self, e: &Edge) -> Option<(Edge, Edge)> {
        Self::before_after_in(self.outbounds(&e.p2), e)
    }

    pub fn continuation(&self, e: &Edge) -> Option<Edge> {
        Self::continuation_in(self.outbounds(&e.p2), e)
    }

    fn remove_directed(&mut self, e: &Edge) {
        if let Some(i) = self.index_of(e) {
            self.edges.remove(i);
        }
    }

    /// Remove an edge and its twin. Missing edges are ignored.
    pub fn remove_edge(&mut self, e: &Edge) {
        self.remove_directed(e);
        self.remove_directed(&e.twin());
        self.internal_verify();
    }

    /// Remove a point and every edge connected to it.
    pub fn remove_point(&mut self, p: &Point) {
        let range = self.outbound_range(p);
        let twins: Vec<Edge> = self.edges[range.clone()].iter().map(Edge::twin).collect();
        self.edges.drain(range);
        for twin in &twins {
            self.remove_directed(twin);
        }
        self.internal_verify();
    }

    /// Append another map without looking for intersections.
    ///
    /// The caller guarantees the two maps share no edge and do not cross;
    /// otherwise the result is silently corrupt.
    pub fn merge_non_overlapping(&mut self, other: &Map) {
        self.merge_non_overlapping_all(std::iter::once(other));
    }

    /// Batch form of [`merge_non_overlapping`](Self::merge_non_overlapping):
    /// sorts once after appending all maps. Same precondition.
    pub fn merge_non_overlapping_all<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Map>,
    {
        let before = self.edges.len();
        for other in others {
            self.edges.extend_from_slice(&other.edges);
        }
        self.sort_edges();
        debug!(before, after = self.edges.len(), "merge_non_overlapping");
        self.internal_verify();
    }

    /// Transformed copy.
    pub fn apply(&self, t: &Transform) -> Map {
        let mut other = self.clone();
        other.apply_to_self(t);
        other
    }

    /// Transform every edge in place and restore the sort order, which a
    /// reflection reverses around each point.
    pub fn apply_to_self(&mut self, t: &Transform) -> &mut Self {
        self.edges = self
            .edges
            .iter()
            .map(|e| e.apply(t))
            .filter(|e| !e.is_trivial() && !e.has_invalid_point())
            .collect();
        self.sort_edges();
        debug!(edges = self.edges.len(), flips = t.flips(), "apply transform");
        self.internal_verify();
        self
    }

    pub(crate) fn sort_edges(&mut self) {
        self.edges.sort_by(|a, b| a.cmp_order(b));
        self.edges.dedup_by(|a, b| a == b);
    }

    /// Structural diagnostics; empty when the map is well formed.
    pub fn verify(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let show = |e: &Edge| format!("{}/{} - {}/{}", e.p1.x, e.p1.y, e.p2.x, e.p2.y);

        for e in &self.edges {
            if e.has_invalid_point() {
                errors.push(format!("Invalid edge {}.", show(e)));
                continue;
            }
            if e.is_trivial() {
                errors.push(format!("Trivial edge {}.", show(e)));
            }
            if !self.contains_edge(&e.twin()) {
                errors.push(format!("Missing twin of edge {}.", show(e)));
            }
        }

        for w in self.edges.windows(2) {
            if w[1].less(&w[0]) {
                errors.push(format!("Edges are not sorted: {} after {}.", show(&w[1]), show(&w[0])));
            } else if w[0] == w[1] {
                errors.push(format!("Duplicate edge {}.", show(&w[0])));
            }
        }

        errors
    }

    pub fn verify_and_throw(&self) -> Result<(), MapError> {
        let errors = self.verify();
        if errors.is_empty() { Ok(()) } else { Err(MapError::InvalidMap(errors)) }
    }

    #[inline]
    pub(crate) fn internal_verify(&self) {
        #[cfg(feature = "internal_verify")]
        {
            let errors = self.verify();
            debug_assert!(errors.is_empty(), "map is invalid: {:?}", errors);
        }
    }
}
