use tracing::{debug, trace};

use crate::geometry::{
    edge::Edge,
    intersect::intersect_within,
    point::Point,
    tolerance::{near_greater, near_less},
};
use crate::Map;

// An edge to split and the point to split it at. An invalid point means the
// edge is new and goes in whole.
type Record = (Edge, Point);

fn cmp_points(a: &Point, b: &Point) -> std::cmp::Ordering {
    if a.less(b) {
        std::cmp::Ordering::Less
    } else if b.less(a) {
        std::cmp::Ordering::Greater
    } else {
        std::cmp::Ordering::Equal
    }
}

fn push_pair(out: &mut Vec<Edge>, a: Point, b: Point) {
    let piece = Edge::new(a, b);
    if piece.is_trivial() {
        return;
    }
    out.push(piece);
    out.push(piece.twin());
}

impl Map {
    /// Insert one edge, splitting it and every existing edge where they cross.
    pub fn insert(&mut self, e: &Edge) {
        self.insert_edges(std::iter::once(*e));
    }

    pub fn connect(&mut self, p1: Point, p2: Point) {
        self.insert(&Edge::new(p1, p2));
    }

    /// Insert edges one after the other. Trivial, invalid and already
    /// present edges are skipped.
    pub fn insert_edges<I: IntoIterator<Item = Edge>>(&mut self, edges: I) {
        let mut inserted = 0usize;
        for e in edges {
            if e.is_trivial() || e.has_invalid_point() || self.contains_edge(&e) {
                trace!(?e, "skip edge");
                continue;
            }
            let mut records = Vec::new();
            self.collect_intersections(&e.canonical(), &mut records);
            trace!(records = records.len(), "insert edge");
            self.add_intersections_and_sort(records);
            inserted += 1;
        }
        debug!(inserted, edges = self.edges.len(), "insert_edges");
        self.internal_verify();
    }

    /// Merge another map, intersecting its edges with ours in a single pass.
    ///
    /// The other map's edges do not cross each other, so they are only
    /// tested against the edges already here.
    pub fn merge(&mut self, other: &Map) {
        let mut records = Vec::new();
        for e in other.canonicals() {
            if !e.has_invalid_point() && !self.contains_edge(e) {
                self.collect_intersections(e, &mut records);
            }
        }
        debug!(incoming = other.edges.len(), records = records.len(), "merge");
        self.add_intersections_and_sort(records);
        self.internal_verify();
    }

    // Record where the canonical edge `new` crosses existing edges.
    fn collect_intersections(&self, new: &Edge, records: &mut Vec<Record>) {
        let (min_x, max_x) = (new.p1.x.min(new.p2.x), new.p1.x.max(new.p2.x));
        let (min_y, max_y) = (new.p1.y.min(new.p2.y), new.p1.y.max(new.p2.y));

        let mut split = false;
        for mine in self.edges.iter().filter(|e| e.is_canonical()) {
            // Sorted by first point: nothing further can reach us.
            if near_greater(mine.p1.x, max_x) {
                break;
            }
            if near_less(mine.p1.x.max(mine.p2.x), min_x)
                || near_less(mine.p1.y.max(mine.p2.y), min_y)
                || near_greater(mine.p1.y.min(mine.p2.y), max_y)
            {
                continue;
            }

            let ipt = intersect_within(&new.p1, &new.p2, &mine.p1, &mine.p2);
            if ipt.is_invalid() {
                continue;
            }
            if ipt != mine.p1 && ipt != mine.p2 {
                records.push((*mine, ipt));
            }
            if ipt != new.p1 && ipt != new.p2 {
                records.push((*new, ipt));
                split = true;
            }
        }

        if !split {
            records.push((*new, Point::INVALID));
        }
    }

    // Rebuild the edge vector: untouched edges are copied, recorded edges
    // are cut at each of their points, then everything is sorted again.
    fn add_intersections_and_sort(&mut self, mut records: Vec<Record>) {
        if records.is_empty() {
            return;
        }
        records.sort_by(|a, b| a.0.cmp_order(&b.0).then_with(|| cmp_points(&a.1, &b.1)));

        let mut out = Vec::with_capacity(self.edges.len() + records.len() * 4);
        for e in &self.edges {
            let c = e.canonical();
            let i = records.partition_point(|(r, _)| r.less(&c));
            let recorded = i < records.len() && records[i].0 == c;
            if !recorded {
                out.push(*e);
            }
        }

        for group in records.chunk_by(|a, b| a.0 == b.0) {
            let edge = group[0].0;
            let mut from = edge.p1;
            for (_, ipt) in group {
                if ipt.is_invalid() || *ipt == from {
                    continue;
                }
                push_pair(&mut out, from, *ipt);
                from = *ipt;
            }
            push_pair(&mut out, from, edge.p2);
        }

        self.edges = out;
        self.sort_edges();
        debug!(records = records.len(), edges = self.edges.len(), "add intersections");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point { Point::new(x, y) }
    fn e(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge { Edge::new(p(x1, y1), p(x2, y2)) }

    #[test]
    fn quad_has_no_splits() {
        let mut m = Map::new();
        m.insert_edges([
            e(1.0, 2.0, -3.0, -4.0),
            e(-3.0, -4.0, -3.0, 3.0),
            e(-3.0, 3.0, 2.0, 3.0),
            e(2.0, 3.0, 1.0, 2.0),
        ]);
        assert_eq!(m.all().len(), 8);
        assert!(m.verify().is_empty());
        assert_eq!(m.canonicals().count(), 4);
        assert_eq!(m.non_canonicals().count(), 4);
    }

    #[test]
    fn crossing_segments_split() {
        let mut m = Map::new();
        m.insert(&e(-2.0, 0.0, 2.0, 0.0));
        m.insert(&e(0.0, -3.0, 0.0, 3.0));
        assert_eq!(m.len(), 8);
        assert!(m.contains_point(&Point::ORIGIN));
        assert_eq!(m.outbounds(&Point::ORIGIN).len(), 4);
        assert!(m.verify().is_empty());
    }

    #[test]
    fn t_junction_keeps_new_edge() {
        let mut m = Map::new();
        m.insert(&e(0.0, 0.0, 4.0, 0.0));
        m.insert(&e(2.0, 0.0, 2.0, 3.0));
        assert_eq!(m.len(), 6);
        assert!(m.are_connected(&p(0.0, 0.0), &p(2.0, 0.0)));
        assert!(m.are_connected(&p(2.0, 0.0), &p(4.0, 0.0)));
        assert!(m.are_connected(&p(2.0, 0.0), &p(2.0, 3.0)));
        assert!(!m.are_connected(&p(0.0, 0.0), &p(4.0, 0.0)));
        assert!(m.verify().is_empty());
    }

    #[test]
    fn new_edge_through_existing_vertex() {
        let mut m = Map::new();
        m.connect(p(0.0, 0.0), p(0.0, 1.0));
        m.connect(p(-1.0, 0.0), p(1.0, 0.0));
        assert_eq!(m.len(), 6);
        assert_eq!(m.outbounds(&Point::ORIGIN).len(), 3);
        assert!(m.verify().is_empty());
    }

    #[test]
    fn one_edge_across_many() {
        let mut m = Map::new();
        for y in 0..3 {
            m.insert(&e(0.0, y as f64, 2.0, y as f64));
        }
        m.insert(&e(1.0, -1.0, 1.0, 3.0));
        // 3 horizontals cut in two, one vertical cut in four.
        assert_eq!(m.len(), 2 * (6 + 4));
        assert!(m.verify().is_empty());
    }

    #[test]
    fn insertion_is_idempotent() {
        let mut m = Map::new();
        m.insert(&e(-2.0, 0.0, 2.0, 0.0));
        m.insert(&e(0.0, -3.0, 0.0, 3.0));
        let before = m.all().to_vec();
        m.insert(&e(0.0, 0.0, 2.0, 0.0));
        m.insert(&e(2.0, 0.0, 0.0, 0.0));
        assert_eq!(m.all(), &before[..]);
    }

    #[test]
    fn bad_edges_are_skipped_not_fatal() {
        let mut m = Map::new();
        m.insert_edges([
            e(1.0, 1.0, 1.0, 1.0),
            Edge::invalid(),
            Edge::new(Point::INVALID, p(1.0, 1.0)),
            e(0.0, 0.0, 1.0, 1.0),
        ]);
        assert_eq!(m.len(), 2);
        assert!(m.verify().is_empty());
    }

    #[test]
    fn nan_coordinates_are_skipped() {
        let mut m = Map::new();
        m.insert(&e(0.0, 0.0, 2.0, 0.0));
        m.insert(&Edge::new(p(-f64::NAN, 0.0), p(1.0, 1.0)));
        m.insert(&Edge::new(p(1.0, -1.0), p(0.0, f64::NAN)));
        m.insert(&Edge::new(p(1.0, -1.0), p(f64::INFINITY, 1.0)));
        assert_eq!(m.len(), 2);
        assert!(m.verify().is_empty());

        let mut other = Map::new();
        other.edges.push(Edge::new(p(-f64::NAN, 0.0), p(1.0, 1.0)));
        m.merge(&other);
        assert_eq!(m.len(), 2);
        assert!(m.verify().is_empty());
    }

    #[test]
    fn merge_grid() {
        let n = 4;
        let mut horizontals = Map::new();
        let mut verticals = Map::new();
        for i in 0..n {
            let c = i as f64;
            horizontals.insert(&e(-1.0, c, n as f64, c));
            verticals.insert(&e(c, -1.0, c, n as f64));
        }
        horizontals.merge(&verticals);
        // Each of the 2n lines is cut into n + 1 pieces.
        assert_eq!(horizontals.len(), 2 * 2 * n * (n + 1));
        assert!(horizontals.verify().is_empty());
        for i in 0..n {
            for j in 0..n {
                assert_eq!(horizontals.outbounds(&p(i as f64, j as f64)).len(), 4);
            }
        }
    }

    #[test]
    fn merge_skips_shared_edges() {
        let mut a = Map::from_edges([e(0.0, 0.0, 1.0, 0.0), e(1.0, 0.0, 1.0, 1.0)]);
        let b = Map::from_edges([e(0.0, 0.0, 1.0, 0.0), e(0.0, 0.0, 0.0, 1.0)]);
        a.merge(&b);
        assert_eq!(a.len(), 6);
        assert!(a.verify().is_empty());

        let before = a.len();
        a.merge(&Map::new());
        assert_eq!(a.len(), before);
    }
}
