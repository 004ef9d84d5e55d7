use planar_map::geometry::intersect::{intersect, intersect_within};
use planar_map::{make_faces, Edge, Map, Point, Transform};
use std::f64::consts::PI;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn e(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge {
    Edge::new(p(x1, y1), p(x2, y2))
}

#[test]
fn closed_quadrilateral() {
    let mut m = Map::new();
    m.insert_edges([
        e(1.0, 2.0, -3.0, -4.0),
        e(-3.0, -4.0, -3.0, 3.0),
        e(-3.0, 3.0, 2.0, 3.0),
        e(2.0, 3.0, 1.0, 2.0),
    ]);
    assert_eq!(m.all().len(), 8);
    assert_eq!(m.verify().len(), 0);
    for pt in [p(1.0, 2.0), p(-3.0, -4.0), p(-3.0, 3.0), p(2.0, 3.0)] {
        assert_eq!(m.outbounds(&pt).len(), 2);
    }
}

#[test]
fn crossed_segments_meet_at_origin() {
    let mut m = Map::new();
    m.insert(&e(-2.0, 0.0, 2.0, 0.0));
    m.insert(&e(0.0, -3.0, 0.0, 3.0));
    assert_eq!(m.all().len(), 8);
    assert_eq!(m.outbounds(&p(0.0, 0.0)).len(), 4);
    for end in [p(-2.0, 0.0), p(2.0, 0.0), p(0.0, -3.0), p(0.0, 3.0)] {
        assert!(m.are_connected(&Point::ORIGIN, &end));
    }

    let faces = make_faces(&m);
    assert_eq!(faces.white.len(), 1);
    assert_eq!(faces.white[0].points.len(), 8);
    assert_eq!(faces.exteriors.len(), 0);
}

#[test]
fn perpendicular_segments() {
    assert!(intersect_within(&p(3.0, 1.0), &p(9.0, 1.0), &p(5.0, 2.0), &p(5.0, 6.0)).is_invalid());
    assert_eq!(intersect(&p(3.0, 1.0), &p(9.0, 1.0), &p(5.0, -2.0), &p(5.0, 6.0)), p(5.0, 1.0));
}

#[test]
fn every_edge_has_its_twin() {
    let m = Map::from_edges([
        e(0.0, 0.0, 10.0, 10.0),
        e(0.0, 10.0, 10.0, 0.0),
        e(5.0, -1.0, 5.0, 11.0),
        e(-1.0, 3.0, 11.0, 3.0),
    ]);
    assert!(m.verify().is_empty());
    for edge in m.all() {
        assert!(m.contains_edge(&edge.twin()));
    }
    // Three lines through (5,5) share one vertex.
    assert_eq!(m.outbounds(&p(5.0, 5.0)).len(), 6);
}

#[test]
fn grid_merge_counts() {
    let (rows, cols) = (5usize, 6usize);
    let mut h = Map::new();
    let mut v = Map::new();
    for i in 0..rows {
        h.insert(&e(-1.0, i as f64, cols as f64, i as f64));
    }
    for j in 0..cols {
        v.insert(&e(j as f64, -1.0, j as f64, rows as f64));
    }
    h.merge(&v);
    let undirected = rows * (cols + 1) + cols * (rows + 1);
    assert_eq!(h.len(), 2 * undirected);
    assert!(h.verify().is_empty());

    // Interior cells are the bounded faces; the outer walk is too long to color.
    let faces = make_faces(&h);
    assert_eq!(faces.white.len() + faces.black.len(), (rows - 1) * (cols - 1));
    assert_eq!(faces.exteriors.len(), 1);
    assert!(planar_map::algorithms::faces::verify(&h, &faces).is_empty());
}

#[test]
fn reflection_then_faces() {
    let mut m = Map::from_edges([
        e(0.0, 0.0, 4.0, 0.0),
        e(4.0, 0.0, 4.0, 4.0),
        e(4.0, 4.0, 0.0, 4.0),
        e(0.0, 4.0, 0.0, 0.0),
        e(0.0, 0.0, 4.0, 4.0),
    ]);
    let mirror = Transform::reflect(p(0.0, 0.0), p(0.0, 1.0)).unwrap();
    assert!(mirror.flips());
    m.apply_to_self(&mirror);
    assert!(m.verify().is_empty());
    assert!(m.are_connected(&p(-4.0, 4.0), &p(0.0, 0.0)));

    let faces = make_faces(&m);
    // Two triangles and the outside; the diagonal corners have degree 3.
    assert_eq!(faces.len(), 3);
    assert_eq!(faces.red.len(), 3);
}

#[test]
fn rotation_keeps_structure() {
    let m = Map::from_edges([e(-2.0, 0.0, 2.0, 0.0), e(0.0, -3.0, 0.0, 3.0)]);
    let r = m.apply(&Transform::rotate_around(p(1.0, 1.0), PI / 3.0));
    assert_eq!(r.len(), m.len());
    assert!(r.verify().is_empty());
    let center = Transform::rotate_around(p(1.0, 1.0), PI / 3.0).apply_point(&Point::ORIGIN);
    assert_eq!(r.outbounds(&center).len(), 4);
}

#[test]
fn neighbors_walk_a_square() {
    let m = Map::from_edges([
        e(0.0, 0.0, 1.0, 0.0),
        e(1.0, 0.0, 1.0, 1.0),
        e(1.0, 1.0, 0.0, 1.0),
        e(0.0, 1.0, 0.0, 0.0),
    ]);
    // Turning with `before` from each edge goes around the square.
    let start = e(0.0, 0.0, 1.0, 0.0);
    let mut cur = start;
    let mut seen = vec![cur.p1];
    for _ in 0..3 {
        cur = m.before(&cur).unwrap();
        seen.push(cur.p1);
    }
    assert_eq!(m.before(&cur).unwrap(), start);
    assert_eq!(seen.len(), 4);
}
