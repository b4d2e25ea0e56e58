// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Convex Hull of Integer Point Clouds
//!
//! `ConvexHull::compute` returns the vertex set of the convex hull of a finite
//! set of integer points together with enough structure (facets, or the
//! lower-dimensional shape) to answer exact containment queries.
//!
//! ## Algorithm
//!
//! - Input points are sorted and deduplicated; the affine dimension (0..=3)
//!   is found by growing an affinely independent frame.
//! - Dimension 3: incremental construction from an initial tetrahedron.
//!   A facet is visible from a point only if the point is strictly above it,
//!   so points on the current boundary never create facets. The visible
//!   region is replaced by a fan of triangles over its horizon.
//! - The triangulation may split a flat polygon into several coplanar
//!   triangles, so not every triangle corner is a vertex of the polytope.
//!   A corner is reported only if the normals of its incident triangles
//!   span 3-space, i.e. its normal cone is full-dimensional.
//! - Dimension 2: monotone chain in the coordinate plane where the supporting
//!   plane projects injectively; collinear boundary points are dropped.
//! - Dimension 1 and 0: segment endpoints, or the single point.
//!
//! Every predicate is evaluated in `i128`. Coordinates are limited to
//! `MAX_COORDINATE` in magnitude so that the largest product (a determinant of
//! three facet normals) cannot overflow.
//!
//! ## Degenerate inputs
//!
//! `DegeneracyPolicy::Reduce` returns the vertices of the lower-dimensional
//! hull; `DegeneracyPolicy::Reject` fails with `HullError::InsufficientPoints`
//! whenever fewer than four affinely independent points exist. An empty input
//! is always `InsufficientPoints`.

use crate::math::point::{Point3, Vector3, orient3d};
use num_traits::{PrimInt, Signed};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Largest admissible absolute coordinate.
pub const MAX_COORDINATE: i128 = 1 << 16;

/// What to do when the points do not span 3-space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DegeneracyPolicy {
    /// Return the vertices of the lower-dimensional hull.
    #[default]
    Reduce,
    /// Fail with `HullError::InsufficientPoints`.
    Reject,
}

impl std::fmt::Display for DegeneracyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegeneracyPolicy::Reduce => write!(f, "reduce"),
            DegeneracyPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HullError {
    #[error(
        "convex hull undefined in 3 dimensions: {points} distinct point(s) of affine dimension {dimension}"
    )]
    InsufficientPoints { points: usize, dimension: usize },
    #[error("coordinate magnitude {magnitude} exceeds the exact range of {limit}")]
    CoordinateOutOfRange { magnitude: i128, limit: i128 },
}

/// An outward-oriented triangle of a full-dimensional hull.
///
/// Points `q` inside the hull satisfy `normal · q <= offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    vertices: [usize; 3],
    normal: Vector3,
    offset: i128,
}

impl Facet {
    /// Indices of the corners into `ConvexHull::points`, counter-clockwise
    /// when seen from outside.
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Primitive outward normal.
    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    #[inline]
    pub fn offset(&self) -> i128 {
        self.offset
    }

    /// Positive above the facet, zero on its plane, negative below.
    #[inline]
    fn height(&self, q: &Vector3) -> i128 {
        self.normal.dot(q) - self.offset
    }

    #[inline]
    fn directed_edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

#[derive(Debug, Clone)]
enum Shape {
    Point,
    Segment,
    Polygon {
        normal: Vector3,
        drop_axis: usize,
        ring: Vec<usize>,
    },
    Polytope {
        facets: Vec<Facet>,
    },
}

/// The convex hull of a finite set of integer points.
#[derive(Debug, Clone)]
pub struct ConvexHull<T> {
    points: Vec<Point3<T>>,
    widened: Vec<Vector3>,
    shape: Shape,
    vertices: Vec<usize>,
}

impl<T> ConvexHull<T>
where
    T: PrimInt + Signed + Into<i128>,
{
    /// Computes the hull of `input`. Duplicates are ignored.
    pub fn compute(input: &[Point3<T>], policy: DegeneracyPolicy) -> Result<Self, HullError> {
        let mut points = input.to_vec();
        points.sort_unstable();
        points.dedup();

        if let Some(magnitude) = points.iter().map(Point3::max_abs_coordinate).max()
            && magnitude > MAX_COORDINATE
        {
            return Err(HullError::CoordinateOutOfRange {
                magnitude,
                limit: MAX_COORDINATE,
            });
        }

        if points.is_empty() {
            return Err(HullError::InsufficientPoints {
                points: 0,
                dimension: 0,
            });
        }

        let widened: Vec<Vector3> = points.iter().map(Point3::widen).collect();
        let frame = AffineFrame::of(&widened);
        let dimension = frame.dimension();

        if dimension < 3 && policy == DegeneracyPolicy::Reject {
            return Err(HullError::InsufficientPoints {
                points: points.len(),
                dimension,
            });
        }

        let (shape, vertices) = match frame {
            AffineFrame::Point => (Shape::Point, vec![0]),
            AffineFrame::Line => (Shape::Segment, vec![0, points.len() - 1]),
            AffineFrame::Plane { normal } => planar_hull(&widened, normal),
            AffineFrame::Space { simplex } => spatial_hull(&widened, simplex),
        };

        Ok(Self {
            points,
            widened,
            shape,
            vertices,
        })
    }

    /// Affine dimension of the input (0 to 3).
    #[inline]
    pub fn dimension(&self) -> usize {
        match self.shape {
            Shape::Point => 0,
            Shape::Segment => 1,
            Shape::Polygon { .. } => 2,
            Shape::Polytope { .. } => 3,
        }
    }

    /// The deduplicated, sorted input points.
    #[inline]
    pub fn points(&self) -> &[Point3<T>] {
        &self.points
    }

    /// Indices into `points` of the hull vertices, ascending.
    #[inline]
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertices
    }

    /// The hull vertices in ascending lexicographic order.
    pub fn vertices(&self) -> Vec<Point3<T>> {
        self.vertices.iter().map(|&i| self.points[i]).collect()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if `p` is one of the hull vertices.
    pub fn is_vertex(&self, p: &Point3<T>) -> bool {
        self.points
            .binary_search(p)
            .is_ok_and(|i| self.vertices.binary_search(&i).is_ok())
    }

    /// Facets of a full-dimensional hull; empty for lower dimensions.
    pub fn facets(&self) -> &[Facet] {
        match &self.shape {
            Shape::Polytope { facets } => facets,
            _ => &[],
        }
    }

    /// Returns `true` if `p` lies in the hull (boundary included).
    pub fn contains(&self, p: &Point3<T>) -> bool {
        if p.max_abs_coordinate() > MAX_COORDINATE {
            return false;
        }
        let q = p.widen();
        let w = &self.widened;

        match &self.shape {
            Shape::Point => q == w[self.vertices[0]],
            Shape::Segment => {
                let a = w[self.vertices[0]];
                let d = w[self.vertices[1]].sub(&a);
                let e = q.sub(&a);
                let along = d.dot(&e);
                d.cross(&e).is_zero() && along >= 0 && along <= d.dot(&d)
            }
            Shape::Polygon {
                normal,
                drop_axis,
                ring,
            } => {
                if normal.dot(&q.sub(&w[ring[0]])) != 0 {
                    return false;
                }
                let target = project(&q, *drop_axis);
                (0..ring.len()).all(|k| {
                    let a = project(&w[ring[k]], *drop_axis);
                    let b = project(&w[ring[(k + 1) % ring.len()]], *drop_axis);
                    cross2(a, b, target) >= 0
                })
            }
            Shape::Polytope { facets } => facets.iter().all(|f| f.height(&q) <= 0),
        }
    }
}

/// An affinely independent frame grown greedily over the input.
enum AffineFrame {
    Point,
    Line,
    Plane { normal: Vector3 },
    Space { simplex: [usize; 4] },
}

impl AffineFrame {
    fn of(w: &[Vector3]) -> Self {
        let origin = w[0];
        if w.len() == 1 {
            return AffineFrame::Point;
        }

        let d1 = w[1].sub(&origin);
        let Some(i2) = (2..w.len()).find(|&i| !d1.cross(&w[i].sub(&origin)).is_zero()) else {
            return AffineFrame::Line;
        };

        let normal = d1.cross(&w[i2].sub(&origin));
        let Some(i3) = (2..w.len()).find(|&i| normal.dot(&w[i].sub(&origin)) != 0) else {
            return AffineFrame::Plane { normal };
        };

        AffineFrame::Space {
            simplex: [0, 1, i2, i3],
        }
    }

    fn dimension(&self) -> usize {
        match self {
            AffineFrame::Point => 0,
            AffineFrame::Line => 1,
            AffineFrame::Plane { .. } => 2,
            AffineFrame::Space { .. } => 3,
        }
    }
}

#[inline]
fn project(v: &Vector3, drop_axis: usize) -> (i128, i128) {
    match drop_axis {
        0 => (v.y, v.z),
        1 => (v.x, v.z),
        _ => (v.x, v.y),
    }
}

#[inline]
fn cross2(o: (i128, i128), a: (i128, i128), b: (i128, i128)) -> i128 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn planar_hull(w: &[Vector3], normal: Vector3) -> (Shape, Vec<usize>) {
    // Drop the axis the normal leans on most; coplanar points stay distinct.
    let drop_axis = (0..3)
        .max_by_key(|&axis| normal.component(axis).abs())
        .unwrap_or(2);

    let mut order: Vec<usize> = (0..w.len()).collect();
    order.sort_by_key(|&i| project(&w[i], drop_axis));

    let chain = |indices: &mut dyn Iterator<Item = usize>| {
        let mut half: Vec<usize> = Vec::with_capacity(w.len());
        for i in indices {
            while half.len() >= 2 {
                let o = project(&w[half[half.len() - 2]], drop_axis);
                let a = project(&w[half[half.len() - 1]], drop_axis);
                if cross2(o, a, project(&w[i], drop_axis)) > 0 {
                    break;
                }
                half.pop();
            }
            half.push(i);
        }
        half.pop();
        half
    };

    let mut ring = chain(&mut order.iter().copied());
    ring.extend(chain(&mut order.iter().rev().copied()));

    let mut vertices = ring.clone();
    vertices.sort_unstable();

    (
        Shape::Polygon {
            normal,
            drop_axis,
            ring,
        },
        vertices,
    )
}

/// Incremental triangulated hull with a directed-edge index.
struct FacetSet<'a> {
    w: &'a [Vector3],
    facets: Vec<Facet>,
    alive: Vec<bool>,
    edges: FxHashMap<(usize, usize), usize>,
}

impl<'a> FacetSet<'a> {
    fn new(w: &'a [Vector3]) -> Self {
        Self {
            w,
            facets: Vec::new(),
            alive: Vec::new(),
            edges: FxHashMap::default(),
        }
    }

    fn add(&mut self, a: usize, b: usize, c: usize) {
        let normal = self.w[b]
            .sub(&self.w[a])
            .cross(&self.w[c].sub(&self.w[a]))
            .primitive();
        debug_assert!(
            !normal.is_zero(),
            "called `FacetSet::add` with collinear corners {a}, {b}, {c}"
        );

        let facet = Facet {
            vertices: [a, b, c],
            normal,
            offset: normal.dot(&self.w[a]),
        };
        let id = self.facets.len();
        for edge in facet.directed_edges() {
            let previous = self.edges.insert(edge, id);
            debug_assert!(
                previous.is_none(),
                "directed edge {edge:?} already owned by facet {previous:?}"
            );
        }
        self.facets.push(facet);
        self.alive.push(true);
    }

    fn remove(&mut self, id: usize) {
        self.alive[id] = false;
        for edge in self.facets[id].directed_edges() {
            self.edges.remove(&edge);
        }
    }

    fn insert_point(&mut self, p: usize) {
        let q = self.w[p];
        let visible: Vec<usize> = (0..self.facets.len())
            .filter(|&f| self.alive[f] && self.facets[f].height(&q) > 0)
            .collect();
        if visible.is_empty() {
            return;
        }

        let mut is_visible = vec![false; self.facets.len()];
        for &f in &visible {
            is_visible[f] = true;
        }

        let mut horizon: SmallVec<[(usize, usize); 16]> = SmallVec::new();
        for &f in &visible {
            for (a, b) in self.facets[f].directed_edges() {
                match self.edges.get(&(b, a)) {
                    Some(&twin) if is_visible[twin] => {}
                    _ => horizon.push((a, b)),
                }
            }
        }

        for &f in &visible {
            self.remove(f);
        }
        for (a, b) in horizon {
            self.add(a, b, p);
        }
    }

    fn into_live_facets(self) -> Vec<Facet> {
        self.facets
            .into_iter()
            .zip(self.alive)
            .filter_map(|(f, alive)| alive.then_some(f))
            .collect()
    }
}

fn spatial_hull(w: &[Vector3], simplex: [usize; 4]) -> (Shape, Vec<usize>) {
    let mut set = FacetSet::new(w);

    let [p0, p1, p2, p3] = simplex;
    for (a, b, c, inner) in [
        (p0, p1, p2, p3),
        (p0, p1, p3, p2),
        (p0, p2, p3, p1),
        (p1, p2, p3, p0),
    ] {
        if orient3d(&w[a], &w[b], &w[c], &w[inner]) > 0 {
            set.add(a, c, b);
        } else {
            set.add(a, b, c);
        }
    }

    for p in 0..w.len() {
        if !simplex.contains(&p) {
            set.insert_point(p);
        }
    }

    let facets = set.into_live_facets();

    let mut incident: FxHashMap<usize, SmallVec<[Vector3; 8]>> = FxHashMap::default();
    for facet in &facets {
        for v in facet.vertices() {
            incident.entry(v).or_default().push(facet.normal());
        }
    }

    let mut vertices: Vec<usize> = incident
        .into_iter()
        .filter_map(|(v, normals)| spans_space(&normals).then_some(v))
        .collect();
    vertices.sort_unstable();

    (Shape::Polytope { facets }, vertices)
}

/// Returns `true` if the vectors contain three linearly independent ones.
fn spans_space(normals: &[Vector3]) -> bool {
    let Some(first) = normals.first() else {
        return false;
    };
    let Some(plane) = normals
        .iter()
        .map(|n| first.cross(n))
        .find(|c| !c.is_zero())
    else {
        return false;
    };
    normals.iter().any(|n| plane.dot(n) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type P = Point3<i64>;

    fn p(x: i64, y: i64, z: i64) -> P {
        Point3::new(x, y, z)
    }

    fn sorted(mut v: Vec<P>) -> Vec<P> {
        v.sort_unstable();
        v
    }

    fn cube_with_clutter() -> Vec<P> {
        let mut pts = Vec::new();
        for x in 0..=2 {
            for y in 0..=2 {
                for z in 0..=2 {
                    pts.push(p(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn test_cube_lattice_reports_only_corners() {
        let hull = ConvexHull::compute(&cube_with_clutter(), DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.dimension(), 3);

        let mut expected = Vec::new();
        for x in [0, 2] {
            for y in [0, 2] {
                for z in [0, 2] {
                    expected.push(p(x, y, z));
                }
            }
        }
        assert_eq!(hull.vertices(), sorted(expected));

        // Edge and face points may survive as triangle corners, but every
        // facet lies in one of the six cube faces.
        for facet in hull.facets() {
            let n = facet.normal();
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1, "unexpected normal {n}");
        }
        assert!(hull.contains(&p(1, 1, 1)));
        assert!(hull.contains(&p(2, 1, 0)));
        assert!(!hull.contains(&p(3, 1, 1)));
        assert!(!hull.contains(&p(-1, 0, 0)));
    }

    #[test]
    fn test_tetrahedron_with_interior_points() {
        let pts = vec![
            p(0, 0, 0),
            p(4, 0, 0),
            p(0, 4, 0),
            p(0, 0, 4),
            p(1, 1, 1),
            p(1, 0, 1),
            p(2, 1, 1),
        ];
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reject).unwrap();
        assert_eq!(
            hull.vertices(),
            vec![p(0, 0, 0), p(0, 0, 4), p(0, 4, 0), p(4, 0, 0)]
        );
        assert_eq!(hull.facets().len(), 4);
        for q in &pts {
            assert!(hull.contains(q), "{q} should be inside");
        }
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let pts = vec![p(0, 0, 0), p(0, 0, 0), p(1, 0, 0), p(0, 1, 0), p(0, 0, 1), p(1, 0, 0)];
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.points().len(), 4);
        assert_eq!(hull.num_vertices(), 4);
    }

    #[test]
    fn test_three_non_collinear_points_reduce_to_triangle() {
        let pts = vec![p(0, 0, 0), p(3, 0, 1), p(0, 2, 5)];
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.dimension(), 2);
        assert_eq!(hull.vertices(), sorted(pts.clone()));
        assert!(hull.facets().is_empty());
    }

    #[test]
    fn test_three_non_collinear_points_rejected_under_reject_policy() {
        let pts = vec![p(0, 0, 0), p(3, 0, 1), p(0, 2, 5)];
        let err = ConvexHull::compute(&pts, DegeneracyPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            HullError::InsufficientPoints {
                points: 3,
                dimension: 2
            }
        );
    }

    #[test]
    fn test_coplanar_cloud_drops_edge_and_interior_points() {
        // A 3x3 grid in the tilted plane z = x + y.
        let mut pts = Vec::new();
        for x in 0..=2 {
            for y in 0..=2 {
                pts.push(p(x, y, x + y));
            }
        }
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.dimension(), 2);
        assert_eq!(
            hull.vertices(),
            vec![p(0, 0, 0), p(0, 2, 2), p(2, 0, 2), p(2, 2, 4)]
        );
        assert!(hull.contains(&p(1, 1, 2)));
        assert!(!hull.contains(&p(1, 1, 3)));
        assert!(!hull.contains(&p(3, 0, 3)));
    }

    #[test]
    fn test_collinear_cloud_reduces_to_endpoints() {
        let pts = vec![p(2, 2, 2), p(0, 0, 0), p(1, 1, 1), p(3, 3, 3)];
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.dimension(), 1);
        assert_eq!(hull.vertices(), vec![p(0, 0, 0), p(3, 3, 3)]);
        assert!(hull.contains(&p(2, 2, 2)));
        assert!(!hull.contains(&p(4, 4, 4)));
        assert!(!hull.contains(&p(1, 2, 1)));
    }

    #[test]
    fn test_single_point_and_empty_input() {
        let hull = ConvexHull::compute(&[p(1, 2, 3)], DegeneracyPolicy::Reduce).unwrap();
        assert_eq!(hull.dimension(), 0);
        assert_eq!(hull.vertices(), vec![p(1, 2, 3)]);
        assert!(hull.contains(&p(1, 2, 3)));

        let err = ConvexHull::<i64>::compute(&[], DegeneracyPolicy::Reduce).unwrap_err();
        assert_eq!(
            err,
            HullError::InsufficientPoints {
                points: 0,
                dimension: 0
            }
        );
    }

    #[test]
    fn test_coordinates_out_of_range_are_rejected() {
        let pts = vec![p(0, 0, 0), p(1 << 20, 0, 0)];
        assert!(matches!(
            ConvexHull::compute(&pts, DegeneracyPolicy::Reduce),
            Err(HullError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_counter_triple_cloud_vertices() {
        // Feasible (ngb, kgb, kc) triples of a 4x4 lattice with three solutes.
        let pts: Vec<P> = [
            (0, 0, 1), (0, 0, 2), (0, 0, 3), (1, 0, 0), (1, 0, 1), (1, 0, 2),
            (1, 0, 3), (2, 0, 0), (2, 0, 1), (2, 0, 2), (2, 0, 3), (2, 1, 0),
            (2, 1, 1), (3, 0, 1), (3, 0, 2), (3, 1, 0), (3, 1, 1), (3, 2, 1),
        ]
        .iter()
        .map(|&(x, y, z)| p(x, y, z))
        .collect();
        let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reject).unwrap();
        assert_eq!(
            hull.vertices(),
            vec![
                p(0, 0, 1),
                p(0, 0, 3),
                p(1, 0, 0),
                p(2, 0, 0),
                p(2, 0, 3),
                p(2, 1, 0),
                p(3, 0, 1),
                p(3, 0, 2),
                p(3, 1, 0),
                p(3, 2, 1),
            ]
        );
    }

    fn cloud() -> impl Strategy<Value = Vec<P>> {
        prop::collection::vec((-4i64..=4, -4i64..=4, -4i64..=4), 1..24)
            .prop_map(|v| v.into_iter().map(|(x, y, z)| p(x, y, z)).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]

        #[test]
        fn prop_every_input_point_is_inside(pts in cloud()) {
            let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
            for q in &pts {
                prop_assert!(hull.contains(q));
            }
        }

        #[test]
        fn prop_vertices_are_extreme_and_sufficient(pts in cloud()) {
            let hull = ConvexHull::compute(&pts, DegeneracyPolicy::Reduce).unwrap();
            let vertices = hull.vertices();

            // Every non-vertex lies in the hull of the vertices alone.
            let reduced = ConvexHull::compute(&vertices, DegeneracyPolicy::Reduce).unwrap();
            for q in hull.points() {
                prop_assert!(reduced.contains(q));
            }

            // No vertex lies in the hull of the remaining points.
            for v in &vertices {
                let others: Vec<P> = hull.points().iter().copied().filter(|q| q != v).collect();
                if others.is_empty() {
                    continue;
                }
                let without = ConvexHull::compute(&others, DegeneracyPolicy::Reduce).unwrap();
                prop_assert!(!without.contains(v), "{} is not extreme", v);
            }
        }
    }
}
