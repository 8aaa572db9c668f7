//! Geometry kernel: pure polygon operations.
//!
//! Polygons are ordered vertex lists (`Vec<(f64, f64)>`), meters. All
//! predicates are epsilon-tolerant since vertices come from floating-point
//! cut placement. Boolean operations (intersection/difference/union) go
//! through `i_overlay`; metric queries (centroid, distance, containment) go
//! through `geo`.

use galley_core::{Error, Result};
use geo::{Centroid, Contains, Coord, EuclideanDistance, LineString, Point};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

/// Coordinate tolerance.
pub const EPS: f64 = 1e-9;

/// Area tolerance in square meters.
pub const AREA_EPS: f64 = 1e-6;

/// Builds an axis-aligned rectangle polygon.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Vec<(f64, f64)> {
    vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)]
}

/// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
pub fn bounds(polygon: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for &(x, y) in polygon {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x, max_y)
}

fn to_geo(polygon: &[(f64, f64)]) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = polygon.iter().map(|&(x, y)| Coord { x, y }).collect();
    geo::Polygon::new(LineString::from(coords), vec![])
}

/// Unsigned polygon area by the shoelace formula.
pub fn area(polygon: &[(f64, f64)]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let (x1, y1) = polygon[i];
        let (x2, y2) = polygon[(i + 1) % n];
        acc += x1 * y2 - x2 * y1;
    }
    acc.abs() / 2.0
}

/// Area-weighted centroid. Falls back to the vertex mean for degenerate
/// input.
pub fn centroid(polygon: &[(f64, f64)]) -> (f64, f64) {
    if let Some(c) = to_geo(polygon).centroid() {
        return (c.x(), c.y());
    }
    if polygon.is_empty() {
        return (0.0, 0.0);
    }
    let n = polygon.len() as f64;
    let sum = polygon
        .iter()
        .fold((0.0, 0.0), |acc, &(x, y)| (acc.0 + x, acc.1 + y));
    (sum.0 / n, sum.1 / n)
}

/// Checks that a polygon is simple: at least 3 vertices, positive area, no
/// self-intersecting edges.
pub fn is_simple(polygon: &[(f64, f64)]) -> bool {
    let n = polygon.len();
    if n < 3 || area(polygon) <= AREA_EPS {
        return false;
    }
    // Pairwise edge intersection test, skipping adjacent edges. O(n^2) is
    // fine at footprint vertex counts.
    for i in 0..n {
        let a1 = polygon[i];
        let a2 = polygon[(i + 1) % n];
        for j in (i + 1)..n {
            // Adjacent edges share an endpoint; skip them (and the
            // first/last pair which also touch).
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let b1 = polygon[j];
            let b2 = polygon[(j + 1) % n];
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}

/// Validates simplicity, returning `InvalidGeometry` with context on
/// failure.
pub fn validate_simple(polygon: &[(f64, f64)]) -> Result<()> {
    if polygon.len() < 3 {
        return Err(Error::InvalidGeometry(format!(
            "polygon needs at least 3 vertices, got {}",
            polygon.len()
        )));
    }
    if area(polygon) <= AREA_EPS {
        return Err(Error::InvalidGeometry("polygon has zero area".into()));
    }
    if !is_simple(polygon) {
        return Err(Error::InvalidGeometry("polygon is self-intersecting".into()));
    }
    Ok(())
}

/// Proper intersection test for two segments (shared endpoints do not
/// count).
fn segments_intersect(a1: (f64, f64), a2: (f64, f64), b1: (f64, f64), b2: (f64, f64)) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Inclusive point containment: inside or on the boundary.
pub fn contains_point(polygon: &[(f64, f64)], point: (f64, f64)) -> bool {
    let poly = to_geo(polygon);
    let p = Point::new(point.0, point.1);
    poly.contains(&p) || poly.euclidean_distance(&p) <= EPS
}

/// Checks that `inner` lies entirely within `outer` (boundary contact
/// allowed): every vertex is inside and the shared area equals the inner
/// area.
pub fn contains_polygon(outer: &[(f64, f64)], inner: &[(f64, f64)]) -> bool {
    for &p in inner {
        if !contains_point(outer, p) {
            return false;
        }
    }
    let inner_area = area(inner);
    overlap_area(outer, inner) >= inner_area - AREA_EPS
}

fn to_contour(polygon: &[(f64, f64)]) -> Vec<[f64; 2]> {
    polygon.iter().map(|&(x, y)| [x, y]).collect()
}

fn from_shapes(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    for shape in shapes {
        // First contour of each shape is the outer ring; holes cannot arise
        // from intersecting simple convex-ish strips with the footprint,
        // and are dropped if a boolean op ever produces one.
        if let Some(contour) = shape.into_iter().next() {
            if contour.len() >= 3 {
                out.push(contour.into_iter().map(|p| (p[0], p[1])).collect());
            }
        }
    }
    out
}

fn boolean_op(
    a: &[(f64, f64)],
    b: &[(f64, f64)],
    rule: OverlayRule,
) -> Vec<Vec<(f64, f64)>> {
    let subj = vec![to_contour(a)];
    let clip = vec![to_contour(b)];
    from_shapes(subj.overlay(&clip, rule, FillRule::NonZero))
}

/// Polygon intersection. May return zero, one or several pieces.
pub fn intersection(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    boolean_op(a, b, OverlayRule::Intersect)
}

/// Polygon difference `a - b`.
pub fn difference(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    boolean_op(a, b, OverlayRule::Difference)
}

/// Polygon union.
pub fn union(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    boolean_op(a, b, OverlayRule::Union)
}

/// Positive intersection area of two polygons.
pub fn overlap_area(a: &[(f64, f64)], b: &[(f64, f64)]) -> f64 {
    // Cheap AABB reject first.
    let (a_min_x, a_min_y, a_max_x, a_max_y) = bounds(a);
    let (b_min_x, b_min_y, b_max_x, b_max_y) = bounds(b);
    if a_max_x < b_min_x || b_max_x < a_min_x || a_max_y < b_min_y || b_max_y < a_min_y {
        return 0.0;
    }
    intersection(a, b).iter().map(|p| area(p)).sum()
}

/// Returns true if two polygons share positive interior area.
pub fn overlaps(a: &[(f64, f64)], b: &[(f64, f64)]) -> bool {
    overlap_area(a, b) > AREA_EPS
}

/// Minimum distance between two polygons; zero when they touch or overlap.
pub fn min_distance(a: &[(f64, f64)], b: &[(f64, f64)]) -> f64 {
    to_geo(a).euclidean_distance(&to_geo(b))
}

/// Minimum distance from a polygon to the boundary ring of `outer`.
///
/// Unlike [`min_distance`], a polygon inside `outer` gets its distance to
/// the walls, not zero.
pub fn boundary_distance(outer: &[(f64, f64)], polygon: &[(f64, f64)]) -> f64 {
    let mut ring: Vec<Coord<f64>> = outer.iter().map(|&(x, y)| Coord { x, y }).collect();
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    let boundary = LineString::from(ring);
    boundary.euclidean_distance(&to_geo(polygon))
}

/// Outward clearance expansion.
///
/// Axis-aligned rectangles (the common case: every equipment footprint)
/// are inflated exactly. General polygons are offset by scaling vertices
/// away from the centroid, which is exact for convex shapes and a safe
/// overestimate near convex corners.
pub fn buffer(polygon: &[(f64, f64)], distance: f64) -> Vec<(f64, f64)> {
    if distance.abs() <= EPS {
        return polygon.to_vec();
    }
    if is_axis_aligned_rect(polygon) {
        let (min_x, min_y, max_x, max_y) = bounds(polygon);
        return rect(
            min_x - distance,
            min_y - distance,
            (max_x - min_x) + 2.0 * distance,
            (max_y - min_y) + 2.0 * distance,
        );
    }
    let (cx, cy) = centroid(polygon);
    polygon
        .iter()
        .map(|&(x, y)| {
            let dx = x - cx;
            let dy = y - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > EPS {
                let scale = ((dist + distance) / dist).max(0.0);
                (cx + dx * scale, cy + dy * scale)
            } else {
                (x, y)
            }
        })
        .collect()
}

/// Returns true for a 4-vertex axis-aligned rectangle.
pub fn is_axis_aligned_rect(polygon: &[(f64, f64)]) -> bool {
    if polygon.len() != 4 {
        return false;
    }
    for i in 0..4 {
        let (x1, y1) = polygon[i];
        let (x2, y2) = polygon[(i + 1) % 4];
        if (x1 - x2).abs() > EPS && (y1 - y2).abs() > EPS {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_area_centroid() {
        let r = rect(1.0, 2.0, 4.0, 3.0);
        assert_relative_eq!(area(&r), 12.0, epsilon = 1e-9);
        let (cx, cy) = centroid(&r);
        assert_relative_eq!(cx, 3.0, epsilon = 1e-9);
        assert_relative_eq!(cy, 3.5, epsilon = 1e-9);
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(contains_point(&r, (5.0, 5.0)));
        assert!(contains_point(&r, (0.0, 0.0))); // corner counts
        assert!(contains_point(&r, (10.0, 5.0))); // edge counts
        assert!(!contains_point(&r, (10.1, 5.0)));
    }

    #[test]
    fn test_contains_polygon() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        assert!(contains_polygon(&outer, &rect(1.0, 1.0, 3.0, 3.0)));
        assert!(contains_polygon(&outer, &rect(0.0, 0.0, 10.0, 10.0)));
        assert!(!contains_polygon(&outer, &rect(8.0, 8.0, 3.0, 3.0)));
    }

    #[test]
    fn test_l_shape_containment_uses_area() {
        // Vertex containment alone would wrongly accept a rectangle
        // spanning the notch of an L.
        let l = vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (4.0, 4.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ];
        let spanning = rect(1.0, 1.0, 8.0, 8.0);
        assert!(!contains_polygon(&l, &spanning));
        assert!(contains_polygon(&l, &rect(1.0, 1.0, 2.0, 8.0)));
    }

    #[test]
    fn test_overlap_area() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 2.0, 4.0, 4.0);
        assert_relative_eq!(overlap_area(&a, &b), 4.0, epsilon = 1e-6);
        assert!(overlaps(&a, &b));

        let c = rect(10.0, 10.0, 1.0, 1.0);
        assert_relative_eq!(overlap_area(&a, &c), 0.0);
        assert!(!overlaps(&a, &c));

        // Touching edges share no area.
        let d = rect(4.0, 0.0, 4.0, 4.0);
        assert!(!overlaps(&a, &d));
    }

    #[test]
    fn test_difference_and_intersection_partition() {
        let outer = rect(0.0, 0.0, 10.0, 8.0);
        let strip = rect(0.0, 0.0, 4.0, 8.0);
        let inter: f64 = intersection(&outer, &strip).iter().map(|p| area(p)).sum();
        let diff: f64 = difference(&outer, &strip).iter().map(|p| area(p)).sum();
        assert_relative_eq!(inter, 32.0, epsilon = 1e-6);
        assert_relative_eq!(diff, 48.0, epsilon = 1e-6);
        assert_relative_eq!(inter + diff, area(&outer), epsilon = 1e-6);
    }

    #[test]
    fn test_union_area() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 0.0, 4.0, 4.0);
        let u: f64 = union(&a, &b).iter().map(|p| area(p)).sum();
        assert_relative_eq!(u, 24.0, epsilon = 1e-6);
    }

    #[test]
    fn test_min_distance() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(5.0, 0.0, 2.0, 2.0);
        assert_relative_eq!(min_distance(&a, &b), 3.0, epsilon = 1e-9);

        let c = rect(1.0, 1.0, 2.0, 2.0);
        assert_relative_eq!(min_distance(&a, &c), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_boundary_distance() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 3.0, 2.0, 2.0);
        // Nearest wall is x = 0, two meters away.
        assert_relative_eq!(boundary_distance(&outer, &inner), 2.0, epsilon = 1e-9);

        let flush = rect(0.0, 3.0, 2.0, 2.0);
        assert_relative_eq!(boundary_distance(&outer, &flush), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_buffer_rect_exact() {
        let r = rect(2.0, 2.0, 2.0, 1.0);
        let buffered = buffer(&r, 0.5);
        assert_relative_eq!(area(&buffered), 3.0 * 2.0, epsilon = 1e-9);
        let (min_x, min_y, max_x, max_y) = bounds(&buffered);
        assert_relative_eq!(min_x, 1.5);
        assert_relative_eq!(min_y, 1.5);
        assert_relative_eq!(max_x, 4.5);
        assert_relative_eq!(max_y, 3.5);
    }

    #[test]
    fn test_is_simple() {
        assert!(is_simple(&rect(0.0, 0.0, 1.0, 1.0)));
        // Bowtie.
        let bowtie = vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)];
        assert!(!is_simple(&bowtie));
        assert!(validate_simple(&bowtie).is_err());
        assert!(validate_simple(&[(0.0, 0.0), (1.0, 0.0)]).is_err());
    }
}
