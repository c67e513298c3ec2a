//! Polygon simplification and moment centroiding.
//!
//! A traced contour is reduced to a coarse closed polygon with
//! Ramer-Douglas-Peucker elimination, then located by its area-weighted
//! centroid from the polygon's raw image moments.

use super::contour::Point;
use itertools::Itertools;

/// Perpendicular distance from `p` to the infinite line through `a` and
/// `b`; falls back to point distance when the segment is degenerate.
fn line_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let vx = (b.x - a.x) as f64;
    let vy = (b.y - a.y) as f64;
    let length = (vx * vx + vy * vy).sqrt();
    if length == 0.0 {
        return p.distance(a);
    }
    let wx = (p.x - a.x) as f64;
    let wy = (p.y - a.y) as f64;
    (vx * wy - vy * wx).abs() / length
}

/// Recursive Douglas-Peucker over an open chain; keeps both endpoints.
fn rdp_open(points: &[Point], epsilon: f64, out: &mut Vec<Point>) {
    let last = points.len() - 1;
    if last < 2 {
        out.push(points[last]);
        return;
    }

    let (split, max_dist) = points[1..last]
        .iter()
        .enumerate()
        .map(|(k, p)| (k + 1, line_distance(p, &points[0], &points[last])))
        .fold((0, 0.0), |best, cand| if cand.1 > best.1 { cand } else { best });

    if max_dist > epsilon {
        rdp_open(&points[..=split], epsilon, out);
        rdp_open(&points[split..], epsilon, out);
    } else {
        out.push(points[last]);
    }
}

/// Simplify a closed contour to a coarse polygon.
///
/// `epsilon` is the distance tolerance in pixels; the pipeline derives it
/// as a fraction of the contour perimeter so that tolerance scales with
/// the blob. The closed curve is split at its two mutually farthest
/// anchor points and each half is simplified independently.
pub fn approx_polygon(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // anchor at index 0 and the point farthest from it
    let far = points
        .iter()
        .enumerate()
        .map(|(k, p)| (k, p.distance(&points[0])))
        .fold((0, 0.0), |best, cand| if cand.1 > best.1 { cand } else { best })
        .0;
    if far == 0 {
        // all points coincide
        return vec![points[0]];
    }

    let mut first_half = Vec::new();
    first_half.push(points[0]);
    rdp_open(&points[..=far], epsilon, &mut first_half);

    // wrap the tail back around to the anchor
    let mut tail: Vec<Point> = points[far..].to_vec();
    tail.push(points[0]);
    let mut second_half = Vec::new();
    rdp_open(&tail, epsilon, &mut second_half);

    // drop the duplicated closing anchor
    second_half.pop();
    first_half.extend(second_half);
    first_half
}

/// Raw image moments of a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// Zeroth and first raw moments via Green's theorem over the closed
/// polygon. Signs follow traversal orientation; the centroid ratio is
/// orientation-independent.
pub fn raw_moments(points: &[Point]) -> RawMoments {
    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;

    for (a, b) in points.iter().circular_tuple_windows() {
        let cross = (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64);
        m00 += cross;
        m10 += cross * (a.x + b.x) as f64;
        m01 += cross * (a.y + b.y) as f64;
    }

    RawMoments {
        m00: m00 / 2.0,
        m10: m10 / 6.0,
        m01: m01 / 6.0,
    }
}

/// Area-weighted centroid of a closed polygon.
///
/// cx = m10 / (m00 + eps), cy = m01 / (m00 + eps) with eps = 1e-5, so a
/// zero-area polygon never divides by zero; it instead collapses toward
/// the origin, which is accepted behavior for the degenerate case.
pub fn centroid(points: &[Point]) -> Point {
    const EPS: f64 = 1e-5;
    let m = raw_moments(points);
    Point::new(
        (m.m10 / (m.m00 + EPS)).round() as i32,
        (m.m01 / (m.m00 + EPS)).round() as i32,
    )
}
