//! # Planar Geometry Utilities
//!
//! Low-level geometry used by the route engine. All distances are planar
//! Euclidean distances on raw (longitude, latitude) pairs — the sampled
//! polylines this crate consumes are short enough, and the consumer (a reveal
//! threshold, a slice ratio) dimensionless enough, that geodesic correction
//! buys nothing.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`planar_distance`] | Euclidean distance between two points |
//! | [`polyline_length`] | Total length of a polyline |
//! | [`cumulative_lengths`] | Arc length accumulated up to each index |
//! | [`lerp_point`] | Linear interpolation between two points |
//! | [`project_onto_segment`] | Nearest point on a segment to a query point |
//!
//! ## Example
//!
//! ```rust
//! use scrolly_engine::RoutePoint;
//! use scrolly_engine::geometry;
//!
//! let polyline = vec![
//!     RoutePoint::new(0.0, 0.0),
//!     RoutePoint::new(0.0, 3.0),
//!     RoutePoint::new(0.0, 10.0),
//! ];
//!
//! assert_eq!(geometry::polyline_length(&polyline), 10.0);
//!
//! let (table, total) = geometry::cumulative_lengths(&polyline);
//! assert_eq!(table, vec![0.0, 3.0, 10.0]);
//! assert_eq!(total, 10.0);
//! ```

use geo::{Distance, Euclidean, Point};

use crate::RoutePoint;

/// Euclidean distance between two points on the lon/lat plane.
///
/// # Example
///
/// ```rust
/// use scrolly_engine::RoutePoint;
/// use scrolly_engine::geometry::planar_distance;
///
/// let a = RoutePoint::new(0.0, 0.0);
/// let b = RoutePoint::new(3.0, 4.0);
/// assert_eq!(planar_distance(&a, &b), 5.0);
/// ```
#[inline]
pub fn planar_distance(a: &RoutePoint, b: &RoutePoint) -> f64 {
    let p1 = Point::new(a.longitude, a.latitude);
    let p2 = Point::new(b.longitude, b.latitude);
    Euclidean::distance(p1, p2)
}

/// Total length of a polyline. Empty or single-point input returns 0.
pub fn polyline_length(points: &[RoutePoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| planar_distance(&w[0], &w[1]))
        .sum()
}

/// Arc length accumulated from index 0 up to and including each index, plus
/// the total length.
///
/// The table has one entry per point; entry 0 is always 0. Empty input
/// yields an empty table and total 0.
pub fn cumulative_lengths(points: &[RoutePoint]) -> (Vec<f64>, f64) {
    if points.is_empty() {
        return (Vec::new(), 0.0);
    }

    let mut table = Vec::with_capacity(points.len());
    table.push(0.0);

    let mut total = 0.0;
    for w in points.windows(2) {
        total += planar_distance(&w[0], &w[1]);
        table.push(total);
    }

    (table, total)
}

/// Linearly interpolate between two points.
///
/// `ratio` is the fraction of the way from `a` to `b`; 0 yields `a`, 1
/// yields `b`. Callers pass ratios in `[0, 1]`; values outside extrapolate.
#[inline]
pub fn lerp_point(a: &RoutePoint, b: &RoutePoint, ratio: f64) -> RoutePoint {
    RoutePoint::new(
        a.longitude + ratio * (b.longitude - a.longitude),
        a.latitude + ratio * (b.latitude - a.latitude),
    )
}

/// Project a point onto a segment, clamped to the segment's extent.
///
/// Returns `(t, distance)`: `t` is the fraction along the segment from `a`
/// to `b` of the nearest point (0 at `a`, 1 at `b`), `distance` the planar
/// distance from `p` to that nearest point. A zero-length segment projects
/// to `a` with `t = 0`.
pub fn project_onto_segment(p: &RoutePoint, a: &RoutePoint, b: &RoutePoint) -> (f64, f64) {
    let dx = b.longitude - a.longitude;
    let dy = b.latitude - a.latitude;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return (0.0, planar_distance(p, a));
    }

    let t = (((p.longitude - a.longitude) * dx + (p.latitude - a.latitude) * dy) / len_sq)
        .clamp(0.0, 1.0);
    let nearest = lerp_point(a, b, t);
    (t, planar_distance(p, &nearest))
}

// =============================================================================
// Unit Tests
// =============================================================================
