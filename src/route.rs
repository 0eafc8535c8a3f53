//! # Route Geometry Engine
//!
//! Arc-length slicing of a sampled route polyline and waypoint reveal
//! thresholds, both pure functions of an immutable [`RoutePolyline`].
//!
//! The polyline comes from an external geometry provider and approximates
//! the path between the caller's 2–25 waypoints; it may be absent or empty,
//! which the engine treats as "nothing to slice", never as a failure. The
//! cumulative arc-length table is computed once at construction and reused
//! by both operations.

use log::debug;
use thiserror::Error;

use crate::geometry::{cumulative_lengths, lerp_point, planar_distance, project_onto_segment};
use crate::{RoutePoint, clamp_progress};

/// Minimum number of waypoints a route may carry.
pub const MIN_WAYPOINTS: usize = 2;
/// Maximum number of waypoints a route may carry.
pub const MAX_WAYPOINTS: usize = 25;

/// Why a waypoint list was rejected.
///
/// Validation is all-or-nothing: a rejected list produces no geometry at
/// all, and the error never propagates as a panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("waypoint count out of bounds: got {count}, expected {MIN_WAYPOINTS}..={MAX_WAYPOINTS}")]
    WaypointCount { count: usize },

    #[error("coordinate out of range at index {index}: ({longitude}, {latitude})")]
    CoordinateOutOfRange {
        index: usize,
        longitude: f64,
        latitude: f64,
    },

    #[error("malformed coordinate at index {index}: expected a [longitude, latitude] pair, got {len} components")]
    MalformedCoordinate { index: usize, len: usize },
}

/// Validate a waypoint list: count within bounds, every coordinate finite
/// and in range. Returns the normalized list or a descriptive error.
pub fn validate_waypoints(waypoints: &[RoutePoint]) -> Result<Vec<RoutePoint>, RouteError> {
    if waypoints.len() < MIN_WAYPOINTS || waypoints.len() > MAX_WAYPOINTS {
        let err = RouteError::WaypointCount { count: waypoints.len() };
        debug!("waypoint validation failed: {err}");
        return Err(err);
    }

    for (index, p) in waypoints.iter().enumerate() {
        if !p.is_valid() {
            let err = RouteError::CoordinateOutOfRange {
                index,
                longitude: p.longitude,
                latitude: p.latitude,
            };
            debug!("waypoint validation failed: {err}");
            return Err(err);
        }
    }

    Ok(waypoints.to_vec())
}

/// Parse waypoints from loose float pairs, as delivered by callers holding
/// deserialized JSON (`[[lng, lat], ...]`).
///
/// A slice that is not exactly two components long is a malformed
/// coordinate; otherwise validation is the same as [`validate_waypoints`].
///
/// # Example
///
/// ```rust
/// use scrolly_engine::{parse_waypoints, RouteError};
///
/// let waypoints = parse_waypoints(&[[0.0, 0.0], [0.0, 10.0]]).unwrap();
/// assert_eq!(waypoints.len(), 2);
///
/// let err = parse_waypoints(&[vec![0.0, 0.0], vec![1.0]]).unwrap_err();
/// assert_eq!(err, RouteError::MalformedCoordinate { index: 1, len: 1 });
/// ```
pub fn parse_waypoints<T: AsRef<[f64]>>(raw: &[T]) -> Result<Vec<RoutePoint>, RouteError> {
    let mut points = Vec::with_capacity(raw.len());
    for (index, pair) in raw.iter().enumerate() {
        let pair = pair.as_ref();
        if pair.len() != 2 {
            let err = RouteError::MalformedCoordinate { index, len: pair.len() };
            debug!("waypoint validation failed: {err}");
            return Err(err);
        }
        points.push(RoutePoint::new(pair[0], pair[1]));
    }
    validate_waypoints(&points)
}

/// A sampled route polyline with its cumulative arc-length table.
///
/// The table is derived once at construction; both engine operations read
/// it. An empty polyline is legal and models "no data from the provider
/// yet": it slices to nothing and forces the degenerate threshold fallback.
#[derive(Debug, Clone)]
pub struct RoutePolyline {
    points: Vec<RoutePoint>,
    cumulative: Vec<f64>,
    total_length: f64,
}

impl RoutePolyline {
    /// Build a polyline, computing its arc-length table.
    pub fn new(points: Vec<RoutePoint>) -> Self {
        let (cumulative, total_length) = cumulative_lengths(&points);
        Self {
            points,
            cumulative,
            total_length,
        }
    }

    /// The sampled points, in order.
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no geometry has been supplied.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total planar arc length.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Arc length accumulated up to and including each point.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// The prefix of the polyline covering `progress` of its arc length.
    ///
    /// - `progress <= 0` → just the first point;
    /// - `progress >= 1` → the full polyline;
    /// - zero total length (all points coincide) → just the first point;
    /// - empty polyline → empty.
    ///
    /// Otherwise the cut lands exactly at `progress * total_length` along
    /// the path, linearly interpolated within the segment it falls in; every
    /// fully traversed point is included before it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scrolly_engine::{RoutePoint, RoutePolyline};
    ///
    /// let polyline = RoutePolyline::new(vec![
    ///     RoutePoint::new(0.0, 0.0),
    ///     RoutePoint::new(0.0, 3.0),
    ///     RoutePoint::new(0.0, 10.0),
    /// ]);
    ///
    /// // Segment lengths 3 and 7; half the total length cuts at latitude 5.
    /// let sliced = polyline.slice_by_progress(0.5);
    /// assert_eq!(sliced.len(), 3);
    /// assert!((sliced[2].latitude - 5.0).abs() < 1e-9);
    /// assert_eq!(sliced[2].longitude, 0.0);
    /// ```
    pub fn slice_by_progress(&self, progress: f64) -> Vec<RoutePoint> {
        if self.points.is_empty() {
            return Vec::new();
        }

        let p = clamp_progress(progress);
        if p <= 0.0 {
            return vec![self.points[0]];
        }
        if p >= 1.0 {
            return self.points.clone();
        }
        if self.total_length <= 0.0 || !self.total_length.is_finite() {
            return vec![self.points[0]];
        }

        let target = self.total_length * p;
        let mut traveled = 0.0;
        let mut sliced = vec![self.points[0]];

        for window in self.points.windows(2) {
            let segment = planar_distance(&window[0], &window[1]);
            if traveled + segment >= target {
                if segment > 0.0 {
                    let ratio = (target - traveled) / segment;
                    sliced.push(lerp_point(&window[0], &window[1], ratio));
                } else {
                    sliced.push(window[1]);
                }
                return sliced;
            }
            traveled += segment;
            sliced.push(window[1]);
        }

        sliced
    }

    /// Fractional arc-length positions at which each waypoint is revealed.
    ///
    /// Each waypoint is projected onto its nearest polyline segment. The
    /// search runs forward-only from the previous waypoint's winning segment
    /// index: waypoints are assumed to occur in path order, which bounds the
    /// whole assignment to one linear pass over the polyline instead of one
    /// pass per waypoint. The projection's arc-length position, as a
    /// fraction of total length, is the threshold.
    ///
    /// The first threshold is force-set to 0 and the last to 1, overriding
    /// the search: the first waypoint reveals immediately, the last only at
    /// full completion, regardless of geometric noise near the ends.
    ///
    /// Degenerate fallbacks:
    /// - empty waypoints → empty;
    /// - empty polyline → all zeros;
    /// - zero or non-finite total length → 0 for the first waypoint, 1 for
    ///   every other (binary reveal, no gradation).
    pub fn waypoint_thresholds(&self, waypoints: &[RoutePoint]) -> Vec<f64> {
        if waypoints.is_empty() {
            return Vec::new();
        }
        if self.points.is_empty() {
            return vec![0.0; waypoints.len()];
        }
        if self.total_length <= 0.0 || !self.total_length.is_finite() {
            return (0..waypoints.len())
                .map(|i| if i == 0 { 0.0 } else { 1.0 })
                .collect();
        }

        let last_segment = self.points.len() - 2;
        let mut thresholds = Vec::with_capacity(waypoints.len());
        let mut window_start = 0_usize;

        for (wi, waypoint) in waypoints.iter().enumerate() {
            let mut best_segment = window_start;
            let mut best_t = 0.0;
            let mut best_dist = f64::INFINITY;
            for i in window_start..=last_segment {
                let (t, d) = project_onto_segment(waypoint, &self.points[i], &self.points[i + 1]);
                if d < best_dist {
                    best_dist = d;
                    best_segment = i;
                    best_t = t;
                }
            }

            // The forward window silently mis-assigns waypoints supplied out
            // of path order; flag that without changing the result.
            if window_start > 0 && log::log_enabled!(log::Level::Debug) {
                let closer_behind = (0..window_start).any(|i| {
                    let (_, d) =
                        project_onto_segment(waypoint, &self.points[i], &self.points[i + 1]);
                    d < best_dist
                });
                if closer_behind {
                    debug!(
                        "waypoint {wi} is nearer to the polyline before segment {window_start}; \
                         keeping the windowed match at segment {best_segment}"
                    );
                }
            }

            window_start = best_segment;
            let segment_length = self.cumulative[best_segment + 1] - self.cumulative[best_segment];
            let along = self.cumulative[best_segment] + best_t * segment_length;
            thresholds.push(along / self.total_length);
        }

        thresholds[0] = 0.0;
        let last = thresholds.len() - 1;
        thresholds[last] = 1.0;

        thresholds
    }
}

/// Per-waypoint visibility at the given progress: revealed once clamped
/// progress reaches the waypoint's threshold.
pub fn reveal_mask(progress: f64, thresholds: &[f64]) -> Vec<bool> {
    let p = clamp_progress(progress);
    thresholds.iter().map(|&t| p >= t).collect()
}
