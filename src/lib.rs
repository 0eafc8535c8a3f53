//! # Scrolly Engine
//!
//! Scroll-progress state derivation for scroll-synchronized narrative widgets.
//!
//! This library turns a single continuous progress scalar (scroll position or
//! a playback clock, normalized by the caller's observer) into the discrete
//! state a narrative widget renders from:
//!
//! - an active step index ([`active_step`])
//! - a partition of steps into contiguous media groups ([`build_groups`])
//! - a progress scalar local to one group ([`group_progress_shared`],
//!   [`group_progress_independent`])
//! - an arc-length slice of a route polyline and monotonic waypoint reveal
//!   thresholds ([`RoutePolyline`])
//!
//! Everything is a pure, synchronous function of its inputs; the only cached
//! state is derived at construction time (the cumulative-length table inside
//! [`RoutePolyline`], the groups and thresholds inside [`Narrative`]).
//!
//! ## Features
//!
//! - **`serde`** - Enable serde derives on state and output types
//!
//! ## Quick Start
//!
//! ```rust
//! use scrolly_engine::{build_groups, active_step, group_progress_shared, ActivationPolicy};
//!
//! // Four steps, the first two sharing one visual panel.
//! let keys = ["intro", "intro", "climb", "summit"];
//! let groups = build_groups(keys.len(), |i| keys[i]);
//! assert_eq!(groups.len(), 3);
//!
//! // Halfway through the section, step 1 is active...
//! let step = active_step(0.5, 4, ActivationPolicy::SectionLinear).unwrap();
//! assert_eq!(step, 1);
//!
//! // ...and the "intro" group is fully played out.
//! let local = group_progress_shared(0.5, &groups[0], 4);
//! assert_eq!(local, 1.0);
//! ```

// Step activation
pub mod steps;
pub use steps::{ActivationPolicy, StepTracker, active_step};

// Media grouping
pub mod groups;
pub use groups::{MediaGroup, build_groups, group_containing};

// Group-local progress remapping
pub mod progress;
pub use progress::{group_progress_independent, group_progress_shared};

// Planar geometry helpers
pub mod geometry;

// Route slicing and waypoint thresholds
pub mod route;
pub use route::{
    MAX_WAYPOINTS, MIN_WAYPOINTS, RouteError, RoutePolyline, parse_waypoints, reveal_mask,
    validate_waypoints,
};

// Integrative facade
pub mod engine;
pub use engine::{FrameState, Narrative};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate as an ordered (longitude, latitude) pair.
///
/// # Example
/// ```
/// use scrolly_engine::RoutePoint;
/// let point = RoutePoint::new(-0.1278, 51.5074); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl RoutePoint {
    /// Create a new point from a (longitude, latitude) pair.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Check that both components are finite and within their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.latitude >= -90.0
            && self.latitude <= 90.0
    }
}

/// Bounding box of a set of route points.
///
/// Supplied to the rendering collaborator so it can fit its camera to the
/// route; the core itself never consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Compute bounds from a point set. Returns `None` for empty input.
    pub fn from_points(points: &[RoutePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;

        for p in points {
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
        }

        Some(Self { min_lng, max_lng, min_lat, max_lat })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> RoutePoint {
        RoutePoint::new(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

/// Clamp a raw progress value to `[0, 1]`.
///
/// Every scalar crossing the crate boundary is clamped before use; upstream
/// observers may overshoot in either direction near section edges.
///
/// NaN clamps to 0.
#[inline]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_point_validation() {
        assert!(RoutePoint::new(-0.1278, 51.5074).is_valid());
        assert!(!RoutePoint::new(0.0, 91.0).is_valid());
        assert!(!RoutePoint::new(181.0, 0.0).is_valid());
        assert!(!RoutePoint::new(f64::NAN, 0.0).is_valid());
        assert!(!RoutePoint::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(0.25), 0.25);
        assert_eq!(clamp_progress(1.5), 1.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            RoutePoint::new(-0.13, 51.50),
            RoutePoint::new(-0.12, 51.51),
            RoutePoint::new(-0.125, 51.505),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.min_lng, -0.13);
        assert_eq!(bounds.max_lng, -0.12);
        assert_eq!(bounds.min_lat, 51.50);
        assert_eq!(bounds.max_lat, 51.51);

        let center = bounds.center();
        assert!((center.longitude - (-0.125)).abs() < 1e-12);
        assert!((center.latitude - 51.505).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    // Four steps, two panels, driven by a swept progress value: the whole
    // step/group/progress stack stays consistent at every sample.
    #[test]
    fn test_step_group_progress_pipeline() {
        let groups = build_groups(4, |i| if i < 2 { "a" } else { "b" });
        assert_eq!(groups.len(), 2);

        for i in 0..=10 {
            let p = i as f64 / 10.0;
            let step = active_step(p, 4, ActivationPolicy::SectionLinear).unwrap();
            let gi = group_containing(&groups, step).unwrap();
            let local = group_progress_shared(p, &groups[gi], 4);
            assert!((0.0..=1.0).contains(&local));
        }
    }

    #[test]
    fn test_zero_steps_yields_nothing() {
        assert_eq!(active_step(0.5, 0, ActivationPolicy::SectionLinear), None);
        assert_eq!(active_step(0.5, 0, ActivationPolicy::EqualShare), None);
        let groups = build_groups(0, |_| "x");
        assert!(groups.is_empty());
    }
}
