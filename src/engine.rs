//! # Narrative Facade
//!
//! Wires the four components together: a configured narrative derives one
//! [`FrameState`] per progress value, with groups and waypoint thresholds
//! computed once at construction. Feeding a recorded sequence of progress
//! values replays deterministically, which is how the derivation is tested.

use crate::groups::{MediaGroup, build_groups, group_containing};
use crate::progress::group_progress_shared;
use crate::route::{RouteError, RoutePolyline, reveal_mask, validate_waypoints};
use crate::steps::{ActivationPolicy, active_step};
use crate::{RoutePoint, clamp_progress};

/// Everything a rendering collaborator needs for one progress value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    /// The input progress after clamping to `[0, 1]`.
    pub progress: f64,
    /// Active step index; `None` when the narrative has no steps.
    pub active_step: Option<usize>,
    /// Index of the media group containing the active step.
    pub active_group: Option<usize>,
    /// Progress local to the active group (shared-signal remapping).
    pub group_progress: f64,
    /// Arc-length prefix of the route polyline; empty while no geometry has
    /// arrived from the provider.
    pub sliced_route: Vec<RoutePoint>,
    /// Per-waypoint visibility; empty without a route.
    pub waypoint_reveals: Vec<bool>,
}

#[derive(Debug)]
struct NarrativeRoute {
    polyline: RoutePolyline,
    thresholds: Vec<f64>,
}

/// A configured narrative: per-step media keys, an activation policy, and
/// optionally a validated route.
///
/// Groups and waypoint thresholds are derived once here; [`frame`] is then a
/// pure function of the latest progress value, so out-of-order or repeated
/// delivery of updates is harmless — the most recent value wins.
///
/// [`frame`]: Narrative::frame
#[derive(Debug)]
pub struct Narrative<K> {
    groups: Vec<MediaGroup<K>>,
    step_count: usize,
    policy: ActivationPolicy,
    route: Option<NarrativeRoute>,
}

impl<K: PartialEq + Clone> Narrative<K> {
    /// Configure a narrative from one media key per step.
    pub fn new(step_keys: Vec<K>, policy: ActivationPolicy) -> Self {
        let step_count = step_keys.len();
        let groups = build_groups(step_count, |i| step_keys[i].clone());
        Self {
            groups,
            step_count,
            policy,
            route: None,
        }
    }

    /// Attach route geometry: the provider's sampled polyline plus the
    /// caller's waypoints. Waypoints are validated; thresholds are computed
    /// immediately.
    pub fn with_route(
        mut self,
        polyline: Vec<RoutePoint>,
        waypoints: &[RoutePoint],
    ) -> Result<Self, RouteError> {
        let waypoints = validate_waypoints(waypoints)?;
        let polyline = RoutePolyline::new(polyline);
        let thresholds = polyline.waypoint_thresholds(&waypoints);
        self.route = Some(NarrativeRoute { polyline, thresholds });
        Ok(self)
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// The media groups, in step order.
    pub fn groups(&self) -> &[MediaGroup<K>] {
        &self.groups
    }

    /// The waypoint reveal thresholds, when a route is attached.
    pub fn thresholds(&self) -> Option<&[f64]> {
        self.route.as_ref().map(|r| r.thresholds.as_slice())
    }

    /// Derive the full frame state for one progress value.
    pub fn frame(&self, progress: f64) -> FrameState {
        let p = clamp_progress(progress);
        let step = active_step(p, self.step_count, self.policy);
        let group_index = step.and_then(|s| group_containing(&self.groups, s));
        let group_progress = group_index
            .map(|gi| group_progress_shared(p, &self.groups[gi], self.step_count))
            .unwrap_or(0.0);

        let (sliced_route, waypoint_reveals) = match &self.route {
            Some(route) => (
                route.polyline.slice_by_progress(p),
                reveal_mask(p, &route.thresholds),
            ),
            None => (Vec::new(), Vec::new()),
        };

        FrameState {
            progress: p,
            active_step: step,
            active_group: group_index,
            group_progress,
            sliced_route,
            waypoint_reveals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo_narrative() -> Narrative<&'static str> {
        let polyline: Vec<RoutePoint> =
            (0..=10).map(|i| RoutePoint::new(0.0, i as f64)).collect();
        let waypoints = vec![
            RoutePoint::new(0.0, 0.0),
            RoutePoint::new(0.0, 5.0),
            RoutePoint::new(0.0, 10.0),
        ];
        Narrative::new(
            vec!["start", "middle", "end"],
            ActivationPolicy::SectionLinear,
        )
        .with_route(polyline, &waypoints)
        .unwrap()
    }

    #[test]
    fn test_frame_without_route() {
        let narrative = Narrative::new(vec!["a", "a", "b"], ActivationPolicy::SectionLinear);
        let frame = narrative.frame(0.6);

        assert_eq!(frame.active_step, Some(1));
        assert_eq!(frame.active_group, Some(0));
        assert!(frame.sliced_route.is_empty());
        assert!(frame.waypoint_reveals.is_empty());
    }

    #[test]
    fn test_frame_with_route() {
        let narrative = geo_narrative();
        assert_eq!(narrative.thresholds().unwrap(), &[0.0, 0.5, 1.0]);

        let frame = narrative.frame(0.5);
        assert_eq!(frame.active_step, Some(1));
        assert_eq!(frame.waypoint_reveals, vec![true, true, false]);
        // Half the arc length is covered at p = 0.5.
        let tip = frame.sliced_route.last().unwrap();
        assert!((tip.latitude - 5.0).abs() < 1e-9);

        let done = narrative.frame(1.0);
        assert_eq!(done.active_step, Some(2));
        assert_eq!(done.waypoint_reveals, vec![true, true, true]);
        assert_eq!(done.sliced_route.len(), 11);
    }

    #[test]
    fn test_frame_empty_narrative() {
        let narrative: Narrative<&str> = Narrative::new(vec![], ActivationPolicy::EqualShare);
        let frame = narrative.frame(0.4);
        assert_eq!(frame.active_step, None);
        assert_eq!(frame.active_group, None);
        assert_eq!(frame.group_progress, 0.0);
    }

    #[test]
    fn test_with_route_rejects_bad_waypoints() {
        let result = Narrative::new(vec!["a"], ActivationPolicy::SectionLinear)
            .with_route(Vec::new(), &[RoutePoint::new(0.0, 0.0)]);
        assert!(matches!(
            result,
            Err(RouteError::WaypointCount { count: 1 })
        ));
    }

    #[test]
    fn test_route_absent_data_defers() {
        // Waypoints known, polyline not yet delivered: thresholds fall back
        // to all zeros and there is nothing to slice.
        let waypoints = vec![RoutePoint::new(0.0, 0.0), RoutePoint::new(0.0, 10.0)];
        let narrative = Narrative::new(vec!["a", "b"], ActivationPolicy::SectionLinear)
            .with_route(Vec::new(), &waypoints)
            .unwrap();

        let frame = narrative.frame(0.5);
        assert!(frame.sliced_route.is_empty());
        assert_eq!(frame.waypoint_reveals, vec![true, true]);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let narrative = geo_narrative();
        let recorded = [0.0, 0.13, 0.5, 0.48, 0.77, 0.77, 1.0, 0.2];

        let first: Vec<FrameState> = recorded.iter().map(|&p| narrative.frame(p)).collect();
        let second: Vec<FrameState> = recorded.iter().map(|&p| narrative.frame(p)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_frame_clamps_progress() {
        let narrative = geo_narrative();
        assert_eq!(narrative.frame(-2.0), narrative.frame(0.0));
        assert_eq!(narrative.frame(3.0), narrative.frame(1.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_frame_state_serde_round_trip() {
        let narrative = geo_narrative();
        let frame = narrative.frame(0.5);

        let json = serde_json::to_string(&frame).unwrap();
        let back: FrameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
