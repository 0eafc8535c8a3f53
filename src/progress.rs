//! # Group-Local Progress
//!
//! Remaps overall section progress into a scalar local to one media group:
//! 0 as the group is entered, 1 as it is exited. Two remapping strategies
//! exist because two driving models exist, and their boundary behavior is
//! not equivalent:
//!
//! - [`group_progress_shared`] — one continuous signal drives the whole
//!   section; the group's window of that signal is rescaled.
//! - [`group_progress_independent`] — each step is watched by its own
//!   observer reporting a per-step local scalar, possibly stale; the group
//!   scalar is combined from whatever the members last reported.
//!
//! Keep them separate. Unifying them would silently change what happens at
//! group boundaries.

use std::collections::HashMap;

use crate::clamp_progress;
use crate::groups::MediaGroup;

/// Group-local progress under a single shared section-wide signal.
///
/// Rescales: `(p * step_count - start_index) / group_size`, clamped to
/// `[0, 1]`. Monotonically non-decreasing in `overall_progress` for a fixed
/// group and step count.
///
/// # Example
///
/// ```rust
/// use scrolly_engine::{build_groups, group_progress_shared};
///
/// let groups = build_groups(4, |i| if i < 2 { "a" } else { "b" });
///
/// // Entering the second group at p = 0.5, leaving it at p = 1.
/// assert_eq!(group_progress_shared(0.5, &groups[1], 4), 0.0);
/// assert_eq!(group_progress_shared(0.75, &groups[1], 4), 0.5);
/// assert_eq!(group_progress_shared(1.0, &groups[1], 4), 1.0);
/// ```
pub fn group_progress_shared<K>(
    overall_progress: f64,
    group: &MediaGroup<K>,
    step_count: usize,
) -> f64 {
    let scaled = clamp_progress(overall_progress) * step_count as f64;
    let group_size = group.len().max(1) as f64;
    ((scaled - group.start_index as f64) / group_size).clamp(0.0, 1.0)
}

/// Group-local progress combined from independently observed members.
///
/// `member_progress` maps a step index to the latest local scalar its
/// observer reported; absent steps count as 0. For each member in order, the
/// candidate value is `(offset_within_group + member_local) / group_size`;
/// the result is the maximum candidate, clamped to `[0, 1]`.
///
/// Members reporting exactly 0 are skipped, except the first: a zero from a
/// later member is indistinguishable from an observer that has not fired
/// yet, and must not drag the group back below what an earlier member
/// already established.
pub fn group_progress_independent<K>(
    group: &MediaGroup<K>,
    member_progress: &HashMap<usize, f64>,
) -> f64 {
    let group_size = group.len().max(1) as f64;
    let mut combined = 0.0_f64;

    for (offset, step) in group.member_indices.iter().enumerate() {
        let local = clamp_progress(member_progress.get(step).copied().unwrap_or(0.0));
        if local == 0.0 && offset != 0 {
            continue;
        }
        combined = combined.max((offset as f64 + local) / group_size);
    }

    combined.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::build_groups;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_shared_rescale() {
        let groups = build_groups(4, |i| if i < 2 { "a" } else { "b" });

        // First group spans p in [0, 0.5].
        assert_eq!(group_progress_shared(0.0, &groups[0], 4), 0.0);
        assert!(approx_eq(group_progress_shared(0.25, &groups[0], 4), 0.5, 1e-12));
        assert_eq!(group_progress_shared(0.5, &groups[0], 4), 1.0);
        assert_eq!(group_progress_shared(0.9, &groups[0], 4), 1.0);

        // Second group spans p in [0.5, 1].
        assert_eq!(group_progress_shared(0.3, &groups[1], 4), 0.0);
        assert!(approx_eq(group_progress_shared(0.75, &groups[1], 4), 0.5, 1e-12));
        assert_eq!(group_progress_shared(1.0, &groups[1], 4), 1.0);
    }

    #[test]
    fn test_shared_monotonic() {
        let groups = build_groups(5, |i| i / 2);
        for group in &groups {
            let mut last = 0.0;
            for i in 0..=100 {
                let p = i as f64 / 100.0;
                let local = group_progress_shared(p, group, 5);
                assert!(local >= last, "not monotonic at p={p}");
                assert!((0.0..=1.0).contains(&local));
                last = local;
            }
        }
    }

    #[test]
    fn test_shared_clamps_out_of_range_input() {
        let groups = build_groups(3, |_| "x");
        assert_eq!(group_progress_shared(-1.0, &groups[0], 3), 0.0);
        assert_eq!(group_progress_shared(2.0, &groups[0], 3), 1.0);
    }

    #[test]
    fn test_independent_single_member() {
        let groups = build_groups(3, |i| i); // three singleton groups
        let mut reported = HashMap::new();
        reported.insert(1_usize, 0.4);

        assert!(approx_eq(group_progress_independent(&groups[1], &reported), 0.4, 1e-12));
        // Unreported members sit at 0.
        assert_eq!(group_progress_independent(&groups[2], &reported), 0.0);
    }

    #[test]
    fn test_independent_later_member_advances_group() {
        let groups = build_groups(4, |_| "panel"); // one group of four
        let group = &groups[0];

        let mut reported = HashMap::new();
        reported.insert(0_usize, 1.0);
        reported.insert(1_usize, 1.0);
        reported.insert(2_usize, 0.5);

        // Third member halfway: group is at (2 + 0.5) / 4.
        assert!(approx_eq(group_progress_independent(group, &reported), 0.625, 1e-12));
    }

    #[test]
    fn test_independent_skips_stale_zero_members() {
        let groups = build_groups(3, |_| "panel");
        let group = &groups[0];

        // Only the middle observer has fired; the last reports a stale 0
        // which must not pull the group backwards.
        let mut reported = HashMap::new();
        reported.insert(1_usize, 0.6);
        reported.insert(2_usize, 0.0);

        let expected = (1.0 + 0.6) / 3.0;
        assert!(approx_eq(group_progress_independent(group, &reported), expected, 1e-12));
    }

    #[test]
    fn test_independent_first_member_zero_counts() {
        let groups = build_groups(2, |_| "panel");
        let group = &groups[0];

        // Nothing reported at all: the first member's implicit 0 applies.
        let reported = HashMap::new();
        assert_eq!(group_progress_independent(group, &reported), 0.0);
    }

    #[test]
    fn test_independent_clamps_member_values() {
        let groups = build_groups(2, |_| "panel");
        let group = &groups[0];

        let mut reported = HashMap::new();
        reported.insert(0_usize, 5.0); // overshooting observer
        reported.insert(1_usize, 2.0);

        assert_eq!(group_progress_independent(group, &reported), 1.0);
    }
}
