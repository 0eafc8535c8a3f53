//! # Step Activation
//!
//! Maps a continuous progress scalar and a step count to a discrete active
//! step index. Two activation policies exist because two widget layouts
//! consume them, and they disagree at the boundary step:
//!
//! - [`ActivationPolicy::SectionLinear`] — progress sweeps the section as a
//!   whole, the last step activating only at the very end.
//! - [`ActivationPolicy::EqualShare`] — compact/"highlight" layouts give
//!   every step an equal share of the progress domain.
//!
//! They must stay distinct named policies; conflating them changes which
//! step is active near section edges.

use crate::clamp_progress;

/// Nudges a progress of exactly 1.0 below the last equal-share boundary so
/// the final step stays active instead of overflowing the index range.
pub const EQUAL_SHARE_EPSILON: f64 = 1e-9;

/// How a progress scalar maps to an active step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationPolicy {
    /// `floor(p * (n - 1))`: the section sweeps linearly across step
    /// boundaries, reaching the last step only as progress reaches 1.
    SectionLinear,
    /// `floor(min(p, 1 - ε) * n)`: each of the `n` steps owns an equal
    /// `1/n`-wide share of the progress domain.
    EqualShare,
}

/// Map a progress scalar to the active step index.
///
/// Progress is clamped to `[0, 1]` before use. Returns `None` when
/// `step_count` is 0: the widget renders nothing, which is a degenerate
/// state, not an error.
///
/// # Example
///
/// ```rust
/// use scrolly_engine::{active_step, ActivationPolicy};
///
/// // The policies diverge at the same progress value.
/// assert_eq!(active_step(0.5, 4, ActivationPolicy::SectionLinear), Some(1));
/// assert_eq!(active_step(0.5, 4, ActivationPolicy::EqualShare), Some(2));
///
/// // Both land on the last step at full progress.
/// assert_eq!(active_step(1.0, 4, ActivationPolicy::SectionLinear), Some(3));
/// assert_eq!(active_step(1.0, 4, ActivationPolicy::EqualShare), Some(3));
/// ```
pub fn active_step(progress: f64, step_count: usize, policy: ActivationPolicy) -> Option<usize> {
    if step_count == 0 {
        return None;
    }

    let p = clamp_progress(progress);
    let index = match policy {
        ActivationPolicy::SectionLinear => (p * (step_count - 1) as f64).floor() as usize,
        ActivationPolicy::EqualShare => {
            (p.min(1.0 - EQUAL_SHARE_EPSILON) * step_count as f64).floor() as usize
        }
    };

    Some(index.min(step_count - 1))
}

/// Tracks the active step across successive progress updates, retaining the
/// previously active index.
///
/// The previous index is advisory: callers use it to tell "entering" from
/// "leaving" transitions (the group progress remapper needs the offset
/// direction), but the authoritative state is always the latest
/// [`active_step`] result.
#[derive(Debug, Clone)]
pub struct StepTracker {
    step_count: usize,
    policy: ActivationPolicy,
    current: Option<usize>,
    previous: Option<usize>,
}

impl StepTracker {
    /// Create a tracker for `step_count` steps under the given policy.
    pub fn new(step_count: usize, policy: ActivationPolicy) -> Self {
        Self {
            step_count,
            policy,
            current: None,
            previous: None,
        }
    }

    /// Feed the latest progress value; returns the now-active step.
    ///
    /// The previous index only changes when the active step actually moves,
    /// so repeated updates within one step leave it untouched.
    pub fn advance(&mut self, progress: f64) -> Option<usize> {
        let next = active_step(progress, self.step_count, self.policy);
        if next != self.current {
            self.previous = self.current;
            self.current = next;
        }
        self.current
    }

    /// The currently active step, if any progress has been fed.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The step that was active before the current one.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }
}
