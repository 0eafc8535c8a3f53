//! # Media Grouping
//!
//! Partitions an ordered step sequence into contiguous runs that share one
//! visual panel. Grouping is by key *equality*, not identity: the caller's
//! key function assigns each step an opaque key, and consecutive steps with
//! equal keys merge into one group. A key may legally recur later in the
//! sequence; that starts a new, distinct group.

/// A maximal run of consecutive steps sharing one visual-panel identity.
///
/// Invariants (guaranteed by [`build_groups`]):
/// - groups exactly partition `[0, step_count)` in order, no gaps or
///   overlaps;
/// - `member_indices` is the contiguous range `start_index..=end_index`;
/// - no two adjacent groups share a key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaGroup<K> {
    /// Panel identity shared by every member step.
    pub key: K,
    /// First step index in the group.
    pub start_index: usize,
    /// Last step index in the group (inclusive).
    pub end_index: usize,
    /// Every member step index, ascending and contiguous.
    pub member_indices: Vec<usize>,
}

impl<K> MediaGroup<K> {
    /// Number of member steps.
    pub fn len(&self) -> usize {
        self.member_indices.len()
    }

    /// True when the group has no members. Never the case for groups built
    /// by [`build_groups`].
    pub fn is_empty(&self) -> bool {
        self.member_indices.is_empty()
    }

    /// Whether a step index falls inside this group's range.
    pub fn contains(&self, step: usize) -> bool {
        self.start_index <= step && step <= self.end_index
    }
}

/// Partition steps `0..step_count` into media groups.
///
/// Scans in order, merging a step into the previous group iff its key equals
/// the previous group's key. `key_of` is assumed total and pure. Output
/// length is at least 1 when `step_count > 0`.
///
/// # Example
///
/// ```rust
/// use scrolly_engine::build_groups;
///
/// let groups = build_groups(4, |i| if i < 2 { "a" } else { "b" });
/// assert_eq!(groups.len(), 2);
/// assert_eq!((groups[0].start_index, groups[0].end_index), (0, 1));
/// assert_eq!((groups[1].start_index, groups[1].end_index), (2, 3));
/// ```
pub fn build_groups<K, F>(step_count: usize, key_of: F) -> Vec<MediaGroup<K>>
where
    K: PartialEq,
    F: Fn(usize) -> K,
{
    let mut groups: Vec<MediaGroup<K>> = Vec::new();

    for i in 0..step_count {
        let key = key_of(i);
        match groups.last_mut() {
            Some(current) if current.key == key => {
                current.end_index = i;
                current.member_indices.push(i);
            }
            _ => groups.push(MediaGroup {
                key,
                start_index: i,
                end_index: i,
                member_indices: vec![i],
            }),
        }
    }

    groups
}

/// Index of the group whose range contains `step`, if any.
pub fn group_containing<K>(groups: &[MediaGroup<K>], step: usize) -> Option<usize> {
    groups.iter().position(|g| g.contains(step))
}
