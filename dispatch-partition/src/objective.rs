//! Objective function for comparing partitions.
//!
//! The cost of a group sums `distance(p1, p2)` over every ordered pair of
//! members, self-pairs included. Each unordered pair is therefore counted
//! twice. That scaling does not change which partition is best, but the
//! exact magnitude is kept so reported costs stay comparable with earlier
//! dispatch runs.

use dispatch_core::{DeliveryPoint, Group, Partition, distance};

/// Sum of distances from `point` to every member of `members`, in
/// kilometres. Zero for an empty slice.
#[must_use]
pub fn distance_sum<T, U>(point: &DeliveryPoint<T>, members: &[DeliveryPoint<U>]) -> f64 {
    members.iter().map(|member| distance(point, member)).sum()
}

/// Intra-group cost: the double-counted sum of pairwise member distances.
///
/// Empty and single-member groups cost zero.
#[must_use]
pub fn group_cost<T>(group: &Group<T>) -> f64 {
    group
        .iter()
        .map(|point| distance_sum(point, group.points()))
        .sum()
}

/// Objective value of a partition: the sum of its [`group_cost`]s.
///
/// Lower is better. The value is always recomputed from the partition's
/// current contents.
///
/// # Examples
/// ```
/// use dispatch_core::{DeliveryPoint, Group, Partition};
/// use dispatch_partition::cost;
///
/// let a = DeliveryPoint::from_lat_lon("a", 0.0, 0.0, ());
/// let b = DeliveryPoint::from_lat_lon("b", 0.0, 1.0, ());
/// let together = Partition::from(vec![Group::from(vec![a.clone(), b.clone()])]);
/// let apart = Partition::from(vec![Group::from(vec![a]), Group::from(vec![b])]);
///
/// assert!(cost(&together) > 0.0);
/// assert_eq!(cost(&apart), 0.0);
/// ```
#[must_use]
pub fn cost<T>(partition: &Partition<T>) -> f64 {
    partition.groups().iter().map(group_cost).sum()
}
