//! Greedy initial placement of delivery points.

use dispatch_core::{DeliveryPoint, Partition, PartitionError};
use log::{debug, warn};

use crate::objective::distance_sum;

/// Index of the group whose members are closest to `point` in total.
///
/// For each group the distances from `point` to every member are summed; an
/// empty group sums to zero and is therefore preferred over any occupied
/// one. The smallest sum wins and ties go to the lowest index. Returns
/// `None` only when the partition has no groups.
///
/// # Examples
/// ```
/// use dispatch_core::{DeliveryPoint, Group, Partition};
/// use dispatch_partition::nearest_group;
///
/// let near = DeliveryPoint::from_lat_lon("near", 55.75, 37.61, ());
/// let far = DeliveryPoint::from_lat_lon("far", 59.93, 30.31, ());
/// let partition = Partition::from(vec![Group::from(vec![far]), Group::from(vec![near])]);
///
/// let probe = DeliveryPoint::from_lat_lon("probe", 55.76, 37.62, ());
/// assert_eq!(nearest_group(&partition, &probe), Some(1));
/// ```
#[must_use]
pub fn nearest_group<T, U>(partition: &Partition<T>, point: &DeliveryPoint<U>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, group) in partition.groups().iter().enumerate() {
        let total = distance_sum(point, group.points());
        if best.is_none_or(|(_, lowest)| total < lowest) {
            best = Some((index, total));
        }
    }
    best.map(|(index, _)| index)
}

/// Build a partition of `group_count` groups by placing points one at a time
/// with [`nearest_group`].
///
/// Points are placed in input order and each placement sees only the points
/// placed before it, so permuting the input can change the result. Surplus
/// groups stay empty when there are fewer points than groups. Coordinates
/// are not checked here; see
/// [`validate_points`](dispatch_core::validate_points).
///
/// # Errors
/// Returns [`PartitionError::ZeroGroupCount`] when `group_count` is zero.
///
/// # Examples
/// ```
/// use dispatch_core::DeliveryPoint;
/// use dispatch_partition::construct;
///
/// # fn main() -> Result<(), dispatch_core::PartitionError> {
/// let points = vec![
///     DeliveryPoint::from_lat_lon("a", 55.75, 37.61, ()),
///     DeliveryPoint::from_lat_lon("b", 55.76, 37.62, ()),
/// ];
/// let partition = construct(points, 5)?;
/// assert_eq!(partition.group_count(), 5);
/// assert_eq!(partition.non_empty_groups(), vec![0, 1]);
/// # Ok(())
/// # }
/// ```
pub fn construct<T>(
    points: Vec<DeliveryPoint<T>>,
    group_count: usize,
) -> Result<Partition<T>, PartitionError> {
    if group_count == 0 {
        return Err(PartitionError::ZeroGroupCount);
    }
    let point_count = points.len();
    let mut partition = Partition::with_group_count(group_count);
    for point in points {
        // `nearest_group` is `None` only for a partition without groups.
        let target = nearest_group(&partition, &point).unwrap_or(0);
        if let Err(lost) = partition.push(target, point) {
            warn!("no group {target} to hold point {}", lost.id);
            debug_assert!(false, "nearest group {target} outside {group_count} groups");
        }
    }
    debug!(
        "constructed {group_count} groups from {point_count} points ({} occupied)",
        partition.non_empty_groups().len()
    );
    Ok(partition)
}
