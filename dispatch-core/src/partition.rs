//! Groups of delivery points and the partition that holds them.
//!
//! A [`Partition`] always has a fixed number of [`Group`]s. Groups have no
//! identity beyond their position. The mutation helpers are deliberately
//! small so that optimisers can express each move as a remove followed by an
//! insert, and undo it exactly.

use crate::{DeliveryPoint, PointId};

/// An order-irrelevant collection of delivery points inside a [`Partition`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Group<T> {
    points: Vec<DeliveryPoint<T>>,
}

impl<T> Group<T> {
    /// Construct an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Members of the group.
    #[must_use]
    pub fn points(&self) -> &[DeliveryPoint<T>] {
        &self.points
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, DeliveryPoint<T>> {
        self.points.iter()
    }

    /// Consume the group, yielding its members.
    #[must_use]
    pub fn into_points(self) -> Vec<DeliveryPoint<T>> {
        self.points
    }
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<DeliveryPoint<T>>> for Group<T> {
    fn from(points: Vec<DeliveryPoint<T>>) -> Self {
        Self { points }
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a DeliveryPoint<T>;
    type IntoIter = std::slice::Iter<'a, DeliveryPoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A fixed-size sequence of groups covering a set of delivery points.
///
/// Every point handed to an optimiser ends up in exactly one group. Groups
/// beyond the number of points may stay empty.
///
/// # Examples
/// ```
/// use dispatch_core::{DeliveryPoint, Partition};
///
/// let mut partition = Partition::with_group_count(2);
/// partition.push(1, DeliveryPoint::from_lat_lon("a", 0.0, 0.0, ()));
///
/// assert_eq!(partition.group_count(), 2);
/// assert_eq!(partition.point_count(), 1);
/// assert!(partition.groups()[0].is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Partition<T> {
    groups: Vec<Group<T>>,
}

impl<T> Partition<T> {
    /// Construct a partition of `group_count` empty groups.
    #[must_use]
    pub fn with_group_count(group_count: usize) -> Self {
        Self {
            groups: std::iter::repeat_with(Group::new)
                .take(group_count)
                .collect(),
        }
    }

    /// Groups in positional order.
    #[must_use]
    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    /// Borrow the group at `index`.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&Group<T>> {
        self.groups.get(index)
    }

    /// Number of groups, empty ones included.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of points across all groups.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Indices of groups with at least one member, in ascending order.
    #[must_use]
    pub fn non_empty_groups(&self) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !group.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Iterate over every point in group order.
    pub fn points(&self) -> impl Iterator<Item = &DeliveryPoint<T>> + '_ {
        self.groups.iter().flat_map(Group::iter)
    }

    /// Index of the group holding the point with `id`, if any.
    #[must_use]
    pub fn group_of(&self, id: &PointId) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.iter().any(|point| &point.id == id))
    }

    /// Append a point to the group at `group`.
    ///
    /// Returns the point back when `group` is out of range.
    pub fn push(&mut self, group: usize, point: DeliveryPoint<T>) -> Result<(), DeliveryPoint<T>> {
        match self.groups.get_mut(group) {
            Some(target) => {
                target.points.push(point);
                Ok(())
            }
            None => Err(point),
        }
    }

    /// Insert a point at `position` within the group at `group`.
    ///
    /// `position` is clamped to the group's length. Returns the point back
    /// when `group` is out of range.
    pub fn insert(
        &mut self,
        group: usize,
        position: usize,
        point: DeliveryPoint<T>,
    ) -> Result<(), DeliveryPoint<T>> {
        match self.groups.get_mut(group) {
            Some(target) => {
                let at = position.min(target.points.len());
                target.points.insert(at, point);
                Ok(())
            }
            None => Err(point),
        }
    }

    /// Remove and return the member at `position` of the group at `group`.
    pub fn remove(&mut self, group: usize, position: usize) -> Option<DeliveryPoint<T>> {
        let target = self.groups.get_mut(group)?;
        (position < target.points.len()).then(|| target.points.remove(position))
    }

    /// Remove and return the last member of the group at `group`.
    pub fn pop(&mut self, group: usize) -> Option<DeliveryPoint<T>> {
        self.groups.get_mut(group)?.points.pop()
    }

    /// Consume the partition, yielding its groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<Group<T>> {
        self.groups
    }
}

impl<T> From<Vec<Group<T>>> for Partition<T> {
    fn from(groups: Vec<Group<T>>) -> Self {
        Self { groups }
    }
}
