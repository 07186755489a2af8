//! Proptest strategies for partitioning property tests.
//!
//! Generated points always carry valid coordinates and unique identifiers,
//! so every strategy output is an acceptable partitioner input.

use std::collections::HashSet;

use dispatch_core::{DeliveryPoint, Partition};
use proptest::prelude::*;

/// Strategy for a set of `min_count..=max_count` valid points.
///
/// Coordinates are drawn from a box around central Europe so distances stay
/// in a realistic range; identifiers are `p0`, `p1`, ... by position.
pub fn point_set_strategy(
    min_count: usize,
    max_count: usize,
) -> impl Strategy<Value = Vec<DeliveryPoint<()>>> {
    proptest::collection::vec(coordinate_strategy(), min_count..=max_count).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(index, (latitude, longitude))| {
                DeliveryPoint::from_lat_lon(format!("p{index}"), latitude, longitude, ())
            })
            .collect()
    })
}

/// Strategy for any valid `(latitude, longitude)` pair.
pub fn coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    (40.0_f64..60.0_f64, 0.0_f64..40.0_f64)
}

/// Assert every input identifier appears in exactly one group.
pub fn assert_exact_cover(
    input: &[DeliveryPoint<()>],
    result: &Partition<()>,
) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for point in result.points() {
        prop_assert!(
            seen.insert(point.id.clone()),
            "point {} appears in more than one group",
            point.id
        );
    }
    prop_assert_eq!(seen.len(), input.len());
    for point in input {
        prop_assert!(seen.contains(&point.id), "point {} was lost", point.id);
    }
    Ok(())
}
