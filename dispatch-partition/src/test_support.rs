//! Test-only utilities for `dispatch-partition`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use dispatch_core::{DeliveryPoint, Group};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `clusters` tight clusters of `per_cluster` points each.
///
/// Cluster centres sit one degree apart along a meridian near Moscow and
/// members are scattered within about a kilometre of their centre. Point
/// identifiers have the form `c{cluster}-p{index}`. The same `seed` always
/// yields the same points.
///
/// # Examples
/// ```rust
/// use dispatch_partition::test_support::clustered_points;
///
/// let points = clustered_points(3, 4, 7);
/// assert_eq!(points.len(), 12);
/// assert_eq!(points[0].id.as_str(), "c0-p0");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "cluster members are offset from their centre"
)]
pub fn clustered_points(clusters: u32, per_cluster: u32, seed: u64) -> Vec<DeliveryPoint<()>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = Vec::new();
    for cluster in 0..clusters {
        let centre_latitude = 50.0 + f64::from(cluster);
        for index in 0..per_cluster {
            let latitude = centre_latitude + rng.gen_range(-0.01..0.01);
            let longitude = 37.6 + rng.gen_range(-0.01..0.01);
            points.push(DeliveryPoint::from_lat_lon(
                format!("c{cluster}-p{index}"),
                latitude,
                longitude,
                (),
            ));
        }
    }
    points
}

/// Identifiers of a group's members in lexicographic order.
#[must_use]
pub fn sorted_ids<T>(group: &Group<T>) -> Vec<String> {
    let mut ids: Vec<String> = group.iter().map(|point| point.id.to_string()).collect();
    ids.sort();
    ids
}
