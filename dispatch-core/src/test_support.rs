//! Test-only fixtures shared by unit and behaviour tests across the
//! workspace. Enabled by `cfg(test)` or the `test-support` feature.

use crate::{Courier, CourierId, DeliveryPoint, MemoryDispatchStore, Order};

/// Construct a payload-free delivery point from latitude and longitude.
///
/// # Examples
/// ```rust
/// use dispatch_core::test_support::point;
///
/// let p = point("a", 55.75, 37.61);
/// assert_eq!(p.id.as_str(), "a");
/// ```
#[must_use]
pub fn point(id: &str, latitude: f64, longitude: f64) -> DeliveryPoint<()> {
    DeliveryPoint::from_lat_lon(id, latitude, longitude, ())
}

/// Two nearby Moscow points followed by one in Saint Petersburg.
///
/// Greedy construction into two groups splits the Moscow pair because the
/// second point prefers the empty group; refinement reunites them.
#[must_use]
pub fn moscow_pair_and_petersburg() -> Vec<DeliveryPoint<()>> {
    vec![
        point("moscow-1", 55.75, 37.61),
        point("moscow-2", 55.76, 37.62),
        point("petersburg", 59.93, 30.31),
    ]
}

/// Construct a new order with a single item.
#[must_use]
pub fn order(location: &str, latitude: f64, longitude: f64) -> Order {
    Order::new(location, latitude, longitude, format!("recipient of {location}"))
        .with_items(["parcel"])
}

/// Construct an available courier positioned in central Moscow.
#[must_use]
pub fn courier(courier_id: CourierId) -> Courier {
    Courier::new(courier_id, format!("courier {courier_id}"), 55.75, 37.62)
}

/// A store holding two Moscow orders, one Saint Petersburg order and the
/// given number of available couriers.
#[must_use]
pub fn seeded_store(courier_count: u64) -> MemoryDispatchStore {
    let orders = [
        order("moscow-1", 55.75, 37.61),
        order("moscow-2", 55.76, 37.62),
        order("petersburg", 59.93, 30.31),
    ];
    let couriers = (1..=courier_count).map(courier);
    MemoryDispatchStore::with_records(orders, couriers).unwrap_or_default()
}
