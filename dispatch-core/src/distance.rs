//! Great-circle distance between delivery points.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`] and are reported in kilometres.

use geo::Coord;

use crate::DeliveryPoint;

/// Mean Earth radius used by the haversine metric, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two WGS84 coordinates.
///
/// The intermediate haversine term is clamped to `[0, 1]` so rounding near
/// the poles or the antimeridian never feeds a negative value into a square
/// root. The result is symmetric in its arguments and exactly zero for equal
/// coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dispatch_core::haversine_km;
///
/// let moscow = Coord { x: 37.61, y: 55.75 };
/// let petersburg = Coord { x: 30.31, y: 59.93 };
/// let km = haversine_km(moscow, petersburg);
/// assert!((km - 634.0).abs() < 5.0);
/// assert_eq!(haversine_km(moscow, moscow), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lon = (b.x - a.x).to_radians();
    let half_lat = (delta_lat / 2.0).sin();
    let half_lon = (delta_lon / 2.0).sin();
    let latitude_scale = a.y.to_radians().cos() * b.y.to_radians().cos();
    let raw = half_lat * half_lat + latitude_scale * (half_lon * half_lon);
    let h = raw.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Haversine distance in kilometres between two delivery points.
///
/// Payloads play no part in the metric, so points carrying different payload
/// types can be compared.
#[must_use]
pub fn distance<T, U>(a: &DeliveryPoint<T>, b: &DeliveryPoint<U>) -> f64 {
    haversine_km(a.location, b.location)
}
