use std::fmt;

use geo::Coord;

/// Identity token of a delivery point, typically the order's location key.
///
/// # Examples
/// ```
/// use dispatch_core::PointId;
///
/// let id = PointId::from("order-17");
/// assert_eq!(id.as_str(), "order-17");
/// assert_eq!(id.to_string(), "order-17");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PointId(String);

impl PointId {
    /// Wrap an identity token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PointId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A geocoded delivery location carrying an opaque payload.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The payload
/// is moved through the partitioning engine untouched: callers get back the
/// same values they handed in, never copies.
///
/// # Examples
/// ```
/// use dispatch_core::DeliveryPoint;
///
/// let point = DeliveryPoint::from_lat_lon("a", 55.75, 37.61, "parcel");
/// assert_eq!(point.latitude(), 55.75);
/// assert_eq!(point.longitude(), 37.61);
/// assert_eq!(point.payload, "parcel");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPoint<T> {
    /// Identity token, unique within one partitioning call.
    pub id: PointId,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Caller data carried through the engine.
    pub payload: T,
}

impl<T> DeliveryPoint<T> {
    /// Construct a point from an identifier, a coordinate and a payload.
    pub fn new(id: impl Into<PointId>, location: Coord<f64>, payload: T) -> Self {
        Self {
            id: id.into(),
            location,
            payload,
        }
    }

    /// Construct a point from latitude and longitude given in that order.
    ///
    /// Order records and most geocoders report `(latitude, longitude)`,
    /// the reverse of `geo`'s axis order.
    pub fn from_lat_lon(id: impl Into<PointId>, latitude: f64, longitude: f64, payload: T) -> Self {
        Self::new(
            id,
            Coord {
                x: longitude,
                y: latitude,
            },
            payload,
        )
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Whether both coordinates are finite and inside the WGS84 ranges
    /// `[-90, 90]` and `[-180, 180]`.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        let latitude = self.latitude();
        let longitude = self.longitude();
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }
}
