//! Records held by the dispatch store.
//!
//! Orders move through [`OrderState::New`], [`OrderState::Processing`] and
//! [`OrderState::Assigned`]. Partitioned orders are grouped into [`Batch`]
//! records which are later handed to an available [`Courier`].

use std::fmt;

use crate::{DeliveryPoint, PointId};

/// Identifier of a courier.
pub type CourierId = u64;

/// Identifier of a batch, allocated by the store.
pub type BatchId = u64;

/// Processing state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OrderState {
    /// Accepted but not yet batched.
    #[default]
    New,
    /// Placed in a batch awaiting a courier.
    Processing,
    /// Handed to a courier.
    Assigned,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "new",
            Self::Processing => "processing",
            Self::Assigned => "assigned",
        })
    }
}

/// A customer order with a delivery location.
///
/// The `location` key identifies the order in the store and doubles as the
/// delivery point identity during partitioning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Unique location key of the order.
    pub location: PointId,
    /// Delivery latitude in degrees.
    pub latitude: f64,
    /// Delivery longitude in degrees.
    pub longitude: f64,
    /// Recipient's full name.
    pub recipient: String,
    /// Items to deliver.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<String>,
    /// Courier carrying the order, once assigned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub courier_id: Option<CourierId>,
    /// Current processing state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: OrderState,
}

impl Order {
    /// Construct a new, unassigned order.
    ///
    /// # Examples
    /// ```
    /// use dispatch_core::{Order, OrderState};
    ///
    /// let order = Order::new("flat-12", 55.75, 37.61, "Ivanov I. I.");
    /// assert_eq!(order.state, OrderState::New);
    /// assert!(order.courier_id.is_none());
    /// ```
    pub fn new(
        location: impl Into<PointId>,
        latitude: f64,
        longitude: f64,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            latitude,
            longitude,
            recipient: recipient.into(),
            items: Vec::new(),
            courier_id: None,
            state: OrderState::New,
        }
    }

    /// Replace the item list.
    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Wrap the order as a delivery point carrying itself as payload.
    #[must_use]
    pub fn into_delivery_point(self) -> DeliveryPoint<Self> {
        DeliveryPoint::from_lat_lon(self.location.clone(), self.latitude, self.longitude, self)
    }
}

/// A courier who can carry one batch at a time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Courier {
    /// Unique courier identifier.
    pub courier_id: CourierId,
    /// Courier's full name.
    pub name: String,
    /// Last known latitude in degrees.
    pub latitude: f64,
    /// Last known longitude in degrees.
    pub longitude: f64,
    /// Whether the courier can take a batch.
    pub available: bool,
    /// Orders currently carried.
    #[cfg_attr(feature = "serde", serde(default))]
    pub orders: Vec<Order>,
}

impl Courier {
    /// Construct an available courier carrying nothing.
    pub fn new(courier_id: CourierId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            courier_id,
            name: name.into(),
            latitude,
            longitude,
            available: true,
            orders: Vec::new(),
        }
    }
}

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BatchState {
    /// Created from a partition group, waiting for a courier.
    #[default]
    Processing,
    /// Handed to a courier.
    Assigned,
}

/// A group of orders delivered together by one courier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    /// Store-allocated identifier.
    pub batch_id: BatchId,
    /// Courier carrying the batch, once assigned.
    pub courier_id: Option<CourierId>,
    /// Orders in the batch.
    pub orders: Vec<Order>,
    /// Current lifecycle state.
    pub state: BatchState,
}

impl Batch {
    /// Whether the batch still waits for a courier.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.courier_id.is_none()
    }
}
