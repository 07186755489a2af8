//! Core domain types for the courier dispatch engine.
//!
//! The crate defines geocoded [`DeliveryPoint`] values, the [`Partition`]
//! produced when points are grouped into delivery batches, the haversine
//! [`distance()`] metric, and the [`Partitioner`] trait implemented by
//! optimisation back ends. It also hosts the records and the
//! [`DispatchStore`] boundary used by the surrounding dispatch service.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod order;
mod partition;
mod partitioner;
mod point;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_KM, distance, haversine_km};
pub use order::{Batch, BatchId, BatchState, Courier, CourierId, Order, OrderState};
pub use partition::{Group, Partition};
pub use partitioner::{
    Diagnostics, PartitionError, PartitionRequest, PartitionResponse, Partitioner, validate_points,
};
pub use point::{DeliveryPoint, PointId};
pub use store::{DispatchStore, MemoryDispatchStore, StoreError};
