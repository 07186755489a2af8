//! Facade crate for the courier dispatch engine.
//!
//! This crate re-exports the core domain types and exposes the hill-climbing
//! partitioner and the dispatch service behind feature flags.
//!
//! ```rust
//! # #[cfg(feature = "partition-hill-climb")]
//! # fn main() -> Result<(), courier_dispatch::PartitionError> {
//! use courier_dispatch::{DeliveryPoint, HillClimbPartitioner, PartitionRequest, Partitioner};
//!
//! let points = vec![
//!     DeliveryPoint::from_lat_lon("moscow-1", 55.75, 37.61, ()),
//!     DeliveryPoint::from_lat_lon("moscow-2", 55.76, 37.62, ()),
//!     DeliveryPoint::from_lat_lon("petersburg", 59.93, 30.31, ()),
//! ];
//! let request = PartitionRequest::new(2, 200, 7);
//! let response = HillClimbPartitioner::new().partition(points, &request)?;
//! assert_eq!(response.partition.group_count(), 2);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "partition-hill-climb"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use dispatch_core::{
    Batch, BatchId, BatchState, Courier, CourierId, DeliveryPoint, Diagnostics, DispatchStore,
    EARTH_RADIUS_KM, Group, MemoryDispatchStore, Order, OrderState, Partition, PartitionError,
    PartitionRequest, PartitionResponse, Partitioner, PointId, StoreError, distance,
    haversine_km, validate_points,
};

#[cfg(feature = "partition-hill-climb")]
pub use dispatch_partition::{HillClimbPartitioner, RefineOutcome, construct, cost, refine};

#[cfg(feature = "service")]
pub use dispatch_service::{
    Assignment, AssignmentSummary, DispatchConfig, DispatchError, DispatchService,
};
