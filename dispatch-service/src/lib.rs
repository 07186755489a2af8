//! Order dispatch workflow built on the partitioning engine.
//!
//! [`DispatchService`] ties a [`DispatchStore`](dispatch_core::DispatchStore)
//! to a [`Partitioner`](dispatch_core::Partitioner). It turns new orders
//! into delivery batches, hands open batches to available couriers, and
//! exposes the maintenance resets used between dispatch rounds.
//!
//! # Examples
//!
//! ```rust
//! use dispatch_core::{Courier, DeliveryPoint, Diagnostics, MemoryDispatchStore, Order, Partition};
//! use dispatch_core::{PartitionError, PartitionRequest, PartitionResponse, Partitioner};
//! use dispatch_service::{DispatchConfig, DispatchService};
//!
//! /// Puts every order into one batch.
//! struct SingleBatch;
//!
//! impl Partitioner<Order> for SingleBatch {
//!     fn partition(
//!         &self,
//!         points: Vec<DeliveryPoint<Order>>,
//!         request: &PartitionRequest,
//!     ) -> Result<PartitionResponse<Order>, PartitionError> {
//!         let mut partition = Partition::with_group_count(request.group_count);
//!         for point in points {
//!             partition.push(0, point).map_err(|_| PartitionError::ZeroGroupCount)?;
//!         }
//!         Ok(PartitionResponse { partition, cost: 0.0, diagnostics: Diagnostics::default() })
//!     }
//! }
//!
//! # fn main() -> Result<(), dispatch_service::DispatchError> {
//! let store = MemoryDispatchStore::with_records(
//!     [Order::new("flat-1", 55.75, 37.61, "Ivanov")],
//!     Vec::<Courier>::new(),
//! )?;
//! let mut service = DispatchService::new(store, SingleBatch, DispatchConfig::default());
//! let batches = service.optimize_orders()?;
//! assert_eq!(batches.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod service;

pub use config::DispatchConfig;
pub use error::DispatchError;
pub use service::{Assignment, AssignmentSummary, DispatchService};
