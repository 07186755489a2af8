//! Error types for the dispatch workflow.

use dispatch_core::{PartitionError, StoreError};
use thiserror::Error;

/// Errors returned by [`DispatchService`](crate::DispatchService).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// There are no orders in the `new` state to optimise.
    #[error("no new orders to optimise")]
    NoEligibleOrders,
    /// Either no courier is available or no batch is waiting for one.
    #[error(
        "nothing to assign: {available_couriers} available couriers, {open_batches} open batches"
    )]
    NoAssignmentCandidates {
        /// Couriers able to take a batch.
        available_couriers: usize,
        /// Batches without a courier.
        open_batches: usize,
    },
    /// The partitioner rejected the request.
    #[error(transparent)]
    Partition(#[from] PartitionError),
    /// The store rejected an update.
    #[error(transparent)]
    Store(#[from] StoreError),
}
