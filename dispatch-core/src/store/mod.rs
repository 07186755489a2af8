//! Data access boundary for orders, couriers and batches.
//!
//! The [`DispatchStore`] trait models a simple document store: records are
//! fetched whole, inserted, and updated by identifier. Nothing in the
//! partitioning engine depends on it; the dispatch service uses it to feed
//! the engine and to persist the resulting batches.

use thiserror::Error;

use crate::{Batch, BatchId, Courier, CourierId, Order, OrderState, PointId};

mod memory;

pub use memory::MemoryDispatchStore;

/// Errors raised by [`DispatchStore`] updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An order with the same location key already exists.
    #[error("order {0} already exists")]
    DuplicateOrder(PointId),
    /// A courier with the same identifier already exists.
    #[error("courier {0} already exists")]
    DuplicateCourier(CourierId),
    /// No order has the given location key.
    #[error("order {0} does not exist")]
    UnknownOrder(PointId),
    /// No courier has the given identifier.
    #[error("courier {0} does not exist")]
    UnknownCourier(CourierId),
    /// No batch has the given identifier.
    #[error("batch {0} does not exist")]
    UnknownBatch(BatchId),
}

/// Read and write access to dispatch records.
///
/// Collections are returned in insertion order, which callers rely on for
/// first-in, first-out courier matching.
///
/// # Examples
///
/// ```rust
/// use dispatch_core::{DispatchStore, MemoryDispatchStore, Order, OrderState};
///
/// # fn main() -> Result<(), dispatch_core::StoreError> {
/// let mut store = MemoryDispatchStore::default();
/// store.insert_order(Order::new("flat-1", 55.75, 37.61, "Ivanov"))?;
/// let updated = store.set_order_state(&"flat-1".into(), OrderState::Processing)?;
///
/// assert_eq!(updated.state, OrderState::Processing);
/// assert!(store.orders_in_state(OrderState::New).is_empty());
/// # Ok(())
/// # }
/// ```
pub trait DispatchStore {
    /// All orders.
    fn orders(&self) -> Vec<Order>;

    /// Orders currently in `state`.
    fn orders_in_state(&self, state: OrderState) -> Vec<Order> {
        self.orders()
            .into_iter()
            .filter(|order| order.state == state)
            .collect()
    }

    /// Add an order. Location keys must be unique.
    fn insert_order(&mut self, order: Order) -> Result<(), StoreError>;

    /// Change an order's state, returning the updated record.
    fn set_order_state(&mut self, location: &PointId, state: OrderState)
    -> Result<Order, StoreError>;

    /// Mark an order as assigned to `courier_id`, returning the updated record.
    fn assign_order(&mut self, location: &PointId, courier_id: CourierId)
    -> Result<Order, StoreError>;

    /// All couriers.
    fn couriers(&self) -> Vec<Courier>;

    /// Couriers able to take a batch.
    fn available_couriers(&self) -> Vec<Courier> {
        self.couriers()
            .into_iter()
            .filter(|courier| courier.available)
            .collect()
    }

    /// Look up a courier.
    fn courier(&self, courier_id: CourierId) -> Option<Courier>;

    /// Orders whose `courier_id` matches.
    fn courier_orders(&self, courier_id: CourierId) -> Vec<Order> {
        self.orders()
            .into_iter()
            .filter(|order| order.courier_id == Some(courier_id))
            .collect()
    }

    /// Add a courier. Identifiers must be unique.
    fn insert_courier(&mut self, courier: Courier) -> Result<(), StoreError>;

    /// Replace a courier's availability and carried orders.
    fn update_courier(
        &mut self,
        courier_id: CourierId,
        available: bool,
        orders: Vec<Order>,
    ) -> Result<Courier, StoreError>;

    /// All batches.
    fn batches(&self) -> Vec<Batch>;

    /// Batches without a courier.
    fn open_batches(&self) -> Vec<Batch> {
        self.batches().into_iter().filter(Batch::is_open).collect()
    }

    /// Persist a new unassigned batch, returning it with its allocated id.
    fn insert_batch(&mut self, orders: Vec<Order>) -> Batch;

    /// Record that `courier_id` carries the batch, refreshing its orders.
    fn assign_batch(
        &mut self,
        batch_id: BatchId,
        courier_id: CourierId,
        orders: Vec<Order>,
    ) -> Result<Batch, StoreError>;

    /// Return every order to [`OrderState::New`] without a courier.
    /// Returns the number of orders touched.
    fn reset_orders(&mut self) -> usize;

    /// Make every courier available and empty-handed.
    /// Returns the number of couriers touched.
    fn reset_couriers(&mut self) -> usize;

    /// Delete every batch. Returns the number removed.
    fn drop_batches(&mut self) -> usize;
}
