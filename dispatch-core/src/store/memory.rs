//! In-memory [`DispatchStore`] that can be snapshotted with serde.

use crate::{Batch, BatchId, BatchState, Courier, CourierId, Order, OrderState, PointId};

use super::{DispatchStore, StoreError};

/// Vector-backed dispatch store.
///
/// Lookups are linear scans, which is adequate for the batch-sized data the
/// dispatcher works with. With the `serde` feature the whole store
/// serialises as a single document, which is how the CLI persists state
/// between invocations.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryDispatchStore {
    #[cfg_attr(feature = "serde", serde(default))]
    orders: Vec<Order>,
    #[cfg_attr(feature = "serde", serde(default))]
    couriers: Vec<Courier>,
    #[cfg_attr(feature = "serde", serde(default))]
    batches: Vec<Batch>,
    #[cfg_attr(feature = "serde", serde(default))]
    next_batch_id: BatchId,
}

impl MemoryDispatchStore {
    /// Create a store pre-populated with orders and couriers.
    ///
    /// Later duplicates are rejected exactly as [`DispatchStore::insert_order`]
    /// and [`DispatchStore::insert_courier`] would.
    pub fn with_records<O, C>(orders: O, couriers: C) -> Result<Self, StoreError>
    where
        O: IntoIterator<Item = Order>,
        C: IntoIterator<Item = Courier>,
    {
        let mut store = Self::default();
        for order in orders {
            store.insert_order(order)?;
        }
        for courier in couriers {
            store.insert_courier(courier)?;
        }
        Ok(store)
    }

    fn order_mut(&mut self, location: &PointId) -> Result<&mut Order, StoreError> {
        self.orders
            .iter_mut()
            .find(|order| &order.location == location)
            .ok_or_else(|| StoreError::UnknownOrder(location.clone()))
    }

    fn courier_mut(&mut self, courier_id: CourierId) -> Result<&mut Courier, StoreError> {
        self.couriers
            .iter_mut()
            .find(|courier| courier.courier_id == courier_id)
            .ok_or(StoreError::UnknownCourier(courier_id))
    }
}

impl DispatchStore for MemoryDispatchStore {
    fn orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    fn insert_order(&mut self, order: Order) -> Result<(), StoreError> {
        if self
            .orders
            .iter()
            .any(|existing| existing.location == order.location)
        {
            return Err(StoreError::DuplicateOrder(order.location));
        }
        self.orders.push(order);
        Ok(())
    }

    fn set_order_state(
        &mut self,
        location: &PointId,
        state: OrderState,
    ) -> Result<Order, StoreError> {
        let order = self.order_mut(location)?;
        order.state = state;
        Ok(order.clone())
    }

    fn assign_order(
        &mut self,
        location: &PointId,
        courier_id: CourierId,
    ) -> Result<Order, StoreError> {
        let order = self.order_mut(location)?;
        order.state = OrderState::Assigned;
        order.courier_id = Some(courier_id);
        Ok(order.clone())
    }

    fn couriers(&self) -> Vec<Courier> {
        self.couriers.clone()
    }

    fn courier(&self, courier_id: CourierId) -> Option<Courier> {
        self.couriers
            .iter()
            .find(|courier| courier.courier_id == courier_id)
            .cloned()
    }

    fn insert_courier(&mut self, courier: Courier) -> Result<(), StoreError> {
        if self
            .couriers
            .iter()
            .any(|existing| existing.courier_id == courier.courier_id)
        {
            return Err(StoreError::DuplicateCourier(courier.courier_id));
        }
        self.couriers.push(courier);
        Ok(())
    }

    fn update_courier(
        &mut self,
        courier_id: CourierId,
        available: bool,
        orders: Vec<Order>,
    ) -> Result<Courier, StoreError> {
        let courier = self.courier_mut(courier_id)?;
        courier.available = available;
        courier.orders = orders;
        Ok(courier.clone())
    }

    fn batches(&self) -> Vec<Batch> {
        self.batches.clone()
    }

    fn insert_batch(&mut self, orders: Vec<Order>) -> Batch {
        let batch = Batch {
            batch_id: self.next_batch_id,
            courier_id: None,
            orders,
            state: BatchState::Processing,
        };
        self.next_batch_id = self.next_batch_id.saturating_add(1);
        self.batches.push(batch.clone());
        batch
    }

    fn assign_batch(
        &mut self,
        batch_id: BatchId,
        courier_id: CourierId,
        orders: Vec<Order>,
    ) -> Result<Batch, StoreError> {
        let batch = self
            .batches
            .iter_mut()
            .find(|batch| batch.batch_id == batch_id)
            .ok_or(StoreError::UnknownBatch(batch_id))?;
        batch.courier_id = Some(courier_id);
        batch.orders = orders;
        batch.state = BatchState::Assigned;
        Ok(batch.clone())
    }

    fn reset_orders(&mut self) -> usize {
        for order in &mut self.orders {
            order.state = OrderState::New;
            order.courier_id = None;
        }
        self.orders.len()
    }

    fn reset_couriers(&mut self) -> usize {
        for courier in &mut self.couriers {
            courier.available = true;
            courier.orders.clear();
        }
        self.couriers.len()
    }

    fn drop_batches(&mut self) -> usize {
        let removed = self.batches.len();
        self.batches.clear();
        removed
    }
}
