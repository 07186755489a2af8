//! The dispatch workflow: optimise new orders, then assign couriers.

use std::collections::HashSet;

use dispatch_core::{
    Batch, BatchId, Courier, CourierId, DispatchStore, Order, OrderState, Partitioner, PointId,
    StoreError,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{DispatchConfig, DispatchError};

/// A batch handed to a courier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Courier now carrying the batch.
    pub courier_id: CourierId,
    /// Batch that was assigned.
    pub batch_id: BatchId,
    /// Number of orders in the batch.
    pub order_count: usize,
}

/// Result of [`DispatchService::assign_couriers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    /// Courier and batch pairs, in matching order.
    pub assignments: Vec<Assignment>,
    /// Available couriers left without a batch.
    pub idle_couriers: usize,
    /// Open batches left without a courier.
    pub waiting_batches: usize,
}

/// Drives a [`Partitioner`] over the orders held by a [`DispatchStore`].
///
/// The service owns both collaborators. Callers that persist the store
/// between runs take it back with [`DispatchService::into_store`].
#[derive(Debug)]
pub struct DispatchService<S, P>
where
    S: DispatchStore,
    P: Partitioner<Order>,
{
    store: S,
    partitioner: P,
    config: DispatchConfig,
}

impl<S, P> DispatchService<S, P>
where
    S: DispatchStore,
    P: Partitioner<Order>,
{
    /// Construct a service over `store` using `partitioner`.
    #[must_use]
    pub const fn new(store: S, partitioner: P, config: DispatchConfig) -> Self {
        Self {
            store,
            partitioner,
            config,
        }
    }

    /// The configuration applied to optimisation runs.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Read access to the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service, returning the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Partition every new order into batches.
    ///
    /// Orders in the `new` state are grouped by the partitioner. Each
    /// grouped order moves to `processing`, and every non-empty group is
    /// stored as an unassigned batch carrying the updated orders. Empty
    /// groups produce no batch. Returns the created batches in group order.
    ///
    /// # Errors
    /// [`DispatchError::NoEligibleOrders`] when no order is new,
    /// [`DispatchError::Partition`] when the partitioner rejects the
    /// configuration or an order's coordinates, and
    /// [`DispatchError::Store`] when a grouped order is not in the store.
    /// The store is left untouched on error.
    pub fn optimize_orders(&mut self) -> Result<Vec<Batch>, DispatchError> {
        let eligible = self.store.orders_in_state(OrderState::New);
        if eligible.is_empty() {
            return Err(DispatchError::NoEligibleOrders);
        }
        let order_count = eligible.len();
        let points = eligible
            .into_iter()
            .map(Order::into_delivery_point)
            .collect();
        let response = self.partitioner.partition(points, &self.config.request())?;
        debug!(
            "partitioned {order_count} orders with cost {} (initial {}, {} moves accepted)",
            response.cost, response.diagnostics.initial_cost, response.diagnostics.accepted_moves
        );

        let groups = response.partition.into_groups();
        self.require_orders(
            groups
                .iter()
                .flat_map(|group| group.iter().map(|point| &point.id)),
        )?;

        let mut batches = Vec::new();
        for (index, group) in groups.into_iter().enumerate() {
            if group.is_empty() {
                debug!("group {index} is empty; no batch created");
                continue;
            }
            let mut orders = Vec::with_capacity(group.len());
            for point in group.into_points() {
                let order = self.store.set_order_state(&point.id, OrderState::Processing)?;
                orders.push(order);
            }
            batches.push(self.store.insert_batch(orders));
        }
        info!(
            "created {} batches from {order_count} new orders",
            batches.len()
        );
        Ok(batches)
    }

    /// Hand open batches to available couriers, first come first served.
    ///
    /// Available couriers and open batches are paired in store order. For
    /// each pair the batch's orders are assigned to the courier, the
    /// courier becomes unavailable carrying those orders, and the batch
    /// records its courier. Unpaired couriers or batches are left as they
    /// are and counted in the summary.
    ///
    /// # Errors
    /// [`DispatchError::NoAssignmentCandidates`] when no pair can be formed
    /// and [`DispatchError::Store`] when a paired courier, batch or batch
    /// order is not in the store. Every pair is checked before any update,
    /// so the store is left untouched on error.
    pub fn assign_couriers(&mut self) -> Result<AssignmentSummary, DispatchError> {
        let couriers = self.store.available_couriers();
        let batches = self.store.open_batches();
        if couriers.is_empty() || batches.is_empty() {
            return Err(DispatchError::NoAssignmentCandidates {
                available_couriers: couriers.len(),
                open_batches: batches.len(),
            });
        }

        let idle_couriers = couriers.len().saturating_sub(batches.len());
        let waiting_batches = batches.len().saturating_sub(couriers.len());
        if idle_couriers > 0 {
            warn!("{idle_couriers} available couriers have no batch to carry");
        }
        if waiting_batches > 0 {
            warn!("{waiting_batches} batches are still waiting for a courier");
        }

        let pairs: Vec<_> = couriers.into_iter().zip(batches).collect();
        self.require_pairs(&pairs)?;

        let mut assignments = Vec::with_capacity(pairs.len());
        for (courier, batch) in pairs {
            let courier_id = courier.courier_id;
            let mut orders = Vec::with_capacity(batch.orders.len());
            for order in &batch.orders {
                orders.push(self.store.assign_order(&order.location, courier_id)?);
            }
            let order_count = orders.len();
            self.store.update_courier(courier_id, false, orders.clone())?;
            self.store.assign_batch(batch.batch_id, courier_id, orders)?;
            debug!(
                "courier {courier_id} takes batch {} with {order_count} orders",
                batch.batch_id
            );
            assignments.push(Assignment {
                courier_id,
                batch_id: batch.batch_id,
                order_count,
            });
        }
        Ok(AssignmentSummary {
            assignments,
            idle_couriers,
            waiting_batches,
        })
    }

    /// Return every order to `new` without a courier.
    /// Returns the number of orders touched.
    pub fn reset_orders(&mut self) -> usize {
        let count = self.store.reset_orders();
        info!("reset {count} orders");
        count
    }

    /// Make every courier available and empty-handed.
    /// Returns the number of couriers touched.
    pub fn reset_couriers(&mut self) -> usize {
        let count = self.store.reset_couriers();
        info!("reset {count} couriers");
        count
    }

    /// Delete every batch. Returns the number removed.
    pub fn reset_batches(&mut self) -> usize {
        let count = self.store.drop_batches();
        info!("dropped {count} batches");
        count
    }

    fn require_orders<'a, I>(&self, locations: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = &'a PointId>,
    {
        let known: HashSet<PointId> = self
            .store
            .orders()
            .into_iter()
            .map(|order| order.location)
            .collect();
        locations
            .into_iter()
            .find(|location| !known.contains(*location))
            .map_or(Ok(()), |missing| Err(StoreError::UnknownOrder(missing.clone())))
    }

    fn require_pairs(&self, pairs: &[(Courier, Batch)]) -> Result<(), StoreError> {
        let couriers: HashSet<CourierId> = self
            .store
            .couriers()
            .iter()
            .map(|courier| courier.courier_id)
            .collect();
        let batches: HashSet<BatchId> = self
            .store
            .batches()
            .iter()
            .map(|batch| batch.batch_id)
            .collect();
        for (courier, batch) in pairs {
            if !couriers.contains(&courier.courier_id) {
                return Err(StoreError::UnknownCourier(courier.courier_id));
            }
            if !batches.contains(&batch.batch_id) {
                return Err(StoreError::UnknownBatch(batch.batch_id));
            }
        }
        self.require_orders(
            pairs
                .iter()
                .flat_map(|(_, batch)| batch.orders.iter().map(|order| &order.location)),
        )
    }
}
