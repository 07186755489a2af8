//! Engine parameters used by the dispatch service.

use dispatch_core::PartitionRequest;
use serde::{Deserialize, Serialize};

/// Default number of batches requested per optimisation run.
pub const DEFAULT_GROUP_COUNT: usize = 3;
/// Default number of refinement iterations per optimisation run.
pub const DEFAULT_ITERATION_BUDGET: u64 = 1_000;

/// Partitioning parameters applied to every
/// [`optimize_orders`](crate::DispatchService::optimize_orders) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of batches to divide new orders into.
    pub group_count: usize,
    /// Refinement iterations per run.
    pub iteration_budget: u64,
    /// Seed for the partitioner's random source.
    pub seed: u64,
}

impl DispatchConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub const fn new(group_count: usize, iteration_budget: u64, seed: u64) -> Self {
        Self {
            group_count,
            iteration_budget,
            seed,
        }
    }

    /// The partition request this configuration describes.
    #[must_use]
    pub const fn request(&self) -> PartitionRequest {
        PartitionRequest::new(self.group_count, self.iteration_budget, self.seed)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_COUNT, DEFAULT_ITERATION_BUDGET, 0)
    }
}
