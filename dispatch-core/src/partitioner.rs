use std::time::Duration;

use thiserror::Error;

use crate::{DeliveryPoint, Partition, PointId};

/// Parameters for a partitioning run.
///
/// The request captures the number of groups to produce, the fixed number of
/// local-search iterations, and a seed for the random source so that runs
/// are reproducible.
///
/// # Examples
/// ```rust
/// use dispatch_core::PartitionRequest;
///
/// let request = PartitionRequest::new(3, 1000, 7);
/// assert!(request.validate().is_ok());
/// assert!(PartitionRequest::new(0, 10, 7).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionRequest {
    /// Number of groups in the resulting partition. Must be at least one.
    pub group_count: usize,
    /// Number of refinement iterations to run. Zero skips refinement.
    pub iteration_budget: u64,
    /// Seed for the random source driving refinement.
    pub seed: u64,
}

impl PartitionRequest {
    /// Construct a request.
    #[must_use]
    pub const fn new(group_count: usize, iteration_budget: u64, seed: u64) -> Self {
        Self {
            group_count,
            iteration_budget,
            seed,
        }
    }

    /// Check the request parameters.
    ///
    /// The iteration budget is unsigned, so only the group count can be
    /// invalid.
    pub const fn validate(&self) -> Result<(), PartitionError> {
        if self.group_count == 0 {
            return Err(PartitionError::ZeroGroupCount);
        }
        Ok(())
    }

    /// Check the request and every point's coordinates.
    ///
    /// Points are checked in input order and the first offender is reported.
    pub fn validate_with_points<T>(&self, points: &[DeliveryPoint<T>]) -> Result<(), PartitionError> {
        self.validate()?;
        validate_points(points)
    }
}

/// Reject points whose coordinates are non-finite or outside WGS84 ranges.
pub fn validate_points<T>(points: &[DeliveryPoint<T>]) -> Result<(), PartitionError> {
    match points.iter().find(|point| !point.has_valid_coordinates()) {
        Some(point) => Err(PartitionError::CoordinateOutOfRange {
            id: point.id.clone(),
            latitude: point.latitude(),
            longitude: point.longitude(),
        }),
        None => Ok(()),
    }
}

/// Errors returned by [`Partitioner::partition`].
///
/// All variants describe invalid arguments and are raised before any work
/// begins. An empty point set is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    /// The request asked for zero groups.
    #[error("group count must be at least one")]
    ZeroGroupCount,
    /// A point lies outside latitude `[-90, 90]` or longitude `[-180, 180]`,
    /// or has a non-finite coordinate.
    #[error("point {id} has out-of-range coordinates (latitude {latitude}, longitude {longitude})")]
    CoordinateOutOfRange {
        /// Identity of the offending point.
        id: PointId,
        /// Reported latitude in degrees.
        latitude: f64,
        /// Reported longitude in degrees.
        longitude: f64,
    },
}

/// Runtime statistics from a partitioning run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent partitioning.
    pub solve_time: Duration,
    /// Objective value after greedy construction, before refinement.
    pub initial_cost: f64,
    /// Refinement iterations executed.
    pub iterations: u64,
    /// Refinement moves that strictly improved the objective.
    pub accepted_moves: u64,
    /// Iterations skipped because every group was empty.
    pub skipped_iterations: u64,
}

/// Result of a successful partitioning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionResponse<T> {
    /// The groups, covering every input point exactly once.
    pub partition: Partition<T>,
    /// Objective value of the returned partition.
    pub cost: f64,
    /// Statistics describing the run.
    pub diagnostics: Diagnostics,
}

/// Divide delivery points into a fixed number of groups.
///
/// Implementations take ownership of the points and hand the same values
/// back inside the partition. They should return
/// [`PartitionError`] for invalid arguments rather than panicking, and own
/// no mutable state shared between calls so they can be used across
/// threads.
pub trait Partitioner<T>: Send + Sync {
    /// Partition `points` according to `request`.
    fn partition(
        &self,
        points: Vec<DeliveryPoint<T>>,
        request: &PartitionRequest,
    ) -> Result<PartitionResponse<T>, PartitionError>;
}
