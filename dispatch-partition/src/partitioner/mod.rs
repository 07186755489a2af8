//! Greedy construction followed by hill-climbing refinement.
//!
//! [`partition`] is the plain entry point for callers that own their random
//! source. [`HillClimbPartitioner`] wraps the same pipeline behind the
//! [`Partitioner`] trait, seeding a `ChaCha8` generator from the request so
//! results are reproducible.

use std::time::Instant;

use dispatch_core::{
    DeliveryPoint, Diagnostics, Partition, PartitionError, PartitionRequest, PartitionResponse,
    Partitioner, validate_points,
};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::construct::construct;
use crate::refine::{RefineOutcome, refine};

/// Divide `points` into `group_count` groups of nearby points.
///
/// Points are placed greedily by [`construct`] and the result is improved
/// by `iteration_budget` rounds of [`refine`] driven by `rng`. Every input point appears in
/// exactly one group of the result. Zero points yield `group_count` empty
/// groups.
///
/// # Errors
/// Returns [`PartitionError::ZeroGroupCount`] when `group_count` is zero and
/// [`PartitionError::CoordinateOutOfRange`] for the first point whose
/// coordinates are not a valid latitude and longitude. Nothing is computed
/// when validation fails.
///
/// # Examples
/// ```
/// use dispatch_core::DeliveryPoint;
/// use dispatch_partition::partition;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// # fn main() -> Result<(), dispatch_core::PartitionError> {
/// let points = vec![
///     DeliveryPoint::from_lat_lon("moscow-1", 55.75, 37.61, ()),
///     DeliveryPoint::from_lat_lon("moscow-2", 55.76, 37.62, ()),
///     DeliveryPoint::from_lat_lon("petersburg", 59.93, 30.31, ()),
/// ];
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let groups = partition(points, 2, 200, &mut rng)?;
///
/// assert_eq!(groups.point_count(), 3);
/// assert_eq!(
///     groups.group_of(&"moscow-1".into()),
///     groups.group_of(&"moscow-2".into()),
/// );
/// # Ok(())
/// # }
/// ```
pub fn partition<T, R>(
    points: Vec<DeliveryPoint<T>>,
    group_count: usize,
    iteration_budget: u64,
    rng: &mut R,
) -> Result<Partition<T>, PartitionError>
where
    R: Rng + ?Sized,
{
    run(points, group_count, iteration_budget, rng).map(|(result, _)| result)
}

fn run<T, R>(
    points: Vec<DeliveryPoint<T>>,
    group_count: usize,
    iteration_budget: u64,
    rng: &mut R,
) -> Result<(Partition<T>, RefineOutcome), PartitionError>
where
    R: Rng + ?Sized,
{
    if group_count == 0 {
        return Err(PartitionError::ZeroGroupCount);
    }
    validate_points(&points)?;
    let mut result = construct(points, group_count)?;
    let outcome = refine(&mut result, iteration_budget, rng);
    Ok((result, outcome))
}

/// [`Partitioner`] running greedy construction and hill-climbing refinement.
///
/// The random source is a `ChaCha8` generator seeded from
/// [`PartitionRequest::seed`], so identical requests over identical points
/// produce identical partitions.
///
/// # Examples
/// ```
/// use dispatch_core::{DeliveryPoint, PartitionRequest, Partitioner};
/// use dispatch_partition::HillClimbPartitioner;
///
/// # fn main() -> Result<(), dispatch_core::PartitionError> {
/// let points = vec![
///     DeliveryPoint::from_lat_lon("a", 55.75, 37.61, "first"),
///     DeliveryPoint::from_lat_lon("b", 55.76, 37.62, "second"),
/// ];
/// let response = HillClimbPartitioner::new().partition(points, &PartitionRequest::new(5, 100, 3))?;
///
/// assert_eq!(response.partition.non_empty_groups().len(), 2);
/// assert_eq!(response.cost, 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbPartitioner;

impl HillClimbPartitioner {
    /// Construct the partitioner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<T> Partitioner<T> for HillClimbPartitioner {
    fn partition(
        &self,
        points: Vec<DeliveryPoint<T>>,
        request: &PartitionRequest,
    ) -> Result<PartitionResponse<T>, PartitionError> {
        request.validate()?;
        let started_at = Instant::now();
        let point_count = points.len();
        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
        let (result, outcome) = run(
            points,
            request.group_count,
            request.iteration_budget,
            &mut rng,
        )?;
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            initial_cost: outcome.initial_cost,
            iterations: outcome.iterations,
            accepted_moves: outcome.accepted_moves,
            skipped_iterations: outcome.skipped_iterations,
        };
        debug!(
            "partitioned {point_count} points into {} groups in {:?} (seed {})",
            request.group_count, diagnostics.solve_time, request.seed
        );
        Ok(PartitionResponse {
            partition: result,
            cost: outcome.best_cost,
            diagnostics,
        })
    }
}
