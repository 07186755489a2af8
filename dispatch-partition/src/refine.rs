//! Hill-climbing refinement by single-point relocation.

use dispatch_core::{DeliveryPoint, Partition};
use log::{debug, trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::construct::nearest_group;
use crate::objective::cost;

/// Summary of a [`refine`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RefineOutcome {
    /// Iterations performed; always equal to the requested budget.
    pub iterations: u64,
    /// Relocations that strictly lowered the cost and were kept.
    pub accepted_moves: u64,
    /// Iterations with no point to move because every group was empty.
    pub skipped_iterations: u64,
    /// Cost of the partition before refinement.
    pub initial_cost: f64,
    /// Cost of the partition after refinement.
    pub best_cost: f64,
}

/// A point lifted out of `source` at `position` and appended to
/// `destination`.
#[derive(Debug, Clone, Copy)]
struct Move {
    source: usize,
    position: usize,
    destination: usize,
}

/// Improve `partition` in place with `iteration_budget` relocation attempts.
///
/// Each iteration picks a non-empty group uniformly at random, removes a
/// uniformly chosen member, and re-inserts it into its [`nearest_group`]
/// among the remaining points. The move is kept only when the recomputed
/// [`cost`] is strictly lower; otherwise the point returns to its original
/// position, leaving the partition exactly as it was. The cost therefore
/// never increases, and a budget of zero leaves the partition untouched.
///
/// All randomness comes from `rng`, so a seeded generator makes the run
/// reproducible.
///
/// # Examples
/// ```
/// use dispatch_core::{DeliveryPoint, Group, Partition};
/// use dispatch_partition::{cost, refine};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut partition = Partition::from(vec![
///     Group::from(vec![
///         DeliveryPoint::from_lat_lon("a", 0.0, 0.0, ()),
///         DeliveryPoint::from_lat_lon("b", 40.0, 40.0, ()),
///     ]),
///     Group::new(),
/// ]);
/// let before = cost(&partition);
/// let outcome = refine(&mut partition, 50, &mut ChaCha8Rng::seed_from_u64(7));
///
/// assert_eq!(outcome.initial_cost, before);
/// assert!(outcome.best_cost <= before);
/// assert_eq!(outcome.best_cost, cost(&partition));
/// ```
pub fn refine<T, R>(
    partition: &mut Partition<T>,
    iteration_budget: u64,
    rng: &mut R,
) -> RefineOutcome
where
    R: Rng + ?Sized,
{
    let initial_cost = cost(partition);
    let mut outcome = RefineOutcome {
        initial_cost,
        best_cost: initial_cost,
        ..RefineOutcome::default()
    };

    for iteration in 0..iteration_budget {
        outcome.iterations = iteration.saturating_add(1);
        let Some(relocation) = propose(partition, rng) else {
            outcome.skipped_iterations = outcome.skipped_iterations.saturating_add(1);
            continue;
        };
        if relocation.destination == relocation.source {
            undo(partition, relocation);
            continue;
        }
        let candidate_cost = cost(partition);
        if candidate_cost < outcome.best_cost {
            trace!(
                "iteration {iteration}: moved point from group {} to group {} (cost {candidate_cost})",
                relocation.source, relocation.destination
            );
            outcome.best_cost = candidate_cost;
            outcome.accepted_moves = outcome.accepted_moves.saturating_add(1);
        } else {
            undo(partition, relocation);
        }
    }

    debug!(
        "refinement finished after {} iterations: {} accepted, {} skipped, cost {} -> {}",
        outcome.iterations,
        outcome.accepted_moves,
        outcome.skipped_iterations,
        outcome.initial_cost,
        outcome.best_cost
    );
    outcome
}

/// Apply a random relocation, returning where the point came from and went.
///
/// Returns `None`, leaving the partition untouched, when every group is
/// empty.
fn propose<T, R>(partition: &mut Partition<T>, rng: &mut R) -> Option<Move>
where
    R: Rng + ?Sized,
{
    let candidates = partition.non_empty_groups();
    let source = *candidates.choose(rng)?;
    let position = rng.gen_range(0..partition.group(source)?.len());
    let point = partition.remove(source, position)?;
    // The source group still exists, so a nearest group always does.
    let destination = nearest_group(partition, &point).unwrap_or(source);
    match partition.push(destination, point) {
        Ok(()) => Some(Move {
            source,
            position,
            destination,
        }),
        Err(point) => {
            restore(partition, source, position, point);
            None
        }
    }
}

/// Reverse a relocation made by [`propose`].
fn undo<T>(partition: &mut Partition<T>, relocation: Move) {
    let Move {
        source,
        position,
        destination,
    } = relocation;
    match partition.pop(destination) {
        Some(point) => restore(partition, source, position, point),
        None => {
            warn!("group {destination} was empty while undoing a relocation");
            debug_assert!(false, "relocated point missing from group {destination}");
        }
    }
}

fn restore<T>(partition: &mut Partition<T>, group: usize, position: usize, point: DeliveryPoint<T>) {
    if let Err(lost) = partition.insert(group, position, point) {
        warn!("could not restore point {} to group {group}", lost.id);
        debug_assert!(false, "source group {group} vanished during refinement");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::Group;
    use dispatch_core::test_support::{moscow_pair_and_petersburg, point};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use crate::construct::construct;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[rstest]
    fn zero_budget_changes_nothing() {
        let mut partition = construct(moscow_pair_and_petersburg(), 2).expect("valid");
        let before = partition.clone();
        let outcome = refine(&mut partition, 0, &mut rng());
        assert_eq!(partition, before);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.accepted_moves, 0);
        assert_eq!(outcome.initial_cost, outcome.best_cost);
    }

    #[rstest]
    fn empty_partition_skips_every_iteration() {
        let mut partition: Partition<()> = Partition::with_group_count(3);
        let outcome = refine(&mut partition, 25, &mut rng());
        assert_eq!(outcome.iterations, 25);
        assert_eq!(outcome.skipped_iterations, 25);
        assert_eq!(partition.point_count(), 0);
    }

    #[rstest]
    fn refinement_reunites_the_moscow_pair() {
        let mut partition = construct(moscow_pair_and_petersburg(), 2).expect("valid");
        let outcome = refine(&mut partition, 200, &mut rng());

        let moscow_1 = partition.group_of(&"moscow-1".into());
        let moscow_2 = partition.group_of(&"moscow-2".into());
        let petersburg = partition.group_of(&"petersburg".into());
        assert_eq!(moscow_1, moscow_2);
        assert_ne!(moscow_1, petersburg);
        assert!(outcome.accepted_moves >= 1);
        assert!(outcome.best_cost < outcome.initial_cost);
        assert!(outcome.best_cost < 3.0);
    }

    #[rstest]
    fn isolated_points_stay_put() {
        // Every point is already alone, so no relocation can help.
        let mut partition = Partition::from(vec![
            Group::from(vec![point("a", 0.0, 0.0)]),
            Group::from(vec![point("b", 10.0, 10.0)]),
            Group::from(vec![point("c", -10.0, -10.0)]),
        ]);
        let before = partition.clone();
        let outcome = refine(&mut partition, 100, &mut rng());
        assert_eq!(partition, before);
        assert_eq!(outcome.accepted_moves, 0);
    }

    #[rstest]
    fn tied_cross_group_moves_are_rejected_in_place() {
        // Moving `middle` to `west` ties on the summed distance and the cost.
        let mut partition = Partition::from(vec![
            Group::from(vec![point("west", 0.0, -1.0)]),
            Group::from(vec![point("middle", 0.0, 0.0), point("east", 0.0, 1.0)]),
        ]);
        let before = partition.clone();
        let initial = cost(&partition);

        let outcome = refine(&mut partition, 500, &mut rng());

        assert_eq!(partition, before);
        assert_eq!(outcome.accepted_moves, 0);
        assert_eq!(outcome.best_cost, initial);
        assert_eq!(cost(&partition), initial);
    }

    #[rstest]
    fn reported_cost_matches_the_partition() {
        let points = (0..3_u8)
            .flat_map(|row| {
                (0..4_u8).map(move |col| {
                    point(&format!("p{row}-{col}"), f64::from(col), f64::from(row))
                })
            })
            .collect();
        let mut partition = construct(points, 3).expect("valid");
        let outcome = refine(&mut partition, 300, &mut rng());
        assert_eq!(outcome.best_cost, cost(&partition));
        assert!(outcome.best_cost <= outcome.initial_cost);
        assert_eq!(partition.point_count(), 12);
    }
}
