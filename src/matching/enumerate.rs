//! Cartesian enumeration of combination slots.
//!
//! # Ordering
//! Combinations are visited in declaration order. Within a combination the
//! first slot varies slowest and the last slot fastest (an odometer over
//! the slots' row indices), so slot 0 row 0 comes first. Solution indices
//! continue across combinations without gaps.
//!
//! # Complexity
//! O(total solutions × slots).

use tracing::debug;

use crate::error::PlanningError;
use crate::models::{Combination, OperationStrategy, SelectedAsset, Solution};

/// Number of solutions `enumerate` would produce (saturating).
pub fn solution_count(strategy: &OperationStrategy) -> usize {
    strategy.solution_count()
}

/// Enumerates every solution of a strategy, uncapped.
///
/// A combination with an empty slot contributes nothing; prune first to
/// have such combinations removed and reported.
pub fn enumerate(strategy: &OperationStrategy) -> Vec<Solution> {
    let mut solutions = Vec::with_capacity(strategy.solution_count().min(1 << 16));
    for (combination_index, combination) in strategy.combinations.iter().enumerate() {
        expand(combination, combination_index, &mut solutions);
    }
    debug!(
        strategy = %strategy.id,
        combinations = strategy.combinations.len(),
        solutions = solutions.len(),
        "solutions enumerated"
    );
    solutions
}

/// Enumerates a strategy's solutions after checking the product against
/// `limit`.
///
/// # Errors
/// `PlanningError::SolutionLimitExceeded` when the count is above `limit`.
/// Nothing is enumerated in that case; the result is never truncated.
pub fn enumerate_with_limit(
    strategy: &OperationStrategy,
    limit: Option<usize>,
) -> Result<Vec<Solution>, PlanningError> {
    let count = solution_count(strategy);
    if let Some(limit) = limit {
        if count > limit {
            return Err(PlanningError::SolutionLimitExceeded {
                strategy: strategy.id.clone(),
                count,
                limit,
            });
        }
    }
    Ok(enumerate(strategy))
}

fn expand(combination: &Combination, combination_index: usize, out: &mut Vec<Solution>) {
    let slots = &combination.slots;
    if slots.is_empty() || slots.iter().any(|s| s.candidates.is_empty()) {
        return;
    }

    let mut cursor = vec![0usize; slots.len()];
    loop {
        let mut solution = Solution::new(out.len(), combination_index);
        for (slot, &row) in slots.iter().zip(&cursor) {
            let Some(instance) = slot.candidates.rows.get(row) else {
                continue;
            };
            solution = solution.with_asset(
                slot.kind,
                SelectedAsset {
                    type_key: slot.type_key().to_string(),
                    quantity: slot.quantity,
                    instance: instance.clone(),
                },
            );
        }
        out.push(solution);

        // Advance the odometer, last slot fastest.
        let mut pos = slots.len();
        loop {
            if pos == 0 {
                return;
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < slots[pos].candidates.len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeTable, Instance};

    fn table(name: &str, n: usize) -> AttributeTable {
        (0..n).fold(AttributeTable::new(name), |t, i| {
            t.with_row(Instance::new(format!("{name}-{i}")))
        })
    }

    fn strategy() -> OperationStrategy {
        OperationStrategy::new("deploy")
            .with_combination(
                Combination::new()
                    .with_vessel(1, table("AHTS", 2))
                    .with_equipment(1, table("rov", 3)),
            )
            .with_combination(Combination::new().with_vessel(1, table("Multicat", 2)))
    }

    #[test]
    fn test_cardinality_is_product() {
        let sols = enumerate(&strategy());
        assert_eq!(sols.len(), 2 * 3 + 2);
        assert_eq!(solution_count(&strategy()), 8);
    }

    #[test]
    fn test_slot_major_row_major_order() {
        let sols = enumerate(&strategy());
        let ids: Vec<Vec<&str>> = sols.iter().map(|s| s.instance_ids()).collect();
        assert_eq!(ids[0], vec!["AHTS-0", "rov-0"]);
        assert_eq!(ids[1], vec!["AHTS-0", "rov-1"]);
        assert_eq!(ids[2], vec!["AHTS-0", "rov-2"]);
        assert_eq!(ids[3], vec!["AHTS-1", "rov-0"]);
        assert_eq!(ids[5], vec!["AHTS-1", "rov-2"]);
        assert_eq!(ids[6], vec!["Multicat-0"]);
        assert_eq!(ids[7], vec!["Multicat-1"]);
    }

    #[test]
    fn test_dense_indices_across_combinations() {
        let sols = enumerate(&strategy());
        for (i, s) in sols.iter().enumerate() {
            assert_eq!(s.index, i);
        }
        assert_eq!(sols[5].combination, 0);
        assert_eq!(sols[6].combination, 1);
    }

    #[test]
    fn test_single_slot_one_per_row() {
        let s = OperationStrategy::new("tow")
            .with_combination(Combination::new().with_vessel(1, table("Tugboat", 4)));
        let sols = enumerate(&s);
        assert_eq!(sols.len(), 4);
        assert!(sols.iter().all(|s| s.vessels.len() == 1 && s.equipment.is_empty()));
    }

    #[test]
    fn test_quantity_is_carried() {
        let s = OperationStrategy::new("tow")
            .with_combination(Combination::new().with_vessel(2, table("Tugboat", 1)));
        let sols = enumerate(&s);
        assert_eq!(sols[0].vessels[0].quantity, 2);
        assert_eq!(sols[0].vessels[0].type_key, "Tugboat");
    }

    #[test]
    fn test_empty_slot_yields_nothing() {
        let s = OperationStrategy::new("deploy").with_combination(
            Combination::new()
                .with_vessel(1, table("AHTS", 3))
                .with_equipment(1, table("rov", 0)),
        );
        assert!(enumerate(&s).is_empty());
        assert!(enumerate(&OperationStrategy::new("none")).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(enumerate(&strategy()), enumerate(&strategy()));
    }

    #[test]
    fn test_limit_rejects_without_truncating() {
        let err = enumerate_with_limit(&strategy(), Some(7)).unwrap_err();
        assert!(matches!(
            err,
            PlanningError::SolutionLimitExceeded { count: 8, limit: 7, .. }
        ));

        assert_eq!(enumerate_with_limit(&strategy(), Some(8)).unwrap().len(), 8);
        assert_eq!(enumerate_with_limit(&strategy(), None).unwrap().len(), 8);
    }
}
