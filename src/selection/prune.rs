//! Strategy-level pruning.
//!
//! Applies a phase's requirement catalog to every slot of every
//! combination of a strategy, producing a new strategy whose combinations
//! all have at least one candidate per slot.
//!
//! # Algorithm
//! 1. Filter each distinct candidate table once. Two slots share a result
//!    only when their kind, type name and rows are all identical.
//! 2. Rebuild the combination list, keeping a combination only if every
//!    slot's filtered pool is non-empty and no slot hit a configuration
//!    error.
//! 3. Surviving combinations are renumbered densely in original order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use super::{filter, SelectionError};
use crate::models::{
    AssetKind, AttributeTable, Combination, CombinationSlot, OperationStrategy, RequirementCatalog,
};

/// A combination removed during pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedCombination {
    /// Index of the combination in the unpruned strategy.
    pub original_index: usize,
    /// First reason found (slot order).
    pub reason: SelectionError,
}

/// Filtered pools per asset type, kept for auditing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrunedPools {
    /// Vessel type → filtered table (survivors of every table of that type).
    pub vessels: BTreeMap<String, AttributeTable>,
    /// Equipment type → filtered table (survivors of every table of that type).
    pub equipment: BTreeMap<String, AttributeTable>,
}

impl PrunedPools {
    /// Filtered table of a type, if it was filtered without error.
    pub fn get(&self, kind: AssetKind, type_key: &str) -> Option<&AttributeTable> {
        match kind {
            AssetKind::Vessel => self.vessels.get(type_key),
            AssetKind::Equipment => self.equipment.get(type_key),
        }
    }

    fn insert(&mut self, kind: AssetKind, table: AttributeTable) {
        let map = match kind {
            AssetKind::Vessel => &mut self.vessels,
            AssetKind::Equipment => &mut self.equipment,
        };
        match map.get_mut(&table.name) {
            Some(existing) => {
                existing.columns.extend(table.columns);
                for row in table.rows {
                    if existing.row(&row.id).is_none() {
                        existing.rows.push(row);
                    }
                }
            }
            None => {
                map.insert(table.name.clone(), table);
            }
        }
    }
}

/// Result of pruning one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrunedStrategy {
    /// The strategy with filtered pools and only surviving combinations.
    pub strategy: OperationStrategy,
    /// Combinations removed, with reasons.
    pub dropped: Vec<DroppedCombination>,
    /// Filtered pool per asset type.
    pub pools: PrunedPools,
}

impl PrunedStrategy {
    /// Whether at least one combination survived.
    pub fn is_viable(&self) -> bool {
        !self.strategy.combinations.is_empty()
    }
}

/// Prunes a strategy against a requirement catalog.
///
/// Never fails as a whole: configuration errors and empty pools drop the
/// affected combinations and are reported in [`PrunedStrategy::dropped`].
/// The input strategy is not modified.
pub fn prune_strategy(
    strategy: &OperationStrategy,
    catalog: &RequirementCatalog,
) -> PrunedStrategy {
    let mut cache = FilterCache::default();
    for combination in &strategy.combinations {
        for slot in &combination.slots {
            cache.filter_slot(slot, catalog);
        }
    }

    // Slot order keeps merged pools deterministic
    let mut pools = PrunedPools::default();
    for combination in &strategy.combinations {
        for slot in &combination.slots {
            if let Some(Ok(table)) = cache.get(slot) {
                pools.insert(slot.kind, table.clone());
            }
        }
    }

    let mut kept = Vec::with_capacity(strategy.combinations.len());
    let mut dropped = Vec::new();

    for (original_index, combination) in strategy.combinations.iter().enumerate() {
        match rebuild(combination, &cache) {
            Ok(c) => kept.push(c),
            Err(reason) => {
                warn!(
                    strategy = %strategy.id,
                    combination = original_index,
                    %reason,
                    "combination dropped"
                );
                dropped.push(DroppedCombination {
                    original_index,
                    reason,
                });
            }
        }
    }

    debug!(
        strategy = %strategy.id,
        kept = kept.len(),
        dropped = dropped.len(),
        "strategy pruned"
    );

    PrunedStrategy {
        strategy: OperationStrategy {
            id: strategy.id.clone(),
            description: strategy.description.clone(),
            combinations: kept,
            operations: strategy.operations.clone(),
        },
        dropped,
        pools,
    }
}

type FilterResult = Result<AttributeTable, SelectionError>;

/// Filtered tables keyed by `(kind, type)`, each remembering its source.
#[derive(Default)]
struct FilterCache<'a> {
    by_type: HashMap<(AssetKind, &'a str), Vec<(&'a AttributeTable, FilterResult)>>,
}

impl<'a> FilterCache<'a> {
    fn filter_slot(&mut self, slot: &'a CombinationSlot, catalog: &RequirementCatalog) {
        let entries = self.by_type.entry((slot.kind, slot.type_key())).or_default();
        if entries.iter().any(|(source, _)| *source == &slot.candidates) {
            return;
        }
        let reqs = catalog.for_type(slot.kind, slot.type_key());
        entries.push((&slot.candidates, filter(slot.kind, &slot.candidates, reqs)));
    }

    fn get(&self, slot: &'a CombinationSlot) -> Option<&FilterResult> {
        self.by_type
            .get(&(slot.kind, slot.type_key()))?
            .iter()
            .find(|(source, _)| *source == &slot.candidates)
            .map(|(_, result)| result)
    }
}

fn rebuild<'a>(
    combination: &'a Combination,
    cache: &FilterCache<'a>,
) -> Result<Combination, SelectionError> {
    let mut slots = Vec::with_capacity(combination.slots.len());
    for slot in &combination.slots {
        let filtered = match cache.get(slot) {
            Some(Err(err)) => return Err(err.clone()),
            Some(Ok(table)) if !table.is_empty() => table,
            _ => {
                return Err(SelectionError::NoFeasibleCandidate {
                    kind: slot.kind,
                    type_key: slot.type_key().to_string(),
                })
            }
        };
        slots.push(CombinationSlot {
            kind: slot.kind,
            quantity: slot.quantity,
            candidates: filtered.clone(),
        });
    }
    Ok(Combination { slots })
}
