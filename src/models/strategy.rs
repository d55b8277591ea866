//! Logistic phases, strategies and vessel/equipment combinations.
//!
//! A logistic phase (e.g. "installation of mooring systems with
//! drag-embedment anchors") has one or more strategies. Each strategy
//! lists the combinations of vessel and equipment types able to crew it,
//! and the operation sequence it executes.

use serde::{Deserialize, Serialize};

use super::{AttributeTable, OperationSequence};

/// Vessel or equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetKind {
    /// A vessel role (AHTS, CSV, tugboat, ...).
    Vessel,
    /// An equipment role (ROV, divers, piling hammer, ...).
    Equipment,
}

impl AssetKind {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vessel => "vessel",
            Self::Equipment => "equipment",
        }
    }
}

/// One role within a combination, with its pool of eligible instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationSlot {
    /// Vessel or equipment.
    pub kind: AssetKind,
    /// Number of units of this type the role needs.
    pub quantity: u32,
    /// Eligible instances. The table name is the asset type key.
    pub candidates: AttributeTable,
}

impl CombinationSlot {
    /// Creates a vessel slot.
    pub fn vessel(quantity: u32, candidates: AttributeTable) -> Self {
        Self {
            kind: AssetKind::Vessel,
            quantity,
            candidates,
        }
    }

    /// Creates an equipment slot.
    pub fn equipment(quantity: u32, candidates: AttributeTable) -> Self {
        Self {
            kind: AssetKind::Equipment,
            quantity,
            candidates,
        }
    }

    /// Asset type key (the candidate table's name).
    pub fn type_key(&self) -> &str {
        &self.candidates.name
    }
}

/// One candidate way to crew a strategy.
///
/// Vessel slots are listed before equipment slots; the order within each
/// kind is the declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Vessel and equipment slots.
    pub slots: Vec<CombinationSlot>,
}

impl Combination {
    /// Creates an empty combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vessel slot.
    pub fn with_vessel(mut self, quantity: u32, candidates: AttributeTable) -> Self {
        self.slots.push(CombinationSlot::vessel(quantity, candidates));
        self.sort_slots();
        self
    }

    /// Adds an equipment slot.
    pub fn with_equipment(mut self, quantity: u32, candidates: AttributeTable) -> Self {
        self.slots
            .push(CombinationSlot::equipment(quantity, candidates));
        self.sort_slots();
        self
    }

    /// Vessel slots.
    pub fn vessels(&self) -> impl Iterator<Item = &CombinationSlot> {
        self.slots.iter().filter(|s| s.kind == AssetKind::Vessel)
    }

    /// Equipment slots.
    pub fn equipment(&self) -> impl Iterator<Item = &CombinationSlot> {
        self.slots.iter().filter(|s| s.kind == AssetKind::Equipment)
    }

    /// Product of the slots' candidate counts.
    ///
    /// Saturates at `usize::MAX` rather than overflowing.
    pub fn solution_count(&self) -> usize {
        if self.slots.is_empty() {
            return 0;
        }
        self.slots
            .iter()
            .fold(1usize, |acc, s| acc.saturating_mul(s.candidates.len()))
    }

    // Stable: keeps declaration order within each kind.
    fn sort_slots(&mut self) {
        self.slots.sort_by_key(|s| s.kind);
    }
}

/// One way (crewing + operation sequence) to execute a logistic phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStrategy {
    /// Strategy identifier, unique within its phase.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Candidate crewings.
    pub combinations: Vec<Combination>,
    /// Operations to execute.
    pub operations: OperationSequence,
}

impl OperationStrategy {
    /// Creates a strategy with no combinations and an empty sequence.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            combinations: Vec::new(),
            operations: OperationSequence::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a combination.
    pub fn with_combination(mut self, combination: Combination) -> Self {
        self.combinations.push(combination);
        self
    }

    /// Sets the operation sequence.
    pub fn with_operations(mut self, operations: OperationSequence) -> Self {
        self.operations = operations;
        self
    }

    /// Total number of solutions across all combinations (saturating).
    pub fn solution_count(&self) -> usize {
        self.combinations
            .iter()
            .fold(0usize, |acc, c| acc.saturating_add(c.solution_count()))
    }
}

/// A logistic phase of the installation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticPhase {
    /// Phase identifier (e.g. `"M_Drag"`).
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Alternative strategies.
    pub strategies: Vec<OperationStrategy>,
    /// Phases that must finish before this one can start.
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl LogisticPhase {
    /// Creates a phase with no strategies and no predecessors.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            strategies: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a strategy.
    pub fn with_strategy(mut self, strategy: OperationStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Adds a predecessor phase id.
    pub fn with_predecessor(mut self, phase_id: impl Into<String>) -> Self {
        self.predecessors.push(phase_id.into());
        self
    }
}
