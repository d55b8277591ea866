//! Input validation for planning runs.
//!
//! Checks structural integrity of phases, strategies and the metocean
//! series before anything is filtered or scheduled. Detects:
//! - Duplicate IDs
//! - Unknown predecessor references
//! - Circular predecessor dependencies (DAG validation)
//! - Empty phases, strategies and combinations
//! - Unusable metocean series
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{LogisticPhase, MetoceanSeries};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two phases, or two strategies of one phase, share an ID.
    DuplicateId,
    /// A phase references a predecessor that doesn't exist.
    InvalidPredecessor,
    /// Predecessor graph contains a cycle.
    CyclicDependency,
    /// A phase has no strategies.
    EmptyPhase,
    /// A strategy has no combinations.
    EmptyStrategy,
    /// A combination has no slots.
    EmptyCombination,
    /// A slot asks for zero units.
    InvalidQuantity,
    /// The metocean series cannot be stepped or its channels are misaligned.
    MalformedSeries,
}

impl ValidationError {
    /// Creates an error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a planning run.
///
/// Checks:
/// 1. No duplicate phase IDs
/// 2. No duplicate strategy IDs within a phase
/// 3. Every phase has a strategy, every strategy a combination, every
///    combination a slot, every slot a non-zero quantity
/// 4. All predecessor references point to existing phases
/// 5. No circular predecessor dependencies
/// 6. The series has a positive step and aligned channels
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_plan(phases: &[LogisticPhase], series: &MetoceanSeries) -> ValidationResult {
    let mut errors = Vec::new();

    let mut phase_ids = HashSet::new();
    for phase in phases {
        if !phase_ids.insert(phase.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate phase ID: {}", phase.id),
            ));
        }

        if phase.strategies.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPhase,
                format!("Phase '{}' has no strategies", phase.id),
            ));
        }

        let mut strategy_ids = HashSet::new();
        for strategy in &phase.strategies {
            if !strategy_ids.insert(strategy.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate strategy ID in phase '{}': {}", phase.id, strategy.id),
                ));
            }
            if strategy.combinations.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyStrategy,
                    format!("Strategy '{}' of phase '{}' has no combinations", strategy.id, phase.id),
                ));
            }
            for (i, combination) in strategy.combinations.iter().enumerate() {
                if combination.slots.is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::EmptyCombination,
                        format!("Combination {i} of strategy '{}' has no slots", strategy.id),
                    ));
                }
                for slot in &combination.slots {
                    if slot.quantity == 0 {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::InvalidQuantity,
                            format!(
                                "Combination {i} of strategy '{}' asks for zero '{}'",
                                strategy.id,
                                slot.type_key()
                            ),
                        ));
                    }
                }
            }
        }
    }

    // Check predecessor references
    for phase in phases {
        for pred in &phase.predecessors {
            if !phase_ids.contains(pred.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!(
                        "Phase '{}' references unknown predecessor '{}'",
                        phase.id, pred
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(phases) {
        errors.push(cycle_err);
    }

    errors.extend(validate_series(series));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_series(series: &MetoceanSeries) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if series.step().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedSeries,
            format!(
                "Metocean series needs two increasing timestamps ({} sample(s))",
                series.len()
            ),
        ));
    }
    for channel in series.misaligned_channels() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedSeries,
            format!(
                "Metocean channel {} does not match the {} timestamps",
                channel.name(),
                series.len()
            ),
        ));
    }
    errors
}

/// Orders phases so every phase follows its predecessors.
///
/// Ties are broken by declaration order. Returns indices into `phases`.
/// Phases caught in a cycle are left out; unknown predecessors are ignored.
pub fn execution_order(phases: &[LogisticPhase]) -> Vec<usize> {
    let known: HashSet<&str> = phases.iter().map(|p| p.id.as_str()).collect();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(phases.len());

    loop {
        let next = phases.iter().enumerate().find(|(_, p)| {
            !placed.contains(p.id.as_str())
                && p.predecessors
                    .iter()
                    .all(|pred| placed.contains(pred.as_str()) || !known.contains(pred.as_str()))
        });
        match next {
            Some((i, phase)) => {
                placed.insert(phase.id.as_str());
                order.push(i);
            }
            None => return order,
        }
    }
}

/// Detects cycles in the predecessor graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(phases: &[LogisticPhase]) -> Option<ValidationError> {
    // Build adjacency list: phase_id → successors
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for phase in phases {
        for pred in &phase.predecessors {
            adj.entry(pred.as_str()).or_default().push(phase.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for phase in phases {
        let node = phase.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving phase '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
