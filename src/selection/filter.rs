//! Requirement filter over a single candidate pool.
//!
//! # Semantics
//! - Requirements compose conjunctively, applied in order.
//! - `sup`: `value >= threshold`, `inf`: `value <= threshold`,
//!   `equal`: numeric or categorical equality.
//! - A missing or NaN value fails every predicate.
//! - A value of the wrong type (text vs number) fails the predicate.
//! - An unrecognized comparator is a configuration error.
//!
//! # Complexity
//! O(r * n) for r requirements over n rows.

use tracing::debug;

use super::SelectionError;
use crate::models::{AssetKind, AttributeTable, AttributeValue, Comparator, Instance, Requirement};

/// Returns a new table holding the rows of `pool` that satisfy every
/// requirement. `pool` is left untouched.
///
/// # Errors
/// - [`SelectionError::UnknownParameter`] if a requirement names a column
///   the pool does not declare.
/// - [`SelectionError::UnknownComparator`] if a requirement's comparator
///   is not `sup`, `inf` or `equal`.
/// - [`SelectionError::IncomparableThreshold`] if `sup`/`inf` is used with
///   a categorical threshold.
///
/// An empty result is not an error here; the caller decides what an empty
/// pool means.
pub fn filter(
    kind: AssetKind,
    pool: &AttributeTable,
    requirements: &[Requirement],
) -> Result<AttributeTable, SelectionError> {
    for req in requirements {
        check_requirement(kind, pool, req)?;
    }

    let mut current = pool.clone();
    for req in requirements {
        let before = current.len();
        current = current.retain_copy(|row| satisfies(row, req));
        debug!(
            type_key = %pool.name,
            requirement = %req,
            before,
            after = current.len(),
            "requirement applied"
        );
    }
    Ok(current)
}

/// Whether a single row satisfies a single requirement.
pub fn satisfies(row: &Instance, req: &Requirement) -> bool {
    let Some(value) = row.get(&req.parameter) else {
        return false;
    };
    match (&req.comparator, value, &req.threshold) {
        (Comparator::AtLeast, AttributeValue::Number(v), AttributeValue::Number(t)) => v >= t,
        (Comparator::AtMost, AttributeValue::Number(v), AttributeValue::Number(t)) => v <= t,
        (Comparator::Equal, AttributeValue::Number(v), AttributeValue::Number(t)) => v == t,
        (Comparator::Equal, AttributeValue::Text(v), AttributeValue::Text(t)) => v == t,
        _ => false,
    }
}

fn check_requirement(
    kind: AssetKind,
    pool: &AttributeTable,
    req: &Requirement,
) -> Result<(), SelectionError> {
    if !pool.has_column(&req.parameter) {
        return Err(SelectionError::UnknownParameter {
            kind,
            type_key: pool.name.clone(),
            parameter: req.parameter.clone(),
        });
    }
    if let Comparator::Unknown(name) = &req.comparator {
        return Err(SelectionError::UnknownComparator {
            kind,
            type_key: pool.name.clone(),
            parameter: req.parameter.clone(),
            comparator: name.clone(),
        });
    }
    if let (Comparator::AtLeast | Comparator::AtMost, AttributeValue::Text(t)) =
        (&req.comparator, &req.threshold)
    {
        return Err(SelectionError::IncomparableThreshold {
            kind,
            type_key: pool.name.clone(),
            parameter: req.parameter.clone(),
            threshold: t.clone(),
        });
    }
    Ok(())
}
