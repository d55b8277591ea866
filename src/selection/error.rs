//! Requirement filtering errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AssetKind;

/// Why a combination was removed from its strategy.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionError {
    /// A requirement names a column the catalog does not declare.
    #[error("{kind:?} '{type_key}': requirement on undeclared parameter '{parameter}'")]
    UnknownParameter {
        kind: AssetKind,
        type_key: String,
        parameter: String,
    },

    /// A requirement uses a comparator other than `sup`, `inf` or `equal`.
    #[error("{kind:?} '{type_key}': unknown comparator '{comparator}' on '{parameter}'")]
    UnknownComparator {
        kind: AssetKind,
        type_key: String,
        parameter: String,
        comparator: String,
    },

    /// An ordering comparator (`sup`/`inf`) was given a categorical threshold.
    #[error("{kind:?} '{type_key}': '{parameter}' cannot be ordered against '{threshold}'")]
    IncomparableThreshold {
        kind: AssetKind,
        type_key: String,
        parameter: String,
        threshold: String,
    },

    /// A slot's pool is empty after filtering.
    #[error("{kind:?} '{type_key}': no candidate satisfies the requirements")]
    NoFeasibleCandidate { kind: AssetKind, type_key: String },
}

impl SelectionError {
    /// Whether this is a configuration problem (as opposed to an empty pool).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownParameter { .. }
                | Self::UnknownComparator { .. }
                | Self::IncomparableThreshold { .. }
        )
    }
}
