//! Crate-level error type.
//!
//! # Taxonomy
//!
//! | Error | Scope | Effect |
//! |-------|-------|--------|
//! | [`SelectionError`] configuration | combination | combination dropped, run continues |
//! | [`SelectionError::NoFeasibleCandidate`] | combination | combination dropped, run continues |
//! | [`ScheduleError`] | solution | solution marked `Infeasible`, run continues |
//!
//! Selection and schedule errors are stored in the report next to the
//! combination or solution they concern; they never abort a run and so are
//! not variants of [`PlanningError`].
//!
//! [`SelectionError`]: crate::selection::SelectionError
//! [`SelectionError::NoFeasibleCandidate`]: crate::selection::SelectionError::NoFeasibleCandidate
//! [`ScheduleError`]: crate::scheduler::ScheduleError
//! | [`PlanningError::SolutionLimitExceeded`] | strategy | strategy rejected, run continues |
//! | [`PlanningError::MalformedInput`] / [`PlanningError::InvalidInput`] | run | run aborted |

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the planning pipeline.
#[derive(Error, Debug)]
pub enum PlanningError {
    /// An upstream input is missing or unusable.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Structural validation found one or more problems.
    #[error("invalid planning input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A strategy's Cartesian product exceeds the configured ceiling.
    #[error("strategy '{strategy}' yields {count} solutions, above the limit of {limit}")]
    SolutionLimitExceeded {
        strategy: String,
        count: usize,
        limit: usize,
    },

    /// A resolved solution was asked to change state.
    #[error("solution {solution} is already {state}")]
    TerminalState { solution: usize, state: &'static str },

    /// An out-of-order state change.
    #[error("solution {solution} cannot move from {from} to {to}")]
    InvalidTransition {
        solution: usize,
        from: &'static str,
        to: &'static str,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl PlanningError {
    /// Whether this error aborts the whole planning run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::InvalidInput(_) | Self::ConfigIo(_) | Self::ConfigParse(_)
        )
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, PlanningError>;
