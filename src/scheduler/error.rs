//! Per-solution scheduling failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AssetKind;

/// Why a solution ended `Infeasible`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleError {
    /// The series has no permitted step under the effective OLC.
    #[error("no weather window under the effective OLC")]
    NoWeatherWindow,

    /// Windows exist, but none starts late enough and lasts long enough.
    #[error("no weather window starts at or after {start_time} h and lasts {sea_duration} h")]
    ScheduleInfeasible { start_time: f64, sea_duration: f64 },

    /// A lookup field is absent from every selected row of that kind.
    #[error("operation '{operation}': no selected {kind:?} carries '{field}'")]
    MissingAttribute {
        operation: String,
        kind: AssetKind,
        field: String,
    },

    /// A parameter lookup names an unconfigured parameter.
    #[error("operation '{operation}': parameter '{name}' is not configured")]
    MissingParameter { operation: String, name: String },

    /// A transit speed is zero, negative or not finite.
    #[error("operation '{operation}': vessel '{vessel}' has unusable speed {speed} m/s")]
    InvalidSpeed {
        operation: String,
        vessel: String,
        speed: f64,
    },

    /// The distance provider could not measure a leg.
    #[error("distance unavailable: {reason}")]
    Geometry { reason: String },

    /// A resolved duration is negative or not finite.
    #[error("operation '{operation}': invalid duration {hours} h")]
    InvalidDuration { operation: String, hours: f64 },

    /// A predecessor phase has no scheduled solution to start after.
    #[error("predecessor phase '{phase}' has no scheduled solution")]
    PredecessorUnscheduled { phase: String },
}

impl ScheduleError {
    /// Whether the failure comes from the sea state rather than the data.
    ///
    /// Distinguishes "fits but cannot be scheduled" from everything else.
    pub fn is_weather(&self) -> bool {
        matches!(self, Self::NoWeatherWindow | Self::ScheduleInfeasible { .. })
    }
}
