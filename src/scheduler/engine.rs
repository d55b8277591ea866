//! Per-solution schedule engine.
//!
//! Resolves every operation's duration for a concrete solution, then
//! places the sea work in the first weather window that can host it.
//!
//! # Algorithm
//! 1. Resolve each operation in sequence order by its [`DurationMode`]
//!    and sum per partition.
//! 2. `start_time = phase_start + preparation`.
//! 3. Pick the first window with `start >= start_time` and
//!    `duration >= sea`.
//! 4. `waiting = window.start - start_time`,
//!    `end = window.start + sea + demobilization`.
//!
//! # Duration Modes
//!
//! | Mode | Hours |
//! |------|-------|
//! | `Fixed` | the given value |
//! | `Distance` | `km / (3.6 × speed)`, lead (first) vessel's speed |
//! | `Transit` | `km / (3.6 × speed)`, slowest vessel's speed |
//! | `Lookup` vessel/equipment field | max across the selected rows of that kind |
//! | `Lookup` parameter | configured value |

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{DistanceProvider, PlanarUtmDistance, ScheduleError};
use crate::config::{PlannerConfig, DEFAULT_SPEED_FIELD};
use crate::error::PlanningError;
use crate::models::{
    AssetKind, DurationBreakdown, DurationMode, LookupSource, Olc, OperationDescriptor,
    OperationSequence, ScheduleRecord, ScheduleState, Solution, UtmPoint, WeatherWindows,
    WindowSelection,
};

/// m/s → km/h.
const MS_TO_KMH: f64 = 3.6;

/// What a strategy's solutions are scheduled against.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleContext<'a> {
    /// Operation sequence of the strategy.
    pub operations: &'a OperationSequence,
    /// Effective OLC of the sea operations.
    pub olc: Olc,
    /// Weather windows detected for `olc`, shared with every record.
    pub weather: &'a Arc<WeatherWindows>,
    /// Time the phase may begin (project start or predecessors' end).
    pub phase_start: f64,
}

impl<'a> ScheduleContext<'a> {
    /// Creates a context; the OLC is derived from the sea operations.
    pub fn new(
        operations: &'a OperationSequence,
        weather: &'a Arc<WeatherWindows>,
        phase_start: f64,
    ) -> Self {
        Self {
            operations,
            olc: operations.effective_olc(),
            weather,
            phase_start,
        }
    }
}

/// Computes durations and weather placement for solutions.
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    distance: Arc<dyn DistanceProvider>,
    speed_field: String,
    parameters: BTreeMap<String, f64>,
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new(Arc::new(PlanarUtmDistance))
    }
}

impl ScheduleEngine {
    /// Creates an engine with the default speed field and no parameters.
    pub fn new(distance: Arc<dyn DistanceProvider>) -> Self {
        Self {
            distance,
            speed_field: DEFAULT_SPEED_FIELD.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    /// Creates an engine taking speed field and parameters from `config`.
    pub fn from_config(config: &PlannerConfig, distance: Arc<dyn DistanceProvider>) -> Self {
        Self {
            distance,
            speed_field: config.transit_speed_field.clone(),
            parameters: config.parameters.clone(),
        }
    }

    /// Sets the vessel column holding transit speed (m/s).
    pub fn with_speed_field(mut self, field: impl Into<String>) -> Self {
        self.speed_field = field.into();
        self
    }

    /// Adds a parameter for `Lookup::Parameter` operations.
    pub fn with_parameter(mut self, name: impl Into<String>, hours: f64) -> Self {
        self.parameters.insert(name.into(), hours);
        self
    }

    /// Resolves every operation of `operations` for `solution`.
    pub fn compute_durations(
        &self,
        solution: &Solution,
        operations: &OperationSequence,
    ) -> Result<DurationBreakdown, ScheduleError> {
        let mut breakdown = DurationBreakdown::default();
        for (phase, op) in operations.iter() {
            let hours = self.operation_hours(solution, op)?;
            breakdown.push(op.description.clone(), phase, hours);
        }
        Ok(breakdown)
    }

    /// Resolves one operation's duration (hours) for `solution`.
    pub fn operation_hours(
        &self,
        solution: &Solution,
        op: &OperationDescriptor,
    ) -> Result<f64, ScheduleError> {
        let hours = match &op.duration {
            DurationMode::Fixed { hours } => *hours,
            DurationMode::Distance { from, to } => {
                let speed = self.lead_speed(solution, &op.description)?;
                self.leg_hours(from, to, speed)?
            }
            DurationMode::Transit { from, to } => {
                let speed = self.slowest_speed(solution, &op.description)?;
                self.leg_hours(from, to, speed)?
            }
            DurationMode::Lookup(LookupSource::VesselField { field }) => {
                max_field(solution, AssetKind::Vessel, field, &op.description)?
            }
            DurationMode::Lookup(LookupSource::EquipmentField { field }) => {
                max_field(solution, AssetKind::Equipment, field, &op.description)?
            }
            DurationMode::Lookup(LookupSource::Parameter { name }) => self
                .parameters
                .get(name)
                .copied()
                .ok_or_else(|| ScheduleError::MissingParameter {
                    operation: op.description.clone(),
                    name: name.clone(),
                })?,
        };

        if !hours.is_finite() || hours < 0.0 {
            return Err(ScheduleError::InvalidDuration {
                operation: op.description.clone(),
                hours,
            });
        }
        Ok(hours)
    }

    /// Picks the window hosting the sea work.
    pub fn select_window(
        &self,
        durations: DurationBreakdown,
        ctx: &ScheduleContext<'_>,
    ) -> Result<WindowSelection, ScheduleError> {
        if ctx.weather.is_empty() {
            return Err(ScheduleError::NoWeatherWindow);
        }
        let start_time = ctx.phase_start + durations.preparation;
        let window = ctx
            .weather
            .first_fit(start_time, durations.sea)
            .copied()
            .ok_or(ScheduleError::ScheduleInfeasible {
                start_time,
                sea_duration: durations.sea,
            })?;
        Ok(WindowSelection {
            durations,
            olc: ctx.olc,
            start_time,
            weather_windows: Arc::clone(ctx.weather),
            window,
        })
    }

    /// Computes the full schedule of `solution` without touching its state.
    pub fn schedule(
        &self,
        solution: &Solution,
        ctx: &ScheduleContext<'_>,
    ) -> Result<ScheduleRecord, ScheduleError> {
        let durations = self.compute_durations(solution, ctx.operations)?;
        let selection = self.select_window(durations, ctx)?;
        Ok(ScheduleRecord::from_selection(selection))
    }

    /// Drives `solution` to a terminal state.
    ///
    /// Scheduling failures end in `Infeasible` and are not returned as
    /// errors.
    ///
    /// # Errors
    /// `PlanningError::TerminalState` if the solution was already resolved.
    pub fn apply(&self, solution: &mut Solution, ctx: &ScheduleContext<'_>) -> Result<(), PlanningError> {
        if solution.state().is_terminal() {
            return Err(PlanningError::TerminalState {
                solution: solution.index,
                state: solution.state().name(),
            });
        }

        let durations = match self.compute_durations(solution, ctx.operations) {
            Ok(d) => d,
            Err(err) => return Self::reject(solution, err),
        };
        solution.transition(ScheduleState::DurationsComputed(durations.clone()))?;

        let selection = match self.select_window(durations, ctx) {
            Ok(s) => s,
            Err(err) => return Self::reject(solution, err),
        };
        solution.transition(ScheduleState::WindowSelected(selection.clone()))?;

        let record = ScheduleRecord::from_selection(selection);
        debug!(
            solution = solution.index,
            start = record.window.start,
            waiting = record.waiting_time,
            end = record.end_time,
            "solution scheduled"
        );
        solution.transition(ScheduleState::Scheduled(record))
    }

    /// Marks `solution` infeasible.
    pub fn reject(solution: &mut Solution, reason: ScheduleError) -> Result<(), PlanningError> {
        warn!(solution = solution.index, %reason, "solution infeasible");
        solution.transition(ScheduleState::Infeasible(reason))
    }

    fn leg_hours(&self, from: &UtmPoint, to: &UtmPoint, speed_ms: f64) -> Result<f64, ScheduleError> {
        let km = self.distance.distance_km(from, to)?;
        Ok(km / (MS_TO_KMH * speed_ms))
    }

    fn vessel_speed(&self, solution: &Solution, index: usize, operation: &str) -> Result<f64, ScheduleError> {
        let missing = || ScheduleError::MissingAttribute {
            operation: operation.to_string(),
            kind: AssetKind::Vessel,
            field: self.speed_field.clone(),
        };
        let vessel = solution.vessels.get(index).ok_or_else(missing)?;
        let speed = vessel.instance.number(&self.speed_field).ok_or_else(missing)?;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ScheduleError::InvalidSpeed {
                operation: operation.to_string(),
                vessel: vessel.instance.id.clone(),
                speed,
            });
        }
        Ok(speed)
    }

    fn lead_speed(&self, solution: &Solution, operation: &str) -> Result<f64, ScheduleError> {
        self.vessel_speed(solution, 0, operation)
    }

    fn slowest_speed(&self, solution: &Solution, operation: &str) -> Result<f64, ScheduleError> {
        if solution.vessels.is_empty() {
            return self.lead_speed(solution, operation);
        }
        let mut slowest = f64::INFINITY;
        for index in 0..solution.vessels.len() {
            slowest = slowest.min(self.vessel_speed(solution, index, operation)?);
        }
        Ok(slowest)
    }
}

// Rows lacking the field are skipped; at least one must carry it.
fn max_field(
    solution: &Solution,
    kind: AssetKind,
    field: &str,
    operation: &str,
) -> Result<f64, ScheduleError> {
    solution
        .assets(kind)
        .iter()
        .filter_map(|a| a.instance.number(field))
        .reduce(f64::max)
        .ok_or_else(|| ScheduleError::MissingAttribute {
            operation: operation.to_string(),
            kind,
            field: field.to_string(),
        })
}
