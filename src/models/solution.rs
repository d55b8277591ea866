//! Solutions and their schedule records.
//!
//! A solution is one concrete assignment of catalog rows to the slots of
//! a combination. The schedule engine walks each solution through a small
//! state machine:
//!
//! ```text
//! Unscheduled → DurationsComputed → WindowSelected → Scheduled
//!      │                │                  │
//!      └────────────────┴──────────────────┴──────→ Infeasible
//! ```
//!
//! `Scheduled` and `Infeasible` are terminal.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AssetKind, Instance, Olc, OperationPhase, WeatherWindow, WeatherWindows};
use crate::error::PlanningError;
use crate::scheduler::ScheduleError;

/// A catalog row chosen for one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedAsset {
    /// Asset type key of the slot.
    pub type_key: String,
    /// Units of this type the slot requires.
    pub quantity: u32,
    /// The selected row.
    pub instance: Instance,
}

/// Resolved duration of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDuration {
    /// Operation description.
    pub description: String,
    /// Partition.
    pub phase: OperationPhase,
    /// Hours.
    pub hours: f64,
}

/// Per-partition duration totals of a solution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    /// Every operation, in sequence order.
    pub operations: Vec<OperationDuration>,
    /// Sum of preparation durations (hours).
    pub preparation: f64,
    /// Sum of sea durations (hours).
    pub sea: f64,
    /// Sum of demobilization durations (hours).
    pub demobilization: f64,
}

impl DurationBreakdown {
    /// Records an operation's duration under its partition.
    pub fn push(&mut self, description: impl Into<String>, phase: OperationPhase, hours: f64) {
        match phase {
            OperationPhase::Preparation => self.preparation += hours,
            OperationPhase::Sea => self.sea += hours,
            OperationPhase::Demobilization => self.demobilization += hours,
        }
        self.operations.push(OperationDuration {
            description: description.into(),
            phase,
            hours,
        });
    }

    /// Preparation + sea + demobilization.
    pub fn total(&self) -> f64 {
        self.preparation + self.sea + self.demobilization
    }
}

/// Durations plus the weather window picked to host the sea work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSelection {
    /// Resolved durations.
    pub durations: DurationBreakdown,
    /// Effective OLC of the sea operations.
    pub olc: Olc,
    /// Earliest allowed start of the sea work.
    pub start_time: f64,
    /// All windows for `olc`, shared across the strategy's solutions.
    pub weather_windows: Arc<WeatherWindows>,
    /// The chosen window.
    pub window: WeatherWindow,
}

/// Final schedule of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Effective (most restrictive) OLC across sea operations.
    pub olc: Olc,
    /// Every operation's resolved duration, in sequence order.
    pub operations: Vec<OperationDuration>,
    /// Total preparation time (hours).
    pub preparation_duration: f64,
    /// Total sea time (hours).
    pub sea_duration: f64,
    /// Total demobilization time (hours).
    pub demobilization_duration: f64,
    /// All windows for `olc`, shared across the strategy's solutions.
    pub weather_windows: Arc<WeatherWindows>,
    /// Window hosting the sea work.
    pub window: WeatherWindow,
    /// Earliest allowed start of the sea work.
    pub start_time: f64,
    /// `window.start - start_time`, never negative.
    pub waiting_time: f64,
    /// `window.start + sea_duration + demobilization_duration`.
    pub end_time: f64,
}

impl ScheduleRecord {
    /// Builds the record from a window selection.
    pub fn from_selection(selection: WindowSelection) -> Self {
        let WindowSelection {
            durations,
            olc,
            start_time,
            weather_windows,
            window,
        } = selection;
        let waiting_time = (window.start - start_time).max(0.0);
        let end_time = window.start + durations.sea + durations.demobilization;
        Self {
            olc,
            operations: durations.operations,
            preparation_duration: durations.preparation,
            sea_duration: durations.sea,
            demobilization_duration: durations.demobilization,
            weather_windows,
            window,
            start_time,
            waiting_time,
            end_time,
        }
    }

    /// Sum of all operation durations (hours), excluding waiting.
    pub fn operation_time(&self) -> f64 {
        self.preparation_duration + self.sea_duration + self.demobilization_duration
    }
}

/// Scheduling state of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleState {
    /// Nothing computed yet.
    Unscheduled,
    /// Operation durations resolved.
    DurationsComputed(DurationBreakdown),
    /// A hosting weather window was found.
    WindowSelected(WindowSelection),
    /// Terminal: schedule complete.
    Scheduled(ScheduleRecord),
    /// Terminal: the solution cannot be scheduled.
    Infeasible(ScheduleError),
}

impl ScheduleState {
    /// State name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unscheduled => "Unscheduled",
            Self::DurationsComputed(_) => "DurationsComputed",
            Self::WindowSelected(_) => "WindowSelected",
            Self::Scheduled(_) => "Scheduled",
            Self::Infeasible(_) => "Infeasible",
        }
    }

    /// Whether no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Scheduled(_) | Self::Infeasible(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Unscheduled => 0,
            Self::DurationsComputed(_) => 1,
            Self::WindowSelected(_) => 2,
            Self::Scheduled(_) | Self::Infeasible(_) => 3,
        }
    }

    /// Whether `next` is a legal successor of this state.
    ///
    /// Forward moves go one step at a time; `Infeasible` is reachable from
    /// any non-terminal state.
    pub fn can_transition_to(&self, next: &ScheduleState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Infeasible(_) => true,
            Self::Unscheduled => false,
            _ => next.rank() == self.rank() + 1,
        }
    }
}

/// A concrete vessel/equipment assignment for one strategy.
///
/// Identity is `index`: solutions are numbered densely within their
/// strategy, in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Dense index within the owning strategy.
    pub index: usize,
    /// Index of the (surviving) combination this solution instantiates.
    pub combination: usize,
    /// Selected vessels, in slot order.
    pub vessels: Vec<SelectedAsset>,
    /// Selected equipment, in slot order.
    pub equipment: Vec<SelectedAsset>,
    state: ScheduleState,
}

impl Solution {
    /// Creates an unscheduled solution.
    pub fn new(index: usize, combination: usize) -> Self {
        Self {
            index,
            combination,
            vessels: Vec::new(),
            equipment: Vec::new(),
            state: ScheduleState::Unscheduled,
        }
    }

    /// Adds a selected row under the given kind.
    pub fn with_asset(mut self, kind: AssetKind, asset: SelectedAsset) -> Self {
        match kind {
            AssetKind::Vessel => self.vessels.push(asset),
            AssetKind::Equipment => self.equipment.push(asset),
        }
        self
    }

    /// Selected assets of one kind.
    pub fn assets(&self, kind: AssetKind) -> &[SelectedAsset] {
        match kind {
            AssetKind::Vessel => &self.vessels,
            AssetKind::Equipment => &self.equipment,
        }
    }

    /// Instance ids of all selected assets, vessels first.
    pub fn instance_ids(&self) -> Vec<&str> {
        self.vessels
            .iter()
            .chain(self.equipment.iter())
            .map(|a| a.instance.id.as_str())
            .collect()
    }

    /// Current state.
    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    /// Moves to `next`.
    ///
    /// # Errors
    /// `PlanningError::TerminalState` if the solution is already resolved,
    /// `PlanningError::InvalidTransition` for any other illegal move.
    pub fn transition(&mut self, next: ScheduleState) -> Result<(), PlanningError> {
        if self.state.is_terminal() {
            return Err(PlanningError::TerminalState {
                solution: self.index,
                state: self.state.name(),
            });
        }
        if !self.state.can_transition_to(&next) {
            return Err(PlanningError::InvalidTransition {
                solution: self.index,
                from: self.state.name(),
                to: next.name(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Schedule record, once `Scheduled`.
    pub fn schedule(&self) -> Option<&ScheduleRecord> {
        match &self.state {
            ScheduleState::Scheduled(record) => Some(record),
            _ => None,
        }
    }

    /// Failure reason, once `Infeasible`.
    pub fn failure(&self) -> Option<&ScheduleError> {
        match &self.state {
            ScheduleState::Infeasible(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the solution reached `Scheduled`.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, ScheduleState::Scheduled(_))
    }

    /// Whether the solution reached `Infeasible`.
    pub fn is_infeasible(&self) -> bool {
        matches!(self.state, ScheduleState::Infeasible(_))
    }
}
