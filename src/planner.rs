//! End-to-end planning pipeline.
//!
//! For every phase, in predecessor order, and every strategy of the phase:
//! prune the candidate pools, enumerate solutions, detect weather windows
//! for the strategy's effective OLC, and schedule each solution.
//!
//! # Phase Timing
//!
//! | Phase | `phase_start` |
//! |-------|---------------|
//! | no predecessors | `PlannerConfig::project_start` |
//! | with predecessors | latest predecessor end |
//!
//! A phase ends at the earliest `end_time` among its scheduled solutions.
//! When a predecessor has none, the dependent phase's solutions are marked
//! `Infeasible` with `PredecessorUnscheduled`.
//!
//! # Usage
//!
//! ```
//! use u_logistics::config::PlannerConfig;
//! use u_logistics::models::*;
//! use u_logistics::planner::{Planner, PlanningInput};
//!
//! let ahts = AttributeTable::new("AHTS")
//!     .with_row(Instance::new("A1").with("Bollard pull [t]", 150.0));
//! let phase = LogisticPhase::new("M_Drag").with_strategy(
//!     OperationStrategy::new("deploy")
//!         .with_combination(Combination::new().with_vessel(1, ahts))
//!         .with_operations(OperationSequence::new().with_sea(
//!             OperationDescriptor::fixed("Anchor drop", 3.0)
//!                 .with_olc(Olc::unconstrained().with_hs(2.0)),
//!         )),
//! );
//! let input = PlanningInput::new(
//!     vec![phase],
//!     MetoceanSeries::hourly_hs(0.0, 1.0, vec![1.0, 2.0, 3.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0]),
//! );
//!
//! let report = Planner::new(PlannerConfig::new().with_project_start(5.0))
//!     .run(&input)
//!     .unwrap();
//! assert_eq!(report.phases[0].end_time(), Some(9.0));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{info, info_span, warn};

use crate::config::PlannerConfig;
use crate::error::{PlanningError, Result};
use crate::matching::enumerate_with_limit;
use crate::models::{
    LogisticPhase, MetoceanSeries, Olc, OperationStrategy, RequirementCatalog, Solution,
    WeatherWindows,
};
use crate::scheduler::{
    DistanceProvider, PlanKpi, PlanarUtmDistance, ScheduleContext, ScheduleEngine, ScheduleError,
};
use crate::selection::{prune_strategy, DroppedCombination, PrunedPools};
use crate::validation::{execution_order, validate_plan};
use crate::weather::detect;

/// Everything a planning run consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningInput {
    /// Logistic phases, in declaration order.
    pub phases: Vec<LogisticPhase>,
    /// Requirement catalog per phase id. A missing entry means no
    /// requirements.
    #[serde(default)]
    pub requirements: BTreeMap<String, RequirementCatalog>,
    /// Sea-state observations.
    pub metocean: MetoceanSeries,
}

impl PlanningInput {
    /// Creates an input with no requirements.
    pub fn new(phases: Vec<LogisticPhase>, metocean: MetoceanSeries) -> Self {
        Self {
            phases,
            requirements: BTreeMap::new(),
            metocean,
        }
    }

    /// Sets the requirement catalog of a phase.
    pub fn with_requirements(mut self, phase_id: impl Into<String>, catalog: RequirementCatalog) -> Self {
        self.requirements.insert(phase_id.into(), catalog);
        self
    }
}

/// Outcome of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Strategy id.
    pub strategy_id: String,
    /// Filtered pool of every asset type.
    pub pools: PrunedPools,
    /// Combinations removed by filtering.
    pub dropped: Vec<DroppedCombination>,
    /// Effective OLC of the sea operations.
    pub olc: Olc,
    /// Weather windows for `olc`, shared with every schedule record.
    pub weather: Arc<WeatherWindows>,
    /// Every enumerated solution, scheduled or infeasible.
    pub solutions: Vec<Solution>,
    /// Why the strategy was not enumerated, if it was rejected.
    pub rejected: Option<String>,
}

impl StrategyReport {
    /// Solutions that reached `Scheduled`.
    pub fn scheduled(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter().filter(|s| s.is_scheduled())
    }

    /// Solutions that reached `Infeasible`.
    pub fn infeasible(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter().filter(|s| s.is_infeasible())
    }

    /// Scheduled solution with the earliest end time (lowest index on ties).
    pub fn earliest_finish(&self) -> Option<&Solution> {
        self.scheduled().fold(None, |best: Option<&Solution>, s| match best {
            Some(b) if end_of(b) <= end_of(s) => Some(b),
            _ => Some(s),
        })
    }
}

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Phase id.
    pub phase_id: String,
    /// Time the phase could begin.
    pub phase_start: f64,
    /// One report per strategy, in declaration order.
    pub strategies: Vec<StrategyReport>,
}

impl PhaseReport {
    /// Earliest end time among scheduled solutions.
    pub fn end_time(&self) -> Option<f64> {
        self.best().map(|(_, s)| end_of(s))
    }

    /// Earliest-finishing scheduled solution and its strategy id.
    pub fn best(&self) -> Option<(&str, &Solution)> {
        self.strategies
            .iter()
            .filter_map(|r| r.earliest_finish().map(|s| (r.strategy_id.as_str(), s)))
            .fold(None, |best: Option<(&str, &Solution)>, cur| match best {
                Some(b) if end_of(b.1) <= end_of(cur.1) => Some(b),
                _ => Some(cur),
            })
    }

    /// Report of one strategy.
    pub fn strategy(&self, strategy_id: &str) -> Option<&StrategyReport> {
        self.strategies.iter().find(|r| r.strategy_id == strategy_id)
    }
}

/// Outcome of a planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningReport {
    /// Phase reports, in execution order.
    pub phases: Vec<PhaseReport>,
}

impl PlanningReport {
    /// Report of one phase.
    pub fn phase(&self, phase_id: &str) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase_id == phase_id)
    }

    /// Summary metrics.
    pub fn kpi(&self) -> PlanKpi {
        PlanKpi::calculate(self)
    }
}

/// Runs the planning pipeline.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    engine: ScheduleEngine,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl Planner {
    /// Creates a planner measuring legs with [`PlanarUtmDistance`].
    pub fn new(config: PlannerConfig) -> Self {
        let engine = ScheduleEngine::from_config(&config, Arc::new(PlanarUtmDistance));
        Self { config, engine }
    }

    /// Replaces the distance provider.
    pub fn with_distance(mut self, provider: impl DistanceProvider + 'static) -> Self {
        self.engine = ScheduleEngine::from_config(&self.config, Arc::new(provider));
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs every phase of `input`.
    ///
    /// # Errors
    /// - `PlanningError::InvalidInput` if validation finds any problem.
    /// - `PlanningError::MalformedInput` if a strategy's OLC constrains a
    ///   channel the series lacks.
    ///
    /// Per-combination, per-strategy and per-solution failures are
    /// reported inside the returned report.
    pub fn run(&self, input: &PlanningInput) -> Result<PlanningReport> {
        validate_plan(&input.phases, &input.metocean).map_err(PlanningError::InvalidInput)?;

        let no_requirements = RequirementCatalog::default();
        let mut ends: HashMap<&str, Option<f64>> = HashMap::new();
        let mut report = PlanningReport::default();

        for index in execution_order(&input.phases) {
            let phase = &input.phases[index];
            let _span = info_span!("phase", id = %phase.id).entered();

            let mut phase_start = self.config.project_start;
            let mut blocked_by = None;
            for pred in &phase.predecessors {
                match ends.get(pred.as_str()).copied().flatten() {
                    Some(end) => phase_start = phase_start.max(end),
                    None => {
                        blocked_by.get_or_insert_with(|| pred.clone());
                    }
                }
            }
            if let Some(pred) = &blocked_by {
                warn!(predecessor = %pred, "predecessor has no scheduled solution");
            }

            let catalog = input.requirements.get(&phase.id).unwrap_or(&no_requirements);
            let mut strategies = Vec::with_capacity(phase.strategies.len());
            for strategy in &phase.strategies {
                strategies.push(self.run_strategy(
                    strategy,
                    catalog,
                    &input.metocean,
                    phase_start,
                    blocked_by.as_deref(),
                )?);
            }

            let phase_report = PhaseReport {
                phase_id: phase.id.clone(),
                phase_start,
                strategies,
            };
            let end = phase_report.end_time();
            info!(start = phase_start, end = ?end, "phase planned");
            ends.insert(phase.id.as_str(), end);
            report.phases.push(phase_report);
        }

        Ok(report)
    }

    fn run_strategy(
        &self,
        strategy: &OperationStrategy,
        catalog: &RequirementCatalog,
        metocean: &MetoceanSeries,
        phase_start: f64,
        blocked_by: Option<&str>,
    ) -> Result<StrategyReport> {
        let pruned = prune_strategy(strategy, catalog);
        let olc = pruned.strategy.operations.effective_olc();
        let weather = Arc::new(detect(metocean, &olc)?);

        let (mut solutions, rejected) =
            match enumerate_with_limit(&pruned.strategy, self.config.max_solutions_per_strategy) {
                Ok(solutions) => (solutions, None),
                Err(err @ PlanningError::SolutionLimitExceeded { .. }) => {
                    warn!(strategy = %strategy.id, %err, "strategy rejected");
                    (Vec::new(), Some(err.to_string()))
                }
                Err(err) => return Err(err),
            };

        let ctx = ScheduleContext::new(&pruned.strategy.operations, &weather, phase_start);
        for solution in &mut solutions {
            match blocked_by {
                Some(phase) => ScheduleEngine::reject(
                    solution,
                    ScheduleError::PredecessorUnscheduled {
                        phase: phase.to_string(),
                    },
                )?,
                None => self.engine.apply(solution, &ctx)?,
            }
        }

        let scheduled = solutions.iter().filter(|s| s.is_scheduled()).count();
        info!(
            strategy = %strategy.id,
            dropped = pruned.dropped.len(),
            solutions = solutions.len(),
            scheduled,
            windows = weather.len(),
            "strategy planned"
        );

        Ok(StrategyReport {
            strategy_id: strategy.id.clone(),
            pools: pruned.pools,
            dropped: pruned.dropped,
            olc,
            weather,
            solutions,
            rejected,
        })
    }
}

fn end_of(solution: &Solution) -> f64 {
    solution.schedule().map_or(f64::INFINITY, |r| r.end_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttributeTable, Combination, Instance, OperationDescriptor, OperationSequence, Requirement,
    };
    use crate::scheduler::FixedDistance;

    fn ahts() -> AttributeTable {
        AttributeTable::new("AHTS")
            .with_row(
                Instance::new("A1")
                    .with("Bollard pull [t]", 150.0)
                    .with("Mob time [h]", 1.0),
            )
            .with_row(
                Instance::new("A2")
                    .with("Bollard pull [t]", 80.0)
                    .with("Mob time [h]", 0.0),
            )
    }

    fn sea_job(hours: f64) -> OperationSequence {
        OperationSequence::new()
            .with_preparation(OperationDescriptor::vessel_lookup("Mobilisation", "Mob time [h]"))
            .with_sea(
                OperationDescriptor::fixed("Install", hours).with_olc(Olc::unconstrained().with_hs(2.0)),
            )
    }

    fn phase(id: &str, sea_hours: f64) -> LogisticPhase {
        LogisticPhase::new(id).with_strategy(
            OperationStrategy::new("S1")
                .with_combination(Combination::new().with_vessel(1, ahts()))
                .with_operations(sea_job(sea_hours)),
        )
    }

    fn series() -> MetoceanSeries {
        MetoceanSeries::hourly_hs(0.0, 1.0, vec![1.0, 2.0, 3.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0])
    }

    #[test]
    fn test_single_phase() {
        let input = PlanningInput::new(vec![phase("P", 2.0)], series());
        let report = Planner::default().run(&input).unwrap();

        let s = &report.phases[0].strategies[0];
        assert_eq!(s.solutions.len(), 2);
        // A1: ready at 1 → window (3,2); A2: ready at 0 → window (0,2)
        assert_eq!(s.solutions[0].schedule().map(|r| r.end_time), Some(5.0));
        assert_eq!(s.solutions[1].schedule().map(|r| r.end_time), Some(2.0));
        assert_eq!(report.phases[0].end_time(), Some(2.0));
        assert_eq!(report.phases[0].best().map(|(id, s)| (id, s.index)), Some(("S1", 1)));
    }

    #[test]
    fn test_records_share_strategy_windows() {
        let input = PlanningInput::new(vec![phase("P", 2.0)], series());
        let report = Planner::default().run(&input).unwrap();

        let s = &report.phases[0].strategies[0];
        assert_eq!(s.weather.len(), 3);
        for solution in &s.solutions {
            let record = solution.schedule().unwrap();
            assert!(Arc::ptr_eq(&record.weather_windows, &s.weather));
        }
    }

    #[test]
    fn test_requirements_prune_per_phase() {
        let input = PlanningInput::new(vec![phase("P", 2.0)], series()).with_requirements(
            "P",
            RequirementCatalog::new().with_vessel("AHTS", Requirement::at_least("Bollard pull [t]", 100.0)),
        );
        let report = Planner::default().run(&input).unwrap();
        let s = &report.phases[0].strategies[0];
        assert_eq!(s.solutions.len(), 1);
        assert_eq!(s.solutions[0].instance_ids(), vec!["A1"]);
        assert_eq!(input.phases[0].strategies[0].combinations[0].slots[0].candidates.len(), 2);
    }

    #[test]
    fn test_predecessor_feeds_start() {
        let input = PlanningInput::new(
            vec![phase("second", 3.0).with_predecessor("first"), phase("first", 2.0)],
            series(),
        );
        let report = Planner::default().run(&input).unwrap();

        assert_eq!(report.phases[0].phase_id, "first");
        let second = report.phase("second").unwrap();
        assert_eq!(second.phase_start, 2.0);
        // A2 ready at 2 → only (6,3) fits 3 h
        assert_eq!(second.end_time(), Some(9.0));
    }

    #[test]
    fn test_unscheduled_predecessor_blocks() {
        let input = PlanningInput::new(
            vec![phase("first", 50.0), phase("second", 1.0).with_predecessor("first")],
            series(),
        );
        let report = Planner::default().run(&input).unwrap();

        assert_eq!(report.phase("first").and_then(|p| p.end_time()), None);
        let second = &report.phase("second").unwrap().strategies[0];
        assert!(second.solutions.iter().all(|s| matches!(
            s.failure(),
            Some(ScheduleError::PredecessorUnscheduled { phase }) if phase == "first"
        )));
    }

    #[test]
    fn test_solution_limit_rejects_strategy() {
        let input = PlanningInput::new(vec![phase("P", 2.0)], series());
        let report = Planner::new(PlannerConfig::new().with_solution_limit(Some(1)))
            .run(&input)
            .unwrap();
        let s = &report.phases[0].strategies[0];
        assert!(s.solutions.is_empty());
        assert!(s.rejected.as_deref().is_some_and(|r| r.contains("above the limit")));
    }

    #[test]
    fn test_invalid_input_is_fatal() {
        let input = PlanningInput::new(vec![phase("P", 2.0).with_predecessor("ghost")], series());
        let err = Planner::default().run(&input).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidInput(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_channel_is_fatal() {
        let strategy = OperationStrategy::new("S1")
            .with_combination(Combination::new().with_vessel(1, ahts()))
            .with_operations(OperationSequence::new().with_sea(
                OperationDescriptor::fixed("Install", 1.0).with_olc(Olc::unconstrained().with_cs(1.0)),
            ));
        let input = PlanningInput::new(vec![LogisticPhase::new("P").with_strategy(strategy)], series());
        let err = Planner::default().run(&input).unwrap_err();
        assert!(matches!(err, PlanningError::MalformedInput(_)));
    }

    #[test]
    fn test_distance_provider_is_used() {
        let vessel = AttributeTable::new("CSV")
            .with_row(Instance::new("C1").with("Transit speed [m/s]", 5.0));
        let port = crate::models::UtmPoint::new(0.0, 0.0, "29 S");
        let site = crate::models::UtmPoint::new(0.0, 0.0, "30 S");
        let strategy = OperationStrategy::new("S1")
            .with_combination(Combination::new().with_vessel(1, vessel))
            .with_operations(
                OperationSequence::new().with_sea(OperationDescriptor::transit("Transit", port, site)),
            );
        let input = PlanningInput::new(vec![LogisticPhase::new("P").with_strategy(strategy)], series());

        // Planar distance rejects the cross-zone leg
        let planar = Planner::default().run(&input).unwrap();
        assert!(matches!(
            planar.phases[0].strategies[0].solutions[0].failure(),
            Some(ScheduleError::Geometry { .. })
        ));

        // 36 km at 5 m/s = 2 h
        let fixed = Planner::default()
            .with_distance(FixedDistance::new(36.0))
            .run(&input)
            .unwrap();
        assert_eq!(fixed.phases[0].end_time(), Some(2.0));
    }

    #[test]
    fn test_deterministic() {
        let input = PlanningInput::new(vec![phase("A", 2.0), phase("B", 1.0).with_predecessor("A")], series());
        let planner = Planner::default();
        assert_eq!(planner.run(&input).unwrap(), planner.run(&input).unwrap());
    }
}
