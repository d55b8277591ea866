//! Plan quality metrics (KPIs).
//!
//! Summarises a planning report: how many solutions could be placed, why
//! the others could not, and how long the fleet waits for weather.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled / Infeasible | solution counts by terminal state |
//! | Weather-infeasible | infeasible for lack of a weather window |
//! | Dropped combinations | removed by requirement filtering |
//! | Min / Mean waiting | over scheduled solutions (hours) |
//! | Best per phase | earliest-finishing solution of each phase |
//! | Completion | latest phase end, if every phase has one |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::planner::PlanningReport;

/// Earliest-finishing solution of a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBest {
    /// Owning strategy.
    pub strategy_id: String,
    /// Solution index within the strategy.
    pub solution: usize,
    /// Its end time (hours).
    pub end_time: f64,
    /// Its waiting time (hours).
    pub waiting_time: f64,
}

/// Plan performance indicators.
///
/// All time values are in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    /// Number of strategies evaluated.
    pub strategies: usize,
    /// Strategies rejected by the solution ceiling.
    pub rejected_strategies: usize,
    /// Combinations removed by filtering.
    pub dropped_combinations: usize,
    /// Solutions enumerated.
    pub solutions: usize,
    /// Solutions scheduled.
    pub scheduled: usize,
    /// Solutions infeasible for any reason.
    pub infeasible: usize,
    /// Infeasible solutions that failed for lack of a weather window.
    pub weather_infeasible: usize,
    /// Shortest waiting time of any scheduled solution.
    pub min_waiting: Option<f64>,
    /// Mean waiting time over scheduled solutions.
    pub mean_waiting: Option<f64>,
    /// Best solution per phase id.
    pub best_by_phase: BTreeMap<String, PhaseBest>,
    /// Latest phase end; `None` unless every phase has a scheduled solution.
    pub completion_time: Option<f64>,
}

impl PlanKpi {
    /// Computes KPIs from a planning report.
    pub fn calculate(report: &PlanningReport) -> Self {
        let mut kpi = Self {
            strategies: 0,
            rejected_strategies: 0,
            dropped_combinations: 0,
            solutions: 0,
            scheduled: 0,
            infeasible: 0,
            weather_infeasible: 0,
            min_waiting: None,
            mean_waiting: None,
            best_by_phase: BTreeMap::new(),
            completion_time: None,
        };
        let mut total_waiting = 0.0;
        let mut completion = Some(f64::NEG_INFINITY);

        for phase in &report.phases {
            for strategy in &phase.strategies {
                kpi.strategies += 1;
                if strategy.rejected.is_some() {
                    kpi.rejected_strategies += 1;
                }
                kpi.dropped_combinations += strategy.dropped.len();
                kpi.solutions += strategy.solutions.len();

                for solution in &strategy.solutions {
                    if let Some(record) = solution.schedule() {
                        kpi.scheduled += 1;
                        total_waiting += record.waiting_time;
                        kpi.min_waiting = Some(
                            kpi.min_waiting
                                .map_or(record.waiting_time, |m| m.min(record.waiting_time)),
                        );
                    } else if let Some(reason) = solution.failure() {
                        kpi.infeasible += 1;
                        if reason.is_weather() {
                            kpi.weather_infeasible += 1;
                        }
                    }
                }
            }

            match phase.best() {
                Some((strategy_id, solution)) => {
                    if let Some(record) = solution.schedule() {
                        kpi.best_by_phase.insert(
                            phase.phase_id.clone(),
                            PhaseBest {
                                strategy_id: strategy_id.to_string(),
                                solution: solution.index,
                                end_time: record.end_time,
                                waiting_time: record.waiting_time,
                            },
                        );
                        completion = completion.map(|c: f64| c.max(record.end_time));
                    }
                }
                None => completion = None,
            }
        }

        if kpi.scheduled > 0 {
            kpi.mean_waiting = Some(total_waiting / kpi.scheduled as f64);
        }
        kpi.completion_time = completion.filter(|c| c.is_finite());
        kpi
    }

    /// Fraction of enumerated solutions that were scheduled (0.0..1.0).
    pub fn schedulable_rate(&self) -> f64 {
        if self.solutions == 0 {
            0.0
        } else {
            self.scheduled as f64 / self.solutions as f64
        }
    }
}
