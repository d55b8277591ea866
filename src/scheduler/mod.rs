//! Weather-constrained scheduling and KPI evaluation.
//!
//! Resolves operation durations for each solution and places the sea work
//! in a weather window, then summarises a whole plan.
//!
//! # Algorithm
//!
//! `ScheduleEngine` is a first-fit placement: the earliest weather window
//! that starts no earlier than the solution's ready time and lasts at
//! least its total sea duration hosts the work. Solutions are independent
//! of one another.
//!
//! # KPI
//!
//! `PlanKpi` computes solution counts, waiting statistics and the
//! earliest-finishing solution of every phase.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod distance;
mod engine;
mod error;
mod kpi;

pub use distance::{DistanceProvider, FixedDistance, PlanarUtmDistance};
pub use engine::{ScheduleContext, ScheduleEngine};
pub use error::ScheduleError;
pub use kpi::{PhaseBest, PlanKpi};
