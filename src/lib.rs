//! Marine logistics planning for offshore energy arrays.
//!
//! Narrows vessel and equipment catalogs down to the assets meeting a
//! phase's requirements, enumerates every concrete vessel/equipment
//! solution of each operation strategy, and schedules each solution into
//! the first weather window able to host its sea work.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `AttributeTable`, `Requirement`, `Olc`,
//!   `MetoceanSeries`, `OperationStrategy`, `Solution`, `WeatherWindows`
//! - **`selection`**: Requirement filtering and combination pruning
//! - **`matching`**: Cartesian solution enumeration
//! - **`weather`**: Weather window detection
//! - **`scheduler`**: Duration resolution, window placement, plan KPIs
//! - **`planner`**: The end-to-end pipeline over phases
//! - **`validation`**: Input integrity checks (duplicate IDs, DAG cycles, empty pools)
//! - **`config`**, **`error`**, **`logging`**: Ambient plumbing
//!
//! # Pipeline
//!
//! ```text
//! catalogs ─► selection ─► matching ─► scheduler ─► PlanningReport
//!                                         ▲
//! metocean ─────────────► weather ────────┘
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms"

pub mod config;
pub mod error;
pub mod logging;
pub mod matching;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod selection;
pub mod validation;
pub mod weather;

pub use error::{PlanningError, Result};
