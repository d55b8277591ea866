//! Planner configuration.
//!
//! Loaded from JSON or built in code. Every field has a default, so an
//! empty object `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "project_start": 0.0,
//!   "max_solutions_per_strategy": 100000,
//!   "transit_speed_field": "Transit speed [m/s]",
//!   "parameters": { "assembly duration [h]": 36.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Default ceiling on a strategy's solution count.
pub const DEFAULT_SOLUTION_LIMIT: usize = 100_000;

/// Default vessel column holding the transit speed.
pub const DEFAULT_SPEED_FIELD: &str = "Transit speed [m/s]";

/// Planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Project start (hours, metocean epoch).
    pub project_start: f64,
    /// Strategies with more solutions than this are rejected.
    /// `None` disables the check.
    pub max_solutions_per_strategy: Option<usize>,
    /// Vessel column with transit speed in m/s.
    pub transit_speed_field: String,
    /// Named values for parameter lookups (hours).
    pub parameters: BTreeMap<String, f64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            project_start: 0.0,
            max_solutions_per_strategy: Some(DEFAULT_SOLUTION_LIMIT),
            transit_speed_field: DEFAULT_SPEED_FIELD.to_string(),
            parameters: BTreeMap::new(),
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the project start.
    pub fn with_project_start(mut self, hours: f64) -> Self {
        self.project_start = hours;
        self
    }

    /// Sets or clears the solution ceiling.
    pub fn with_solution_limit(mut self, limit: Option<usize>) -> Self {
        self.max_solutions_per_strategy = limit;
        self
    }

    /// Sets the transit speed column.
    pub fn with_speed_field(mut self, field: impl Into<String>) -> Self {
        self.transit_speed_field = field.into();
        self
    }

    /// Adds a lookup parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, hours: f64) -> Self {
        self.parameters.insert(name.into(), hours);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanningError;

    #[test]
    fn test_defaults() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.project_start, 0.0);
        assert_eq!(cfg.max_solutions_per_strategy, Some(100_000));
        assert_eq!(cfg.transit_speed_field, "Transit speed [m/s]");
        assert!(cfg.parameters.is_empty());
    }

    #[test]
    fn test_empty_json_is_default() {
        let cfg = PlannerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PlannerConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let cfg = PlannerConfig::from_json_str(
            r#"{"project_start": 24.0, "max_solutions_per_strategy": null,
                "parameters": {"assembly duration [h]": 36.0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.project_start, 24.0);
        assert_eq!(cfg.max_solutions_per_strategy, None);
        assert_eq!(cfg.parameters.get("assembly duration [h]"), Some(&36.0));
        assert_eq!(cfg.transit_speed_field, DEFAULT_SPEED_FIELD);
    }

    #[test]
    fn test_bad_json() {
        let err = PlannerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, PlanningError::ConfigParse(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::from_json_file("/nonexistent/u-logistics.json").unwrap_err();
        assert!(matches!(err, PlanningError::ConfigIo(_)));
    }

    #[test]
    fn test_builders() {
        let cfg = PlannerConfig::new()
            .with_project_start(12.0)
            .with_solution_limit(Some(10))
            .with_speed_field("Speed [m/s]")
            .with_parameter("assembly duration [h]", 8.0);
        assert_eq!(cfg.project_start, 12.0);
        assert_eq!(cfg.max_solutions_per_strategy, Some(10));
        assert_eq!(cfg.transit_speed_field, "Speed [m/s]");
        assert_eq!(cfg.parameters.len(), 1);
    }
}
