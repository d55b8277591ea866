//! Logistic operations and their duration models.
//!
//! An operation is one step of a strategy's sequence (mobilisation,
//! transit, anchor drop, ...). How long it takes is decided by its
//! [`DurationMode`], a closed set of resolution rules.
//!
//! # Partitions
//!
//! | Partition | Where | Weather-constrained |
//! |-----------|-------|---------------------|
//! | Preparation | port, before departure | no |
//! | Sea | offshore | yes (OLC) |
//! | Demobilization | after the sea work | no |

use serde::{Deserialize, Serialize};

use super::Olc;

/// A point in UTM coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmPoint {
    /// Easting (m).
    pub x: f64,
    /// Northing (m).
    pub y: f64,
    /// UTM zone label (e.g. `"29 S"`).
    pub zone: String,
}

impl UtmPoint {
    /// Creates a UTM point.
    pub fn new(x: f64, y: f64, zone: impl Into<String>) -> Self {
        Self {
            x,
            y,
            zone: zone.into(),
        }
    }
}

/// Where a `Lookup` duration is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LookupSource {
    /// A column of the selected vessel rows (e.g. `"Mob time [h]"`).
    /// Multi-vessel solutions take the maximum: the operation cannot
    /// start until every vessel is ready.
    VesselField { field: String },
    /// A column of the selected equipment rows, maximum across rows.
    EquipmentField { field: String },
    /// A project-level domain parameter (e.g. `"assembly duration [h]"`).
    Parameter { name: String },
}

/// How an operation's duration (hours) is determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurationMode {
    /// A constant number of hours.
    Fixed { hours: f64 },
    /// Leg between two points at the lead vessel's transit speed.
    Distance { from: UtmPoint, to: UtmPoint },
    /// Convoy transit between two points, paced by the slowest vessel.
    Transit { from: UtmPoint, to: UtmPoint },
    /// Read from a vessel/equipment column or a project parameter.
    Lookup(LookupSource),
}

impl DurationMode {
    /// Short mode name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Distance { .. } => "distance_function",
            Self::Transit { .. } => "transit_function",
            Self::Lookup(_) => "lookup",
        }
    }
}

/// Which partition of the sequence an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationPhase {
    /// On land, before departure.
    Preparation,
    /// Offshore, weather-constrained.
    Sea,
    /// After the offshore work.
    Demobilization,
}

/// A single logistic operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Human-readable description (e.g. `"Mobilisation"`).
    pub description: String,
    /// Duration resolution rule.
    pub duration: DurationMode,
    /// Static operational limit. Only meaningful for sea operations.
    #[serde(default)]
    pub olc: Option<Olc>,
}

impl OperationDescriptor {
    /// Creates an operation with the given duration rule and no OLC.
    pub fn new(description: impl Into<String>, duration: DurationMode) -> Self {
        Self {
            description: description.into(),
            duration,
            olc: None,
        }
    }

    /// Fixed-duration operation.
    pub fn fixed(description: impl Into<String>, hours: f64) -> Self {
        Self::new(description, DurationMode::Fixed { hours })
    }

    /// Lead-vessel leg between two points.
    pub fn distance(description: impl Into<String>, from: UtmPoint, to: UtmPoint) -> Self {
        Self::new(description, DurationMode::Distance { from, to })
    }

    /// Slowest-vessel transit between two points.
    pub fn transit(description: impl Into<String>, from: UtmPoint, to: UtmPoint) -> Self {
        Self::new(description, DurationMode::Transit { from, to })
    }

    /// Duration read from a vessel column.
    pub fn vessel_lookup(description: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(
            description,
            DurationMode::Lookup(LookupSource::VesselField {
                field: field.into(),
            }),
        )
    }

    /// Duration read from an equipment column.
    pub fn equipment_lookup(description: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(
            description,
            DurationMode::Lookup(LookupSource::EquipmentField {
                field: field.into(),
            }),
        )
    }

    /// Duration read from a project parameter.
    pub fn parameter(description: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            description,
            DurationMode::Lookup(LookupSource::Parameter { name: name.into() }),
        )
    }

    /// Sets the operational limit condition.
    pub fn with_olc(mut self, olc: Olc) -> Self {
        self.olc = Some(olc);
        self
    }
}

/// The operations of one strategy, split by partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationSequence {
    /// Port-side operations before departure.
    #[serde(default)]
    pub preparation: Vec<OperationDescriptor>,
    /// Offshore operations.
    #[serde(default)]
    pub sea: Vec<OperationDescriptor>,
    /// Closing operations.
    #[serde(default)]
    pub demobilization: Vec<OperationDescriptor>,
}

impl OperationSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a preparation operation.
    pub fn with_preparation(mut self, op: OperationDescriptor) -> Self {
        self.preparation.push(op);
        self
    }

    /// Appends a sea operation.
    pub fn with_sea(mut self, op: OperationDescriptor) -> Self {
        self.sea.push(op);
        self
    }

    /// Appends a demobilization operation.
    pub fn with_demobilization(mut self, op: OperationDescriptor) -> Self {
        self.demobilization.push(op);
        self
    }

    /// All operations in execution order, tagged with their partition.
    pub fn iter(&self) -> impl Iterator<Item = (OperationPhase, &OperationDescriptor)> {
        let prep = self
            .preparation
            .iter()
            .map(|op| (OperationPhase::Preparation, op));
        let sea = self.sea.iter().map(|op| (OperationPhase::Sea, op));
        let demob = self
            .demobilization
            .iter()
            .map(|op| (OperationPhase::Demobilization, op));
        prep.chain(sea).chain(demob)
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.preparation.len() + self.sea.len() + self.demobilization.len()
    }

    /// Whether the sequence has no operations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most restrictive OLC across sea operations that declare one.
    ///
    /// Preparation and demobilization OLCs are ignored: those operations
    /// are not weather-constrained.
    pub fn effective_olc(&self) -> Olc {
        Olc::tightest_of(self.sea.iter().filter_map(|op| op.olc.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port() -> UtmPoint {
        UtmPoint::new(500_000.0, 4_300_000.0, "29 S")
    }

    fn site() -> UtmPoint {
        UtmPoint::new(520_000.0, 4_300_000.0, "29 S")
    }

    #[test]
    fn test_sequence_order() {
        let seq = OperationSequence::new()
            .with_preparation(OperationDescriptor::vessel_lookup("Mobilisation", "Mob time [h]"))
            .with_sea(OperationDescriptor::transit("Transit to site", port(), site()))
            .with_sea(OperationDescriptor::fixed("Anchor drop", 3.0))
            .with_demobilization(OperationDescriptor::fixed("Demobilisation", 12.0));

        let phases: Vec<OperationPhase> = seq.iter().map(|(p, _)| p).collect();
        assert_eq!(
            phases,
            vec![
                OperationPhase::Preparation,
                OperationPhase::Sea,
                OperationPhase::Sea,
                OperationPhase::Demobilization
            ]
        );
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_effective_olc_only_sea() {
        let seq = OperationSequence::new()
            .with_preparation(
                OperationDescriptor::fixed("Loading", 24.0).with_olc(Olc::unconstrained().with_hs(0.5)),
            )
            .with_sea(
                OperationDescriptor::fixed("Positioning", 1.0).with_olc(Olc::unconstrained().with_hs(2.0)),
            )
            .with_sea(
                OperationDescriptor::fixed("Piling", 5.0)
                    .with_olc(Olc::unconstrained().with_hs(1.5).with_ws(20.0)),
            )
            .with_sea(OperationDescriptor::fixed("Survey", 2.0));

        let olc = seq.effective_olc();
        assert_eq!(olc.max_hs, Some(1.5));
        assert_eq!(olc.max_ws, Some(20.0));
        assert_eq!(olc.max_tp, None);
    }

    #[test]
    fn test_duration_mode_serde() {
        let op = OperationDescriptor::parameter("Assembly at port", "assembly duration [h]");
        let json = serde_json::to_string(&op.duration).unwrap();
        assert_eq!(
            json,
            r#"{"mode":"lookup","source":"parameter","name":"assembly duration [h]"}"#
        );
        let back: DurationMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op.duration);
        assert_eq!(back.name(), "lookup");
    }
}
