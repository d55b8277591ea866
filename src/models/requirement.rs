//! Performance requirements on candidate assets.
//!
//! A requirement is a `(parameter, comparator, threshold)` triple produced
//! by an upstream feasibility assessment, e.g.
//! `("Deck loading [t/m^2]", sup, 4.2)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{AssetKind, AttributeValue};

/// Comparison applied between an instance's attribute and the threshold.
///
/// Serialized with the catalog's short names: `sup` (≥), `inf` (≤), `equal`.
/// Any other name loads as [`Comparator::Unknown`] so that a bad catalog
/// entry only rejects the combinations it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Comparator {
    /// `value >= threshold`
    AtLeast,
    /// `value <= threshold`
    AtMost,
    /// `value == threshold` (numeric or categorical)
    Equal,
    /// Unrecognized catalog name.
    Unknown(String),
}

impl Comparator {
    /// Catalog short name.
    pub fn short_name(&self) -> &str {
        match self {
            Self::AtLeast => "sup",
            Self::AtMost => "inf",
            Self::Equal => "equal",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for Comparator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "sup" => Self::AtLeast,
            "inf" => Self::AtMost,
            "equal" => Self::Equal,
            _ => Self::Unknown(name),
        }
    }
}

impl From<Comparator> for String {
    fn from(c: Comparator) -> Self {
        c.short_name().to_string()
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast => f.write_str(">="),
            Self::AtMost => f.write_str("<="),
            Self::Equal => f.write_str("=="),
            Self::Unknown(name) => write!(f, "?{name}"),
        }
    }
}

/// A single requirement on one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Attribute (column) name.
    pub parameter: String,
    /// Comparison.
    pub comparator: Comparator,
    /// Threshold the attribute is compared against.
    pub threshold: AttributeValue,
}

impl Requirement {
    /// Creates a requirement.
    pub fn new(
        parameter: impl Into<String>,
        comparator: Comparator,
        threshold: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            comparator,
            threshold: threshold.into(),
        }
    }

    /// `parameter >= threshold`
    pub fn at_least(parameter: impl Into<String>, threshold: f64) -> Self {
        Self::new(parameter, Comparator::AtLeast, threshold)
    }

    /// `parameter <= threshold`
    pub fn at_most(parameter: impl Into<String>, threshold: f64) -> Self {
        Self::new(parameter, Comparator::AtMost, threshold)
    }

    /// `parameter == threshold`
    pub fn equal(parameter: impl Into<String>, threshold: impl Into<AttributeValue>) -> Self {
        Self::new(parameter, Comparator::Equal, threshold)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.parameter, self.comparator, self.threshold)
    }
}

/// Requirements for one logistic phase, keyed by asset type name.
///
/// Vessel and equipment types live in separate maps because the same
/// type name could in principle appear in both catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementCatalog {
    /// Vessel type → requirements.
    #[serde(default)]
    pub vessels: BTreeMap<String, Vec<Requirement>>,
    /// Equipment type → requirements.
    #[serde(default)]
    pub equipment: BTreeMap<String, Vec<Requirement>>,
}

impl RequirementCatalog {
    /// Creates an empty catalog (no requirements on anything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vessel requirement.
    pub fn with_vessel(mut self, type_key: impl Into<String>, req: Requirement) -> Self {
        self.vessels.entry(type_key.into()).or_default().push(req);
        self
    }

    /// Adds an equipment requirement.
    pub fn with_equipment(mut self, type_key: impl Into<String>, req: Requirement) -> Self {
        self.equipment.entry(type_key.into()).or_default().push(req);
        self
    }

    /// Requirements for an asset type. Empty when the type is not listed.
    pub fn for_type(&self, kind: AssetKind, type_key: &str) -> &[Requirement] {
        let map = match kind {
            AssetKind::Vessel => &self.vessels,
            AssetKind::Equipment => &self.equipment,
        };
        map.get(type_key).map(Vec::as_slice).unwrap_or(&[])
    }
}
