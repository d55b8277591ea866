//! Attribute tables: vessel and equipment catalogs.
//!
//! A table is an ordered set of named instances. Each instance maps an
//! attribute name (e.g. `"Deck loading [t/m^2]"`) to a numeric or
//! categorical value.
//!
//! # Immutability
//! Tables are never filtered in place. Every narrowing operation
//! (see [`crate::selection::filter`]) produces a new table, so two phases
//! working from the same catalog can never observe each other's pruning.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A single cell value.
///
/// Serialized untagged: JSON numbers become [`AttributeValue::Number`],
/// strings become [`AttributeValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric attribute (units are carried by the column name).
    Number(f64),
    /// Categorical attribute (e.g. `"yes"`, `"Inspection class"`).
    Text(String),
}

impl AttributeValue {
    /// Numeric value, if this is a non-NaN number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Text value, if categorical.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One row of a catalog (a specific vessel or piece of equipment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Instance identifier (row key).
    pub id: String,
    /// Attribute values by column name. Missing keys are missing values.
    pub attributes: HashMap<String, AttributeValue>,
}

impl Instance {
    /// Creates an instance with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Raw attribute value.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Numeric attribute value. `None` when missing, categorical, or NaN.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(AttributeValue::as_number)
    }
}

/// An ordered catalog of instances sharing a set of declared columns.
///
/// Declared columns are the parameters a requirement may legally refer to.
/// Rows may still lack a value for a declared column (missing data).
/// On load, `columns` may be omitted; every key carried by a row is
/// declared either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableRepr")]
pub struct AttributeTable {
    /// Asset type name (e.g. `"AHTS"`, `"rov"`).
    pub name: String,
    /// Declared column names.
    pub columns: BTreeSet<String>,
    /// Rows, in catalog order.
    pub rows: Vec<Instance>,
}

#[derive(Deserialize)]
struct TableRepr {
    name: String,
    #[serde(default)]
    columns: BTreeSet<String>,
    #[serde(default)]
    rows: Vec<Instance>,
}

impl From<TableRepr> for AttributeTable {
    fn from(repr: TableRepr) -> Self {
        let mut table = Self {
            name: repr.name,
            columns: repr.columns,
            rows: Vec::with_capacity(repr.rows.len()),
        };
        for row in repr.rows {
            table = table.with_row(row);
        }
        table
    }
}

impl AttributeTable {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: BTreeSet::new(),
            rows: Vec::new(),
        }
    }

    /// Declares a column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.insert(column.into());
        self
    }

    /// Adds a row. Every attribute the row carries becomes a declared column.
    pub fn with_row(mut self, row: Instance) -> Self {
        self.columns.extend(row.attributes.keys().cloned());
        self.rows.push(row);
        self
    }

    /// Whether `column` is declared.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row lookup by instance id.
    pub fn row(&self, id: &str) -> Option<&Instance> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Instance ids in row order.
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }

    /// Returns a new table with the same name and columns, keeping only
    /// rows for which `keep` returns `true`.
    pub fn retain_copy<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Instance) -> bool,
    {
        Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
