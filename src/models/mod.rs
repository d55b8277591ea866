//! Marine logistics domain models.
//!
//! Provides the data types for describing a logistic planning problem
//! (catalogs, requirements, strategies, operations, sea states) and its
//! results (solutions, weather windows, schedule records).
//!
//! # Domain Mappings
//!
//! | u-logistics | Installation | O&M |
//! |-------------|--------------|-----|
//! | LogisticPhase | Mooring / foundation / device installation | Inspection campaign |
//! | OperationStrategy | Deploy drag-embedment anchors | Offshore inspection |
//! | CombinationSlot | AHTS + ROV | Multicat |
//! | Solution | AHTS "Bourbon X" + ROV "WC-12" | Multicat "M-3" |

mod attribute;
mod metocean;
mod olc;
mod operation;
mod requirement;
mod solution;
mod strategy;
mod window;

pub use attribute::{AttributeTable, AttributeValue, Instance};
pub use metocean::{Channel, MetoceanSeries};
pub use olc::Olc;
pub use operation::{
    DurationMode, LookupSource, OperationDescriptor, OperationPhase, OperationSequence, UtmPoint,
};
pub use requirement::{Comparator, Requirement, RequirementCatalog};
pub use solution::{
    DurationBreakdown, OperationDuration, ScheduleRecord, ScheduleState, SelectedAsset, Solution,
    WindowSelection,
};
pub use strategy::{AssetKind, Combination, CombinationSlot, LogisticPhase, OperationStrategy};
pub use window::{WeatherWindow, WeatherWindows};
