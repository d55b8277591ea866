//! Requirement filtering of vessel and equipment pools.
//!
//! Narrows each combination slot's candidate table down to the instances
//! meeting the phase's numeric and categorical requirements, and drops
//! combinations that can no longer be crewed.
//!
//! # Usage
//!
//! ```
//! use u_logistics::models::{AttributeTable, Combination, Instance, OperationStrategy,
//!     Requirement, RequirementCatalog};
//! use u_logistics::selection::prune_strategy;
//!
//! let ahts = AttributeTable::new("AHTS")
//!     .with_row(Instance::new("A1").with("Bollard pull [t]", 150.0))
//!     .with_row(Instance::new("A2").with("Bollard pull [t]", 60.0));
//! let strategy = OperationStrategy::new("tow")
//!     .with_combination(Combination::new().with_vessel(1, ahts));
//! let catalog = RequirementCatalog::new()
//!     .with_vessel("AHTS", Requirement::at_least("Bollard pull [t]", 100.0));
//!
//! let pruned = prune_strategy(&strategy, &catalog);
//! assert_eq!(pruned.strategy.combinations[0].slots[0].candidates.ids(), vec!["A1"]);
//! ```

mod error;
mod filter;
mod prune;

pub use error::SelectionError;
pub use filter::{filter, satisfies};
pub use prune::{prune_strategy, DroppedCombination, PrunedPools, PrunedStrategy};
