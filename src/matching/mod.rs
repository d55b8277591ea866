//! Vessel/equipment solution enumeration.
//!
//! Expands each surviving combination of a strategy into concrete
//! solutions, one catalog row per slot.
//!
//! # Capacity
//!
//! The product of slot sizes can grow quickly. [`enumerate`] never caps
//! it; [`enumerate_with_limit`] rejects a strategy whose product exceeds
//! a ceiling before allocating anything.

mod enumerate;

pub use enumerate::{enumerate, enumerate_with_limit, solution_count};
