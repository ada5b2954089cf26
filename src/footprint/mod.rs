//! Carbon-footprint calculation.
//!
//! Responsibilities:
//!
//! - hold the emission-factor table and its keyed lookups (`factors`)
//! - turn activity records into kg CO2e, per category and in total (`calculator`)

pub mod calculator;
pub mod factors;

pub use calculator::*;
pub use factors::*;
