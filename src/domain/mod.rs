//! Domain types shared by the calculator, the classifier and the CLI.
//!
//! This module defines:
//!
//! - activity records consumed by the calculator (`TransportTrip`, `ElectricityData`, ...)
//! - calculation outputs (`FootprintBreakdown`)
//! - the waste-sorting label set (`WasteLabel`)

pub mod types;

pub use types::*;
