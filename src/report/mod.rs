//! Terminal output formatting.
//!
//! Kept apart from the calculator so output changes stay localized.

pub mod format;

pub use format::*;
