//! Input/output helpers.
//!
//! - activity data and factor tables from JSON (`input`)
//! - image files as inline base64 payloads (`image`)

pub mod image;
pub mod input;

pub use image::*;
pub use input::*;
