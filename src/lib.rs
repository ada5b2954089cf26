//! `ecosort` library crate.
//!
//! Two independent pieces live here:
//!
//! - `footprint`: a carbon-footprint calculator over a fixed emission-factor table
//! - `classify`: a waste-sorting endpoint that relays an image to a generative model
//!
//! The binary (`eco`) is a thin wrapper so both stay testable without spawning
//! processes or reaching the network.

pub mod app;
pub mod classify;
pub mod cli;
pub mod domain;
pub mod error;
pub mod footprint;
pub mod io;
pub mod logging;
pub mod report;
