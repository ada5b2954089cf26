//! Waste classification through a generative model.
//!
//! - `model`: the capability trait the endpoint depends on, plus request parts
//! - `endpoint`: GET/POST handlers with fixed prompts
//! - `gemini`: a `generateContent` REST client implementing the trait

pub mod endpoint;
pub mod gemini;
pub mod model;

pub use endpoint::*;
pub use gemini::*;
pub use model::*;
