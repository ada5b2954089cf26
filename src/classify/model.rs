//! Generative-model capability.
//!
//! The endpoint only needs "send these parts, get text back". Keeping that behind
//! a trait means the endpoint never names a provider and tests can swap in a fake.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An image embedded directly in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Base64-encoded image bytes.
    pub data: String,
    /// Declared MIME type, e.g. `image/jpeg`. Not validated.
    pub mime_type: String,
}

/// One piece of a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData(InlineImage),
}

/// A text-generating model reachable through a single request/response call.
pub trait GenerativeModel: Send + Sync {
    /// Send `parts` as one request and return the response text.
    fn generate(&self, parts: &[Part]) -> Result<String, AppError>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "model"
    }
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    fn generate(&self, parts: &[Part]) -> Result<String, AppError> {
        (**self).generate(parts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for Box<M> {
    fn generate(&self, parts: &[Part]) -> Result<String, AppError> {
        (**self).generate(parts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
