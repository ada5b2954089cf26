//! Waste classification endpoint.
//!
//! Framework-agnostic handlers: each takes the request as text/values and returns
//! the JSON-encoded response body. One model call per request; the model's text
//! is relayed as-is (no retry, no check against the expected label set).

use serde::Deserialize;
use tracing::info;

use crate::classify::model::{GenerativeModel, InlineImage, Part};
use crate::error::AppError;

/// Prompt sent by the GET handler.
pub const DEMO_PROMPT: &str = "Explain how AI works";

/// Instruction sent after the image by the POST handler.
pub const SORT_INSTRUCTION: &str = "Your job is to sort waste. You must only include a single word: \"ORGANIC\" or \"RECYCLABLE\" or \"LANDFILL\" in your response to sort the waste presented in the image or \"ERROR\" if the image supplied is irrelevant.";

/// POST body: `{ "data": <base64>, "mimeType": <string> }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub data: String,
    pub mime_type: String,
}

impl From<ClassifyRequest> for InlineImage {
    fn from(req: ClassifyRequest) -> Self {
        InlineImage {
            data: req.data,
            mime_type: req.mime_type,
        }
    }
}

pub struct ClassifyEndpoint<M> {
    model: M,
}

impl<M: GenerativeModel> ClassifyEndpoint<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// GET: send the demo prompt and return the JSON-encoded response text.
    pub fn get(&self) -> Result<String, AppError> {
        info!(model = self.model.name(), "sending demo prompt");
        let text = self.model.generate(&[Part::Text(DEMO_PROMPT.to_string())])?;
        encode_json_text(&text)
    }

    /// POST: classify the image in `body` and return the JSON-encoded response text.
    pub fn post(&self, body: &str) -> Result<String, AppError> {
        let req: ClassifyRequest = serde_json::from_str(body)
            .map_err(|e| AppError::new(2, format!("Invalid classify request body: {e}")))?;
        let text = self.classify(req.into())?;
        encode_json_text(&text)
    }

    /// Send `image` followed by the sorting instruction; return the raw response text.
    pub fn classify(&self, image: InlineImage) -> Result<String, AppError> {
        info!(
            model = self.model.name(),
            mime_type = %image.mime_type,
            payload_len = image.data.len(),
            "classifying image"
        );
        let parts = [Part::InlineData(image), Part::Text(SORT_INSTRUCTION.to_string())];
        self.model.generate(&parts)
    }
}

fn encode_json_text(text: &str) -> Result<String, AppError> {
    serde_json::to_string(text).map_err(|e| AppError::new(4, format!("Failed to encode response: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingModel {
        reply: String,
        calls: Mutex<Vec<Vec<Part>>>,
    }

    impl RecordingModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<Part>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GenerativeModel for RecordingModel {
        fn generate(&self, parts: &[Part]) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(parts.to_vec());
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    impl GenerativeModel for FailingModel {
        fn generate(&self, _parts: &[Part]) -> Result<String, AppError> {
            Err(AppError::new(4, "model unavailable"))
        }
    }

    #[test]
    fn post_sends_image_then_instruction_once() {
        let endpoint = ClassifyEndpoint::new(RecordingModel::replying("RECYCLABLE"));
        let body = r#"{"data": "aGVsbG8=", "mimeType": "image/png"}"#;

        let response = endpoint.post(body).unwrap();
        assert_eq!(response, "\"RECYCLABLE\"");

        let calls = endpoint.model().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                Part::InlineData(InlineImage {
                    data: "aGVsbG8=".to_string(),
                    mime_type: "image/png".to_string(),
                }),
                Part::Text(SORT_INSTRUCTION.to_string()),
            ]
        );
    }

    #[test]
    fn post_relays_unexpected_text_verbatim() {
        let endpoint = ClassifyEndpoint::new(RecordingModel::replying("Probably compost.\n"));
        let response = endpoint
            .post(r#"{"data": "", "mimeType": "not/a-type"}"#)
            .unwrap();
        assert_eq!(response, "\"Probably compost.\\n\"");
    }

    #[test]
    fn get_sends_demo_prompt() {
        let endpoint = ClassifyEndpoint::new(RecordingModel::replying("AI is..."));
        assert_eq!(endpoint.get().unwrap(), "\"AI is...\"");
        assert_eq!(endpoint.model().calls(), vec![vec![Part::Text(DEMO_PROMPT.to_string())]]);
    }

    #[test]
    fn malformed_body_is_rejected_before_model_call() {
        let endpoint = ClassifyEndpoint::new(RecordingModel::replying("ORGANIC"));
        let err = endpoint.post(r#"{"data": "abc"}"#).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(endpoint.model().calls().is_empty());
    }

    #[test]
    fn model_failure_propagates() {
        let endpoint = ClassifyEndpoint::new(FailingModel);
        let err = endpoint
            .post(r#"{"data": "abc", "mimeType": "image/jpeg"}"#)
            .unwrap_err();
        assert_eq!(err, AppError::new(4, "model unavailable"));
        assert!(endpoint.get().is_err());
    }

    #[test]
    fn endpoint_accepts_boxed_models() {
        let model: Box<dyn GenerativeModel> = Box::new(RecordingModel::replying("LANDFILL"));
        let endpoint = ClassifyEndpoint::new(model);
        let text = endpoint
            .classify(InlineImage {
                data: "eA==".to_string(),
                mime_type: "image/webp".to_string(),
            })
            .unwrap();
        assert_eq!(text, "LANDFILL");
    }
}
