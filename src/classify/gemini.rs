//! Gemini `generateContent` REST client.
//!
//! Configuration comes from the environment (optionally a `.env` file):
//!
//! - `GEMINI_API_KEY` (or `API_KEY`): required
//! - `GEMINI_MODEL`: defaults to `gemini-1.5-flash`
//! - `GEMINI_BASE_URL`: defaults to the public v1beta endpoint

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::model::{GenerativeModel, Part};
use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// Read configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::new(2, "Missing GEMINI_API_KEY (or API_KEY) in environment (.env)."))?;

        let model = lookup("GEMINI_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, parts: &[Part]) -> Result<String, AppError> {
        let url = self.config.endpoint_url();
        debug!(%url, parts = parts.len(), "POST generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(parts))
            .send()
            .map_err(|e| AppError::new(4, format!("Gemini request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::new(
                4,
                format!("Gemini request failed with status {status}: {}", detail.trim()),
            ));
        }

        let body: GenerateContentResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse Gemini response: {e}")))?;

        response_text(body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataBody<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataBody<'a> {
    mime_type: &'a str,
    data: &'a str,
}

fn build_request(parts: &[Part]) -> GenerateContentRequest<'_> {
    let parts = parts
        .iter()
        .map(|p| match p {
            Part::Text(text) => RequestPart::Text { text },
            Part::InlineData(image) => RequestPart::Inline {
                inline_data: InlineDataBody {
                    mime_type: &image.mime_type,
                    data: &image.data,
                },
            },
        })
        .collect();

    GenerateContentRequest {
        contents: vec![Content { role: "user", parts }],
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Concatenate the text parts of the first candidate.
fn response_text(body: GenerateContentResponse) -> Result<String, AppError> {
    let Some(candidate) = body.candidates.into_iter().next() else {
        let reason = body
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(AppError::new(4, format!("Gemini returned no response: {reason}.")));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "empty content".to_string());
        return Err(AppError::new(4, format!("Gemini returned no text: {reason}.")));
    }

    Ok(text)
}
