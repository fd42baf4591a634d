use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::AdvisoryProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Google Gemini advisory provider.
///
/// Calls the `generateContent` REST endpoint with a fixed advisor prompt
/// built from the plan configuration. Requires an API key.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn build_prompt(principal: f64, rate: u32, safety_on: bool) -> String {
        format!(
            "As a senior financial advisor, review this monthly-payout plan \
             configuration:\n\
             - Initial invested principal: {principal:.0} TWD\n\
             - Automatic monthly redemption rate: {rate}%\n\
             - 80% principal-protection rule: {}\n\
             Briefly assess cash-flow health and risk tolerance, and note \
             anything the investor should watch. Keep it concise and \
             professional, at most 150 words.",
            if safety_on { "enabled" } else { "disabled" }
        )
    }
}

// ── Gemini API request/response types ───────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AdvisoryProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn get_advice(
        &self,
        principal: f64,
        rate: u32,
        safety_on: bool,
    ) -> Result<String, CoreError> {
        let url = format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(principal, rate, safety_on),
                }],
            }],
        };

        let resp: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CoreError::Api {
                provider: "Gemini".into(),
                message: format!("Request rejected: {}", e.status().map_or_else(
                    || "unknown status".to_string(),
                    |s| s.to_string(),
                )),
            })?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Gemini".into(),
                message: format!("Failed to parse response: {e}"),
            })?;

        resp.candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .find(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Api {
                provider: "Gemini".into(),
                message: "Response contained no text candidates".into(),
            })
    }
}
