use crate::error::{ExtractionError, Result};
use crate::llm::types::*;
use log::warn;
use reqwest::Client;
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client-side ceiling on each model call. The upstream service defines no
/// timeout of its own; a hung call must surface as
/// [`ExtractionError::ExtractionUnavailable`] rather than block the
/// pipeline indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub(crate) async fn generate_content(
        &self,
        model: &str,
        system_prompt: &str,
        messages: Vec<Content>,
        response_mime_type: &str,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: messages,
            system_instruction: Some(Content::user(system_prompt)),
            generation_config: GenerationConfig {
                response_mime_type: response_mime_type.to_string(),
                response_schema,
            },
        };

        let res = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let status_error = res.error_for_status_ref().err();
        if let Some(source) = status_error {
            let body = res.text().await.unwrap_or_default();
            warn!("Gemini API error (status {}): {}", status, body);
            return Err(source.into());
        }

        let body: GenerateContentResponse = res.json().await?;

        let part = body
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .ok_or_else(|| {
                ExtractionError::UnparseableModelResponse(
                    "no candidates returned".to_string(),
                )
            })?;

        let Part::Text { text } = part;
        Ok(text)
    }
}
