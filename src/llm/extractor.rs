//! LLM fallback extraction.
//!
//! Invoked only when the local table parse leaves the current period with
//! no financial figures. The model receives the full document text and is
//! asked for a single JSON object; its output is merged fill-if-absent so
//! locally extracted values always win.

use crate::document::OcrConfig;
use crate::error::{ExtractionError, Result};
use crate::llm::client::GeminiClient;
use crate::llm::prompts;
use crate::llm::types::Content;
use crate::pipeline;
use crate::schema::{ExtractedFinancials, LlmFinancials};
use log::{info, warn};
use std::path::Path;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Attempts to obtain parseable JSON from the model at most this many
/// times before giving up with `UnparseableModelResponse`.
const MAX_PARSE_ATTEMPTS: usize = 2;

pub struct FallbackExtractor {
    client: GeminiClient,
    model: String,
}

impl FallbackExtractor {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sends the document text to the model and parses the first
    /// brace-delimited JSON object in its response.
    ///
    /// Network and service failures surface as `ExtractionUnavailable`;
    /// a response with no usable JSON after the bounded retries surfaces
    /// as `UnparseableModelResponse` (which the orchestrator absorbs).
    pub async fn extract(&self, document_text: &str) -> Result<LlmFinancials> {
        let messages = vec![Content::user(prompts::extraction_prompt(document_text))];

        let mut last_error = ExtractionError::UnparseableModelResponse(
            "model produced no response".to_string(),
        );

        for attempt in 1..=MAX_PARSE_ATTEMPTS {
            let raw = self
                .client
                .generate_content(
                    &self.model,
                    prompts::EXTRACTION_SYSTEM_PROMPT,
                    messages.clone(),
                    "application/json",
                    Some(LlmFinancials::response_schema()),
                )
                .await?;

            match LlmFinancials::from_model_response(&raw) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    warn!("Fallback parse attempt {} failed: {}", attempt, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Full extraction with the LLM fallback, default OCR settings.
pub async fn extract_with_fallback(
    path: &Path,
    fallback: &FallbackExtractor,
) -> Result<ExtractedFinancials> {
    extract_with_fallback_using(path, &OcrConfig::default(), fallback).await
}

/// Runs the local pipeline, then — only if the current period came back
/// without figures — the LLM strategy, merging its result without
/// overwriting anything found locally. An unparseable model response
/// degrades to "no fallback data"; an unavailable service propagates,
/// distinct from [`ExtractionError::NoFinancialDataFound`].
pub async fn extract_with_fallback_using(
    path: &Path,
    config: &OcrConfig,
    fallback: &FallbackExtractor,
) -> Result<ExtractedFinancials> {
    let mut ctx = pipeline::run_local_extraction_with(path, config)?;

    if ctx.financials.current_period.has_figures() {
        info!("Current-period figures found locally; fallback not invoked");
    } else {
        info!("No current-period figures from the table parse; invoking fallback");
        match fallback.extract(&ctx.full_text).await {
            Ok(parsed) => ctx.financials.merge_fallback(&parsed),
            Err(ExtractionError::UnparseableModelResponse(reason)) => {
                warn!("Fallback response unusable, continuing without it: {}", reason);
            }
            Err(e) => return Err(e),
        }
    }

    pipeline::finalize(ctx)
}
