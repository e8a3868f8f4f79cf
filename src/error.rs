use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No text could be extracted from any page of the document")]
    NoContentExtracted,

    #[error("No financial data found in the document.")]
    NoFinancialDataFound,

    #[error("No table with a 'Particulars' header was found in the document")]
    TableNotFound,

    #[error("Header markers for column mapping are missing")]
    ColumnMappingFailed,

    #[error("Model response did not contain a parseable JSON object: {0}")]
    UnparseableModelResponse(String),

    #[cfg(feature = "gemini")]
    #[error("Extraction service unavailable: {0}")]
    ExtractionUnavailable(#[from] reqwest::Error),

    #[error("Failed to render page {page} for OCR: {reason}")]
    PageRenderFailed { page: usize, reason: String },

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("PDF parsing error: {0}")]
    Pdf(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// The error object surfaced to the presentation layer when extraction
/// terminally fails, shaped as `{"errorStatus": 404, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "errorStatus")]
    pub error_status: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn from_error(error: &ExtractionError) -> Self {
        Self {
            error_status: 404,
            message: error.to_string(),
        }
    }
}
