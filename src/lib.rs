//! # Statement Extractor
//!
//! A library for extracting structured financial figures (revenue,
//! operating profit, net profit, reporting unit, company name, fiscal
//! period) from semi-structured quarterly financial-statement PDFs.
//!
//! ## Extraction strategies
//!
//! - **Structured table parse**: locate the table whose header carries a
//!   "Particulars" marker, map the current-period and "year ended" columns,
//!   and classify each row against priority-ranked synonym dictionaries.
//! - **OCR**: pages without a text layer are rendered and passed through
//!   Tesseract; OCR text keeps scanned documents in play for the fallback.
//! - **LLM fallback** (requires the `gemini` feature): only when the local
//!   parse finds no current-period figures, the document text is sent to
//!   the model and the response is merged fill-if-absent — a locally found
//!   value is never overwritten.
//!
//! ## Example
//!
//! ```rust,ignore
//! use statement_extractor::{extract_financial_data, ErrorBody, ExtractionError};
//!
//! match extract_financial_data("results_q3.pdf".as_ref()) {
//!     Ok(financials) => println!("{}", serde_json::to_string_pretty(&financials)?),
//!     Err(e @ ExtractionError::NoFinancialDataFound) => {
//!         println!("{}", serde_json::to_string(&ErrorBody::from_error(&e))?)
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod detect;
pub mod document;
pub mod error;
pub mod periods;
pub mod pipeline;
pub mod rows;
pub mod schema;
pub mod table;
pub mod terms;

#[cfg(feature = "gemini")]
pub mod llm;

pub use document::OcrConfig;
pub use error::{ErrorBody, ExtractionError, Result};
pub use periods::ReportingPeriod;
pub use pipeline::{
    extract_financial_data, finalize, run_local_extraction, run_local_extraction_with,
    DocumentContext,
};
pub use schema::{
    AnnualFigures, ExtractedFinancials, FinancialLineItem, LlmAnnualFigures, LlmFinancials,
    LlmPeriodFigures, PeriodFigures, ProfitVerdict,
};
pub use table::{ColumnMap, RawTable, StatementSource};
