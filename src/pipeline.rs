//! The extraction pipeline.
//!
//! Stages run in order against a context object built fresh for each
//! document: text loading, period resolution, table location, row
//! classification, then the unit/company detectors. The context is
//! discarded at the end of the run; only the normalized
//! [`ExtractedFinancials`] survives.

use crate::document::{self, OcrConfig};
use crate::error::{ExtractionError, Result};
use crate::periods::{self, ReportingPeriod};
use crate::schema::ExtractedFinancials;
use crate::table::{self, RawTable, StatementSource};
use crate::{detect, rows};
use log::{info, warn};
use std::path::Path;

/// Working state threaded by reference through the pipeline stages for a
/// single document.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Full plain text of the document, as loaded.
    pub full_text: String,
    /// Most recent reporting period found in the text, if any.
    pub latest_period: Option<ReportingPeriod>,
    /// The reporting period immediately prior, if any.
    pub previous_period: Option<ReportingPeriod>,
    /// The normalized result, populated additively by the stages.
    pub financials: ExtractedFinancials,
}

/// Builds the context from loaded text: resolves periods and runs the
/// free-text detectors for unit, company name and annual year.
pub fn build_context(full_text: String) -> DocumentContext {
    let (latest_period, previous_period) = periods::resolve_periods(&full_text);
    if let Some(period) = latest_period {
        info!("Latest reporting period: {}", period);
    }

    let unit = detect::detect_unit(&full_text);
    let mut financials = ExtractedFinancials {
        company_name: detect::detect_company_name(&full_text),
        ..Default::default()
    };
    financials.current_period.unit = unit.clone();
    financials.annual_period.figures.unit = unit;
    financials.annual_period.year = detect::detect_annual_year(&full_text);

    DocumentContext {
        full_text,
        latest_period,
        previous_period,
        financials,
    }
}

/// Maps the table's columns and extracts row values into the context.
/// A failed column mapping leaves every table-derived value unset.
pub fn apply_table(ctx: &mut DocumentContext, statement: &RawTable) {
    let columns = statement
        .header()
        .ok_or(ExtractionError::ColumnMappingFailed)
        .and_then(table::map_columns);

    match columns {
        Ok(columns) => rows::extract_row_values(statement, &columns, &mut ctx.financials),
        Err(e) => warn!("{}; table values stay unset", e),
    }
}

/// Runs the local (non-LLM) extraction stages with default OCR settings.
pub fn run_local_extraction(path: &Path) -> Result<DocumentContext> {
    run_local_extraction_with(path, &OcrConfig::default())
}

/// Runs the local extraction stages. Never signals
/// [`ExtractionError::NoFinancialDataFound`] itself — that decision belongs
/// to [`finalize`], after any fallback strategy has had its chance.
pub fn run_local_extraction_with(path: &Path, config: &OcrConfig) -> Result<DocumentContext> {
    let full_text = document::load_document_text(path, config)?;
    let mut ctx = build_context(full_text);

    let pages = document::page_texts(&ctx.full_text);
    match table::locate_statement_source(path, &pages, config) {
        Some(StatementSource::Table(statement)) => apply_table(&mut ctx, &statement),
        Some(StatementSource::OcrText(_)) => {
            info!("Only OCR text available; no rows to classify")
        }
        None => warn!("No statement table and no OCR text in the document"),
    }

    Ok(ctx)
}

/// Returns the normalized result, or
/// [`ExtractionError::NoFinancialDataFound`] when every financial field in
/// both periods is still unset.
pub fn finalize(ctx: DocumentContext) -> Result<ExtractedFinancials> {
    if ctx.financials.is_empty() {
        return Err(ExtractionError::NoFinancialDataFound);
    }
    Ok(ctx.financials)
}

/// Local-only extraction: loader through detectors, no LLM fallback.
pub fn extract_financial_data(path: &Path) -> Result<ExtractedFinancials> {
    finalize(run_local_extraction(path)?)
}
