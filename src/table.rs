//! Locating the financial statement table and mapping its columns.
//!
//! Text extracted from a PDF keeps its visual column alignment as runs of
//! whitespace, so tables are reconstructed line by line: a cell boundary is
//! a tab or a run of two or more spaces, and a table is a maximal run of
//! consecutive lines that split into at least two cells.

use crate::document::{self, OcrConfig};
use crate::error::{ExtractionError, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Header cell marking the row-description column of a financial statement
/// table. The check is a case-sensitive substring match.
pub const TABLE_MARKER: &str = "Particulars";

static CELL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t+| {2,}").unwrap());

/// An ordered grid of cell strings. The first row is the header. Transient:
/// not kept beyond the extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|row| row.as_slice())
    }

    /// Rows below the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    fn has_marker(&self) -> bool {
        self.header()
            .map(|header| header.iter().any(|cell| cell.contains(TABLE_MARKER)))
            .unwrap_or(false)
    }
}

/// Mutually exclusive outcome of the table search: either a structured
/// table was found, or the fallback OCR text of the page is returned.
#[derive(Debug, Clone)]
pub enum StatementSource {
    Table(RawTable),
    OcrText(String),
}

/// Resolved column indices within the statement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Column holding the latest quarter's values.
    pub current: usize,
    /// Column holding the "year ended" (annual) values.
    pub annual: usize,
}

/// Reconstructs tables from a page of extracted text.
pub fn parse_tables(page_text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    for line in page_text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            run.push(cells);
        } else if !run.is_empty() {
            if run.len() >= 2 {
                tables.push(RawTable {
                    rows: std::mem::take(&mut run),
                });
            } else {
                run.clear();
            }
        }
    }

    if run.len() >= 2 {
        tables.push(RawTable { rows: run });
    }

    tables
}

fn split_cells(line: &str) -> Vec<String> {
    CELL_BOUNDARY
        .split(line)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Finds the first table on any page whose header carries the
/// `Particulars` marker, or [`ExtractionError::TableNotFound`]. Not fatal:
/// callers fall back to OCR.
pub fn find_statement_table(pages: &[String]) -> Result<RawTable> {
    for (index, page) in pages.iter().enumerate() {
        for table in parse_tables(page) {
            if table.has_marker() {
                info!("Statement table found on page {}", index + 1);
                return Ok(table);
            }
        }
        debug!("No statement table on page {}", index + 1);
    }
    Err(ExtractionError::TableNotFound)
}

/// Locates the statement table, falling back to OCR on the first page when
/// no table anywhere carries the marker.
///
/// OCR text is raw page content: it is never row-classified, so a document
/// that only yields `OcrText` produces an empty local extraction and is
/// handed to the fallback strategy. An OCR failure is absorbed here; the
/// pipeline degrades to "no table" rather than aborting.
pub fn locate_statement_source(
    path: &Path,
    pages: &[String],
    ocr: &OcrConfig,
) -> Option<StatementSource> {
    match find_statement_table(pages) {
        Ok(table) => return Some(StatementSource::Table(table)),
        Err(e) => info!("{}; trying OCR", e),
    }

    match document::ocr_page(path, 1, ocr) {
        Ok(text) if !text.trim().is_empty() => Some(StatementSource::OcrText(text)),
        Ok(_) => None,
        Err(e) => {
            warn!("OCR fallback failed: {}", e);
            None
        }
    }
}

/// Maps the header row to column indices.
///
/// The column immediately right of the `Particular` cell holds the current
/// period; the column whose caption contains "year ended" (any case) holds
/// the annual figures. If either marker is missing the mapping fails and
/// no values are extracted from the table — a default column is never
/// guessed.
pub fn map_columns(header: &[String]) -> Result<ColumnMap> {
    let mut current = None;
    let mut annual = None;

    for (index, cell) in header.iter().enumerate() {
        if cell.contains("Particular") {
            current = Some(index + 1);
        }
        if cell.to_lowercase().contains("year ended") {
            annual = Some(index);
        }
    }

    match (current, annual) {
        (Some(current), Some(annual)) => Ok(ColumnMap { current, annual }),
        _ => {
            debug!(
                "Header markers incomplete (current: {:?}, annual: {:?})",
                current, annual
            );
            Err(ExtractionError::ColumnMappingFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
Statement of ACME Industries Ltd
Figures in Lakhs unless stated

Particulars\tQuarter Ended 31-12-2023\tQuarter Ended 30-09-2023\tYear Ended 31-03-2023
Revenue from Operations\t1,234.50\t1,100.00\t4,800.25
Net Profit\t210.75\t190.10\t800.00
";

    #[test]
    fn test_parse_tables_from_aligned_text() {
        let tables = parse_tables(PAGE);
        assert_eq!(tables.len(), 1);

        let table = &tables[0];
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.header().unwrap()[0], "Particulars");
        assert_eq!(table.data_rows()[0][1], "1,234.50");
    }

    #[test]
    fn test_parse_tables_space_separated() {
        let text = "Particulars   Q3 FY24   Year Ended 31-03-2023\nTurnover   55.5   201.0\n";
        let tables = parse_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[1], vec!["Turnover", "55.5", "201.0"]);
    }

    #[test]
    fn test_single_cell_lines_are_not_tables() {
        let text = "a sentence\nanother sentence\n";
        assert!(parse_tables(text).is_empty());
    }

    #[test]
    fn test_find_statement_table_skips_unmarked_pages() {
        let pages = vec![
            "Notes   Amount\nInterest   12.0\nTax   3.0\n".to_string(),
            PAGE.to_string(),
        ];
        let table = find_statement_table(&pages).unwrap();
        assert!(table.has_marker());
    }

    #[test]
    fn test_find_statement_table_not_found() {
        let pages = vec!["Notes   Amount\nInterest   12.0\n".to_string()];
        assert!(matches!(
            find_statement_table(&pages),
            Err(ExtractionError::TableNotFound)
        ));
    }

    #[test]
    fn test_map_columns() {
        let header: Vec<String> = [
            "Sl. No.",
            "Notes",
            "Particulars",
            "Quarter Ended 31-12-2023",
            "Quarter Ended 30-09-2023",
            "Year Ended 31 Mar 2024",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let map = map_columns(&header).unwrap();
        assert_eq!(map.current, 3);
        assert_eq!(map.annual, 5);
    }

    #[test]
    fn test_map_columns_requires_both_markers() {
        let header: Vec<String> = ["Particulars", "Q1", "Q2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(
            map_columns(&header),
            Err(ExtractionError::ColumnMappingFailed)
        ));

        let header: Vec<String> = ["Description", "Year Ended 31-03-2024"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(map_columns(&header).is_err());
    }
}
