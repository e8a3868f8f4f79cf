//! Row classification and numeric value extraction.

use crate::schema::{ExtractedFinancials, FinancialLineItem};
use crate::table::{ColumnMap, RawTable};
use crate::terms;
use log::debug;

/// Walks the data rows of the statement table and populates the current and
/// annual figures.
///
/// Each row label is tested independently against all three synonym
/// dictionaries, so a label containing both revenue and profit wording
/// populates several line items from the same row. That is intentional,
/// documented behavior. Within one pass a later matching row overwrites an
/// earlier one for the same line item.
pub fn extract_row_values(
    table: &RawTable,
    columns: &ColumnMap,
    financials: &mut ExtractedFinancials,
) {
    for row in table.data_rows() {
        let label = match row.first() {
            Some(label) if !label.trim().is_empty() => label,
            _ => continue,
        };

        for item in FinancialLineItem::ALL {
            if let Some(phrase) = terms::best_match(item.terms(), label) {
                debug!("Row '{}' matched {:?} via '{}'", label, item, phrase);
                financials
                    .current_period
                    .set_figure(item, cell_value(row, columns.current));
                financials
                    .annual_period
                    .figures
                    .set_figure(item, cell_value(row, columns.annual));
            }
        }
    }
}

/// Parses the cell at `index`, if present. Thousands separators are
/// stripped before parsing; an absent, out-of-range or non-numeric cell
/// yields `None`.
fn cell_value(row: &[String], index: usize) -> Option<f64> {
    row.get(index).and_then(|cell| parse_amount(cell))
}

fn parse_amount(cell: &str) -> Option<f64> {
    cell.trim().replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    const COLUMNS: ColumnMap = ColumnMap {
        current: 1,
        annual: 3,
    };

    #[test]
    fn test_revenue_row_with_separators_and_dash() {
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["Total Revenue", "1,234.50", "—", "5,678.90"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);

        assert_eq!(financials.current_period.revenue, Some(1234.50));
        assert_eq!(financials.annual_period.figures.revenue, Some(5678.90));
    }

    #[test]
    fn test_row_matching_two_dictionaries_populates_both() {
        // The label carries a net-profit synonym and "EBIT", so both line
        // items are filled from the same row. Documented behavior, not a bug.
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["Net Profit / Total Comprehensive Income after EBIT", "9.5", "-", "40.0"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);

        assert_eq!(financials.current_period.net_profit, Some(9.5));
        assert_eq!(financials.current_period.operating_profit, Some(9.5));
        assert_eq!(financials.annual_period.figures.net_profit, Some(40.0));
        assert_eq!(financials.annual_period.figures.operating_profit, Some(40.0));
    }

    #[test]
    fn test_later_row_wins() {
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["Revenue from Operations", "100.0", "-", "400.0"],
            &["Total Revenue", "110.0", "-", "440.0"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);

        assert_eq!(financials.current_period.revenue, Some(110.0));
        assert_eq!(financials.annual_period.figures.revenue, Some(440.0));
    }

    #[test]
    fn test_blank_label_rows_are_skipped() {
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["", "100.0", "-", "400.0"],
            &["   ", "200.0", "-", "800.0"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);
        assert!(financials.is_empty());
    }

    #[test]
    fn test_short_row_leaves_annual_unset() {
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["Net Sales", "77.7"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);

        assert_eq!(financials.current_period.revenue, Some(77.7));
        assert_eq!(financials.annual_period.figures.revenue, None);
    }

    #[test]
    fn test_unmatched_rows_extract_nothing() {
        let table = table(&[
            &["Particulars", "Q3", "Q2", "Year Ended"],
            &["Depreciation", "12.0", "-", "48.0"],
        ]);

        let mut financials = ExtractedFinancials::default();
        extract_row_values(&table, &COLUMNS, &mut financials);
        assert!(financials.is_empty());
    }
}
