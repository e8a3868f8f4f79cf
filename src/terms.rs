//! Synonym dictionaries for the canonical financial line items.
//!
//! Each dictionary maps many label phrases to an integer priority rank.
//! A lower rank means higher precedence when several phrases are contained
//! in the same row label. The tables are process-wide constants and are
//! never mutated after initialization.

/// Revenue synonyms, most specific first.
pub const REVENUE_TERMS: &[(&str, u32)] = &[
    ("revenue from operations", 1),
    ("Total Revenue", 2),
    ("Turnover", 3),
    ("Net Sales", 4),
    ("Gross Revenue", 5),
    ("Operating Revenue", 6),
    ("Revenues", 7),
    ("Receipts", 8),
    ("Income from Operations", 9),
    ("Business Income", 10),
    ("Gross Sales", 11),
];

/// Operating-profit synonyms.
pub const OPERATING_PROFIT_TERMS: &[(&str, u32)] = &[
    ("Operating Profit", 1),
    ("EBIT", 2),
    ("Earnings Before Interest and Tax", 3),
    ("Profit Before Tax", 4),
    ("PBIT", 5),
    ("Operating Income", 6),
    ("Operating Earnings", 7),
    ("Core Earnings", 8),
    ("NOP", 9),
    ("NOPAT", 10),
    ("Operating Margin", 11),
    ("Pre-Tax Operating Profit", 12),
];

/// Net-profit synonyms.
pub const NET_PROFIT_TERMS: &[(&str, u32)] = &[
    ("Net Profit", 1),
    ("Net Income", 2),
    ("Profit After Tax", 3),
    ("PAT", 4),
    ("Earnings After Tax", 5),
    ("Final Profit", 6),
    ("Net Earnings", 7),
    ("Total Comprehensive Income", 8),
    ("Post-Tax Profit", 9),
];

/// Returns the contained phrase with the lowest priority rank, if any.
///
/// Matching is case-insensitive substring containment against the row label.
/// Ranks are distinct within a table, so the winner is unambiguous; should a
/// tie ever appear, the earlier table entry wins, which keeps selection
/// deterministic.
pub fn best_match<'a>(terms: &'a [(&'a str, u32)], label: &str) -> Option<&'a str> {
    let label_lower = label.to_lowercase();
    terms
        .iter()
        .filter(|(phrase, _)| label_lower.contains(&phrase.to_lowercase()))
        .min_by_key(|(_, rank)| *rank)
        .map(|(phrase, _)| *phrase)
}
