//! Reporting-period resolution from free document text.
//!
//! Quarterly statements rarely label their periods consistently, but they
//! always carry calendar dates somewhere (header, signature block, column
//! captions). The resolver collects every date-looking token, parses it
//! against an ordered list of accepted formats, and treats the most recent
//! date as the latest reporting period and the second-ranked one as the
//! period immediately prior.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap());

/// Accepted day/month/year formats, tried in order. The first format that
/// parses a candidate wins; an ambiguous day/month value is never
/// re-interpreted under a later format once one has succeeded.
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d-%m-%y", "%d/%m/%y"];

/// A fiscal quarter within a calendar year, e.g. "Q1 2024".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub quarter: u32,
    pub year: i32,
}

impl ReportingPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            quarter: (date.month() - 1) / 3 + 1,
            year: date.year(),
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}

/// Scans `text` for dates and returns `(latest, previous)` reporting periods.
///
/// Duplicate dates count as separate entries: a document repeating its
/// period-end date twice resolves to the same period for both slots.
pub fn resolve_periods(text: &str) -> (Option<ReportingPeriod>, Option<ReportingPeriod>) {
    let mut dates: Vec<NaiveDate> = DATE_PATTERN
        .find_iter(text)
        .filter_map(|m| parse_candidate(m.as_str()))
        .collect();

    if dates.is_empty() {
        return (None, None);
    }

    dates.sort_unstable_by(|a, b| b.cmp(a));

    let latest = ReportingPeriod::from_date(dates[0]);
    let previous = dates.get(1).map(|d| ReportingPeriod::from_date(*d));

    (Some(latest), previous)
}

fn parse_candidate(candidate: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
}
