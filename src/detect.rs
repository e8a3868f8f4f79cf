//! Reporting-unit, company-name and fiscal-year detection from free text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognised reporting units, in detection order.
pub const UNIT_KEYWORDS: &[&str] = &["Crores", "Lakhs", "Millions", "Billions"];

static COMPANY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Company Name|Statement of|Financial Report of)\s*[:\-\s]*([A-Za-z0-9&.,\s]+)")
        .unwrap()
});

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// Detects the reporting currency unit. First keyword contained in the text
/// (case-insensitively) wins; `"Unknown"` when none appears.
pub fn detect_unit(text: &str) -> String {
    let text_lower = text.to_lowercase();
    UNIT_KEYWORDS
        .iter()
        .find(|unit| text_lower.contains(&unit.to_lowercase()))
        .map(|unit| unit.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Extracts the company name from the text following one of the
/// conventional heading phrases. `"Unknown Company"` when absent.
pub fn detect_company_name(text: &str) -> String {
    COMPANY_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "Unknown Company".to_string())
}

/// The first four-digit token anywhere in the text, used to label the
/// annual period. `"Unknown Year"` when absent.
pub fn detect_annual_year(text: &str) -> String {
    YEAR_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "Unknown Year".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_detection() {
        assert_eq!(detect_unit("Figures in Lakhs unless stated"), "Lakhs");
        assert_eq!(detect_unit("amounts in CRORES of rupees"), "Crores");
        assert_eq!(detect_unit("plain text"), "Unknown");
    }

    #[test]
    fn test_unit_detection_order() {
        // Both keywords present: the earlier entry in the fixed list wins.
        assert_eq!(detect_unit("in Lakhs (previous year in Crores)"), "Crores");
    }

    #[test]
    fn test_company_name() {
        assert_eq!(
            detect_company_name("Statement of ACME Industries Ltd. for the quarter"),
            "ACME Industries Ltd. for the quarter"
        );
        assert_eq!(
            detect_company_name("Company Name: Bharat Widgets & Co"),
            "Bharat Widgets & Co"
        );
        assert_eq!(detect_company_name("no heading here"), "Unknown Company");
    }

    #[test]
    fn test_annual_year() {
        assert_eq!(detect_annual_year("Year ended 31 March 2024"), "2024");
        assert_eq!(detect_annual_year("no years"), "Unknown Year");
    }
}
