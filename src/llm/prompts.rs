//! Prompt templates for the fallback extraction and the chat assistant.

use crate::schema::ExtractedFinancials;

pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are a financial data extraction engine. You read the text of quarterly \
financial statements and return only valid JSON. Never include commentary \
outside the JSON object.";

/// How much of the raw document text is handed to the chat assistant.
pub const CHAT_CONTEXT_CHAR_LIMIT: usize = 2000;

pub fn extraction_prompt(document_text: &str) -> String {
    format!(
        r#"Identify the latest quarter's financial data and annual data, and extract values for:
1. Revenue
2. Operating Profit
3. Net Profit
4. Financial Unit (Crores, Lakhs, Millions, Billions)
5. Company Name
Search for the heading "Statement of" and find the latest quarter and the annual financial data (column marked with 'year ended').
The financial unit is usually mentioned above the table.
Provide output in JSON:
{{
  "CompanyName": "Detected company name",
  "CurrentQuarter": {{
    "Revenue": X,
    "OperatingProfit": Y,
    "NetProfit": Z,
    "Unit": "Detected financial unit"
  }},
  "AnnualData": {{
    "Year": "YYYY",
    "Revenue": D,
    "OperatingProfit": E,
    "NetProfit": F,
    "Unit": "Detected financial unit"
  }}
}}
Use null for any value that is not present in the text.
Text to analyze:
{document_text}"#
    )
}

pub const CHAT_SYSTEM_PROMPT: &str = "\
You are a financial assistant. Based on the provided financial data and the \
user's question, provide a concise, informative answer. If the answer is \
not available in the data, say so and suggest what information would be \
needed.";

/// Renders the normalized figures as the grounding block for a chat turn.
pub fn financial_summary(financials: &ExtractedFinancials) -> String {
    let current = &financials.current_period;
    let annual = &financials.annual_period;

    format!(
        "Financial data for {}:\n\n\
        Current Quarter Data:\n\
        - Revenue: {} {}\n\
        - Operating Profit: {} {}\n\
        - Net Profit: {} {}\n\n\
        Annual Data:\n\
        - Year: {}\n\
        - Revenue: {} {}\n\
        - Operating Profit: {} {}\n\
        - Net Profit: {} {}",
        financials.company_name,
        fmt_value(current.revenue),
        current.unit,
        fmt_value(current.operating_profit),
        current.unit,
        fmt_value(current.net_profit),
        current.unit,
        annual.year,
        fmt_value(annual.figures.revenue),
        annual.figures.unit,
        fmt_value(annual.figures.operating_profit),
        annual.figures.unit,
        fmt_value(annual.figures.net_profit),
        annual.figures.unit,
    )
}

pub fn chat_prompt(
    question: &str,
    financials: &ExtractedFinancials,
    document_text: &str,
) -> String {
    format!(
        "{}\n\nRelevant text from the financial statement (truncated):\n{}\n\nUser Question: {}",
        financial_summary(financials),
        truncate_chars(document_text, CHAT_CONTEXT_CHAR_LIMIT),
        question
    )
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "not available".to_string(),
    }
}

/// Truncates to at most `limit` characters, respecting char boundaries.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
