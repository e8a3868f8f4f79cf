use statement_extractor::{extract_financial_data, ErrorBody, ExtractionError};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: extract_statement <statement.pdf>"))?;

    match extract_financial_data(&path) {
        Ok(financials) => {
            println!("{}", serde_json::to_string_pretty(&financials)?);
        }
        Err(
            e @ (ExtractionError::NoFinancialDataFound | ExtractionError::NoContentExtracted),
        ) => {
            println!("{}", serde_json::to_string_pretty(&ErrorBody::from_error(&e))?);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
