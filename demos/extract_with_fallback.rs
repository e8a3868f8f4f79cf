use dotenv::dotenv;
use statement_extractor::llm::{extract_with_fallback, FallbackExtractor, GeminiClient};
use statement_extractor::{ErrorBody, ExtractionError};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?;
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: extract_with_fallback <statement.pdf>"))?;

    let fallback = FallbackExtractor::new(GeminiClient::new(api_key));

    match extract_with_fallback(&path, &fallback).await {
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
