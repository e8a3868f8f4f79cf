use dotenv::dotenv;
use statement_extractor::llm::{Conversation, FinancialAssistant, GeminiClient};
use statement_extractor::pipeline::{finalize, run_local_extraction};
use std::io::{self, Write};
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
        .ok_or_else(|| anyhow::anyhow!("usage: chat_session <statement.pdf>"))?;

    let ctx = run_local_extraction(&path)?;
    let document_text = ctx.full_text.clone();
    let financials = finalize(ctx)?;

    let assistant = FinancialAssistant::new(GeminiClient::new(api_key));
    let mut conversation = Conversation::new();

    println!(
        "Loaded figures for {}. Ask questions about the statement (type 'quit' to exit).",
        financials.company_name
    );
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let question = input.trim();

        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }

        if question.is_empty() {
            continue;
        }

        match assistant
            .ask(&mut conversation, question, &financials, &document_text)
            .await
        {
            Ok(answer) => {
                println!("\n{}\n", answer);
                println!("------------------------------------------------------------------");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}
