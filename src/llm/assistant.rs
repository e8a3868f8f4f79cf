//! Conversational question answering grounded in the extracted figures.

use crate::error::Result;
use crate::llm::client::GeminiClient;
use crate::llm::prompts;
use crate::llm::types::Content;
use crate::schema::ExtractedFinancials;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Ordered, append-only history of one chat session. Owned by the caller;
/// the assistant itself is stateless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: content.into(),
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

pub struct FinancialAssistant {
    client: GeminiClient,
    model: String,
}

impl FinancialAssistant {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Answers a question grounded in the normalized figures and the first
    /// 2000 characters of the raw document text. The response is free text
    /// and is not validated or structured here.
    pub async fn answer(
        &self,
        question: &str,
        financials: &ExtractedFinancials,
        document_text: &str,
    ) -> Result<String> {
        let prompt = prompts::chat_prompt(question, financials, document_text);
        self.client
            .generate_content(
                &self.model,
                prompts::CHAT_SYSTEM_PROMPT,
                vec![Content::user(prompt)],
                "text/plain",
                None,
            )
            .await
    }

    /// Like [`answer`](Self::answer), recording both sides of the exchange
    /// in the conversation. The question is recorded even when the model
    /// call fails, matching the append-only history semantics.
    pub async fn ask(
        &self,
        conversation: &mut Conversation,
        question: &str,
        financials: &ExtractedFinancials,
        document_text: &str,
    ) -> Result<String> {
        conversation.push_user(question);
        let answer = self.answer(question, financials, document_text).await?;
        conversation.push_assistant(answer.clone());
        Ok(answer)
    }
}
