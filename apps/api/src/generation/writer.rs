//! Message writers: pluggable backends that turn an assembled prompt into message text.
//!
//! `GeminiWriter` calls the Gemini API. `TemplateWriter` renders the canned template
//! for the requested (type, tone) pair and is used when no API key is configured.
//!
//! `AppState` holds an `Arc<dyn MessageWriter>`, chosen once at startup.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::generation::labels::{MessageType, Tone};
use crate::generation::prompts::MOCK_NOTICE;
use crate::generation::templates::render_template;
use crate::llm_client::prompts::with_preamble;
use crate::llm_client::LlmClient;

/// Inputs a writer may draw on. Gemini only reads `prompt`; the template writer
/// only reads the structured fields.
#[derive(Debug, Clone)]
pub struct WriteRequest<'a> {
    pub prompt: &'a str,
    pub message_type: MessageType,
    pub tone: Tone,
    pub customer_name: &'a str,
    pub what_happened: &'a str,
}

#[derive(Debug, Clone)]
pub struct WrittenMessage {
    pub message: String,
    /// Set when the text did not come from the model.
    pub note: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait MessageWriter: Send + Sync {
    async fn write(&self, request: &WriteRequest<'_>) -> Result<WrittenMessage, AppError>;

    /// Backend name, logged at startup and per generation.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiWriter
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiWriter {
    llm: LlmClient,
}

impl GeminiWriter {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MessageWriter for GeminiWriter {
    async fn write(&self, request: &WriteRequest<'_>) -> Result<WrittenMessage, AppError> {
        let message = self.llm.call_text(&with_preamble(request.prompt)).await?;
        Ok(WrittenMessage {
            message,
            note: None,
        })
    }

    fn backend(&self) -> &'static str {
        "gemini"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateWriter
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic fallback. Never fails.
pub struct TemplateWriter;

#[async_trait]
impl MessageWriter for TemplateWriter {
    async fn write(&self, request: &WriteRequest<'_>) -> Result<WrittenMessage, AppError> {
        Ok(WrittenMessage {
            message: render_template(
                request.message_type,
                request.tone,
                request.customer_name,
                request.what_happened,
            ),
            note: Some(MOCK_NOTICE.to_string()),
        })
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}
