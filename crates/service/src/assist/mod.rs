//! Draft revision through an external generative-text API.
//!
//! The contract is fail-closed: whatever goes wrong (no credential, network,
//! API error, empty answer) the caller gets the original text back.

pub mod gemini;

pub use gemini::GeminiAssist;

use async_trait::async_trait;
use models::AssistMode;

/// Revise a draft. Implementations never fail; they fall back to `text`.
#[async_trait]
pub trait TextAssist: Send + Sync {
    async fn revise(&self, text: &str, mode: AssistMode) -> String;
}

/// Prompt sent to the model for a given mode.
pub fn build_prompt(text: &str, mode: AssistMode) -> String {
    match mode {
        AssistMode::Proofread => format!(
            "Proofread and improve the clarity of the following text for a book review. \
             Keep the original tone but fix grammar and flow:\n\n\"{text}\""
        ),
        AssistMode::Expand => format!(
            "Expand on the following thoughts for a book review. \
             Make it more insightful but keep it under 150 words added:\n\n\"{text}\""
        ),
    }
}
