//! Orchestration flows: structured prompt generation and the two-step
//! document summarization (generate a summarization prompt, then summarize
//! with it).
//!
//! Each flow truncates document content to a token budget that leaves room
//! for the surrounding prompt pair and the model's response, then calls the
//! completion client. Failures propagate as [`crate::Error`]; rendering them
//! as user-facing strings is the caller's job (see the CLI).

use crate::client::{CompletionClient, SamplingParams};
use crate::config::AppConfig;
use crate::prompt::{
    self, PromptParts, PROMPT_ARCHITECT_SYSTEM, STRUCTURED_PROMPT_SYSTEM, SUMMARIZER_SYSTEM,
};
use crate::tokens::{count_tokens, truncate_to_token_limit};
use crate::{Error, Result};

/// Token budget for document content when generating a summarization prompt;
/// leaves roughly 1000 tokens of headroom for the prompt pair.
const PROMPT_BUDGET_TOKENS: usize = 12_000;

/// Token budget for document content when summarizing; leaves roughly 2000
/// tokens for the prompt pair and the response.
const SUMMARY_BUDGET_TOKENS: usize = 10_000;

/// Result of the structured-prompt flow: the model's improved prompt plus
/// the combined fragments it was derived from.
#[derive(Debug, Clone)]
pub struct GeneratedPrompt {
    pub response: String,
    pub combined: String,
}

/// The orchestration layer. Owns a completion client built from an explicit
/// configuration; no global state.
pub struct PromptOps {
    client: CompletionClient,
    config: AppConfig,
}

impl PromptOps {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = CompletionClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Turn user-entered fragments into an improved, well-structured prompt.
    ///
    /// All-blank input is rejected before any network call.
    pub async fn generate_prompt(&self, parts: &PromptParts) -> Result<GeneratedPrompt> {
        let combined = parts.combine();
        if combined.trim().is_empty() {
            return Err(Error::configuration(
                "Please fill in at least one field to generate a prompt.",
            ));
        }

        let response = self
            .client
            .complete(
                STRUCTURED_PROMPT_SYSTEM,
                &prompt::structured_prompt_user(&combined),
                SamplingParams {
                    temperature: self.config.temperature,
                    max_tokens: self.config.max_output_tokens,
                },
            )
            .await?;

        Ok(GeneratedPrompt { response, combined })
    }

    /// Step one of summarization: ask the model for a summarization prompt
    /// tailored to this document.
    pub async fn generate_summarization_prompt(&self, document: &str) -> Result<String> {
        let (content, token_count) =
            truncate_to_token_limit(document, PROMPT_BUDGET_TOKENS, self.client.model());

        self.client
            .complete(
                PROMPT_ARCHITECT_SYSTEM,
                &prompt::prompt_architect_user(&content, token_count),
                SamplingParams {
                    temperature: 0.7,
                    max_tokens: 1000,
                },
            )
            .await
    }

    /// Step two of summarization: summarize the document with a previously
    /// generated prompt. Appends a truncation note when the document had to
    /// be cut to fit the context budget.
    pub async fn summarize_with_prompt(
        &self,
        document: &str,
        summarization_prompt: &str,
    ) -> Result<String> {
        let model = self.client.model();
        let (content, token_count) =
            truncate_to_token_limit(document, SUMMARY_BUDGET_TOKENS, model);

        let original_tokens = count_tokens(document, model);
        let truncation_note = if token_count < original_tokens {
            tracing::debug!(original_tokens, token_count, "document truncated for summary");
            format!(
                "\n\n[Note: Document was truncated from {original_tokens} to {token_count} tokens to fit context limits]"
            )
        } else {
            String::new()
        };

        let summary = self
            .client
            .complete(
                SUMMARIZER_SYSTEM,
                &prompt::summarizer_user(summarization_prompt, &content, token_count),
                SamplingParams {
                    temperature: 0.3,
                    max_tokens: 2000,
                },
            )
            .await?;

        Ok(format!("{summary}{truncation_note}"))
    }
}
