//! # promptdoc
//!
//! Prompt builder and document summarizer toolkit: assemble prompt fragments
//! into a structured prompt, extract plain text from common document formats,
//! and keep everything inside a model's context window with token-budgeted
//! truncation.
//!
//! ## Overview
//!
//! The crate is built around one small core and a few collaborators:
//!
//! - **Token budgeter** ([`tokens`]): count tokens for a model (exact BPE
//!   where available, a 4-chars-per-token estimate otherwise) and truncate
//!   text to a token budget, preferring sentence/line/word boundaries.
//! - **Document extractor** ([`extract`]): dispatch on file extension and
//!   return plain text for PDF, DOCX, TXT, CSV, and XLSX files.
//! - **Completion client** ([`client`]): a thin chat-completions client over
//!   an OpenAI-style HTTP endpoint.
//! - **Orchestration** ([`ops`]): the prompt-generation and two-step document
//!   summarization flows wiring the above together.
//!
//! ## Quick Start
//!
//! ```rust
//! use promptdoc::tokens::{count_tokens, truncate_to_token_limit};
//!
//! let text = "A long document body...";
//! let tokens = count_tokens(text, "gpt-3.5-turbo");
//!
//! // Fit the text into a 1000-token budget, breaking at a natural boundary
//! // when one is close enough to the cut.
//! let (fitted, fitted_tokens) = truncate_to_token_limit(text, 1000, "gpt-3.5-turbo");
//! assert!(fitted.len() <= text.len());
//! assert!(fitted_tokens <= tokens.max(1000));
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tokens`] | Token counting and token-budgeted truncation |
//! | [`extract`] | Document text extraction (PDF/DOCX/TXT/CSV/XLSX) |
//! | [`client`] | Chat-completions HTTP client |
//! | [`prompt`] | Prompt fragment assembly and canned prompt pairs |
//! | [`ops`] | Prompt-generation and summarization orchestration |
//! | [`config`] | Environment-backed application configuration |

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod ops;
pub mod prompt;
pub mod tokens;

// Re-export main types for convenience
pub use client::{CompletionClient, SamplingParams};
pub use config::AppConfig;
pub use error::Error;
pub use extract::{extract_text, extract_text_or_diagnostic, ExtractError};
pub use ops::{GeneratedPrompt, PromptOps};
pub use prompt::PromptParts;
pub use tokens::{count_tokens, truncate_to_token_limit};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
