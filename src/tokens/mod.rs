//! Token counting and token-budgeted truncation.
//!
//! ## Overview
//!
//! Token counts gate everything sent to a completion endpoint: document
//! content must fit the context window with room left for the prompt pair and
//! the response. This module provides the two operations the rest of the
//! crate builds on:
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`count_tokens`] | Token count for a model: exact BPE when the model is known, `len/4` estimate otherwise |
//! | [`truncate_to_token_limit`] | Cut text to a token budget, preferring a sentence/line/word boundary near the cut |
//!
//! ## Counting Accuracy
//!
//! | Path | Accuracy | When |
//! |------|----------|------|
//! | BPE ([`BpeCounter`]) | Exact | Model name resolves to a tiktoken encoding |
//! | Estimate ([`CharacterEstimator`]) | ~4 chars per token | Unknown model, or the encoding fails to load |
//!
//! The estimate path is deliberate graceful degradation: callers always get a
//! number, never an error, and must tolerate imprecision when the model is
//! not recognized.

mod budget;
mod counter;

pub use budget::truncate_to_token_limit;
pub use counter::{
    count_tokens, counter_for, BpeCounter, CharacterEstimator, TokenCounter,
    FALLBACK_CHARS_PER_TOKEN,
};
