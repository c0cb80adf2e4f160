//! Token counter implementations.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tiktoken_rs::tokenizer::get_tokenizer;
use tiktoken_rs::{get_bpe_from_tokenizer, CoreBPE};

/// Character-to-token ratio used by the estimation fallback and by the
/// truncator's character allowance.
pub const FALLBACK_CHARS_PER_TOKEN: usize = 4;

pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;

    /// Whether counts from this counter are exact for the model, as opposed
    /// to a character-ratio estimate.
    fn is_exact(&self) -> bool {
        false
    }
}

/// Exact counter backed by a tiktoken BPE encoding.
pub struct BpeCounter {
    bpe: CoreBPE,
}

impl BpeCounter {
    /// Capability check: resolve the model name to an encoding.
    ///
    /// Returns `None` for unknown models or when the encoding fails to load,
    /// so callers can fall back to estimation without error plumbing.
    pub fn for_model(model: &str) -> Option<Self> {
        let tokenizer = get_tokenizer(model)?;
        let bpe = get_bpe_from_tokenizer(tokenizer).ok()?;
        Some(Self { bpe })
    }
}

impl TokenCounter for BpeCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn is_exact(&self) -> bool {
        true
    }
}

/// Rough estimation at a fixed characters-per-token ratio.
///
/// Counts characters, not bytes, so multi-byte text does not inflate the
/// estimate. Floor division: text shorter than one ratio's worth of
/// characters counts as zero tokens.
#[derive(Debug, Clone)]
pub struct CharacterEstimator {
    chars_per_token: usize,
}

impl CharacterEstimator {
    pub fn new() -> Self {
        Self::with_ratio(FALLBACK_CHARS_PER_TOKEN)
    }

    pub fn with_ratio(chars_per_token: usize) -> Self {
        Self { chars_per_token }
    }
}

impl Default for CharacterEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for CharacterEstimator {
    fn count(&self, text: &str) -> usize {
        text.chars().count() / self.chars_per_token
    }
}

static COUNTERS: Lazy<RwLock<HashMap<String, Arc<dyn TokenCounter>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Resolve the counter for a model, memoized per lowercased model id.
///
/// BPE tables are expensive to build, so the first lookup for a model pays
/// the construction cost and later lookups hit the cache.
pub fn counter_for(model: &str) -> Arc<dyn TokenCounter> {
    let key = model.to_lowercase();
    {
        let cache = COUNTERS.read().unwrap();
        if let Some(counter) = cache.get(&key) {
            return counter.clone();
        }
    }
    let counter: Arc<dyn TokenCounter> = match BpeCounter::for_model(&key) {
        Some(bpe) => Arc::new(bpe),
        None => {
            tracing::debug!(model = %key, "no exact tokenizer for model, using character estimate");
            Arc::new(CharacterEstimator::new())
        }
    };
    // First insert wins if two threads raced on the same model.
    let mut cache = COUNTERS.write().unwrap();
    cache.entry(key).or_insert(counter).clone()
}

/// Count tokens in `text` for `model`.
///
/// Exact when the model resolves to a tiktoken encoding; otherwise
/// `chars(text) / 4`. Never fails: an unknown model selects the estimate, it
/// does not produce an error. Empty text is 0 on both paths.
pub fn count_tokens(text: &str, model: &str) -> usize {
    counter_for(model).count(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimator_floors_at_four_chars_per_token() {
        let est = CharacterEstimator::new();
        assert_eq!(est.count(""), 0);
        assert_eq!(est.count("abc"), 0);
        assert_eq!(est.count("abcd"), 1);
        assert_eq!(est.count("abcdefg"), 1);
        assert_eq!(est.count(&"x".repeat(100)), 25);
    }

    #[test]
    fn estimator_counts_chars_not_bytes() {
        // 8 chars, 24 bytes
        let text = "日本語日本語日本";
        assert_eq!(CharacterEstimator::new().count(text), 2);
    }

    #[test]
    fn unknown_model_uses_estimate() {
        let counter = counter_for("unknown-model-xyz");
        assert!(!counter.is_exact());
        assert_eq!(count_tokens("abcdefgh", "unknown-model-xyz"), 2);
    }

    #[test]
    fn known_model_is_exact() {
        let counter = counter_for("gpt-3.5-turbo");
        assert!(counter.is_exact());
        // One short English word is one token under cl100k.
        assert_eq!(counter.count("hello"), 1);
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn counter_cache_is_case_insensitive() {
        let a = counter_for("GPT-3.5-Turbo");
        let b = counter_for("gpt-3.5-turbo");
        assert!(Arc::ptr_eq(&a, &b));
    }
}
