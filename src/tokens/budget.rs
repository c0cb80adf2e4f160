//! Token-budgeted truncation.

use super::counter::{count_tokens, FALLBACK_CHARS_PER_TOKEN};

/// Fraction of the character allowance a natural boundary must fall inside
/// for the cut to move back to it. A boundary further back than this would
/// cost more than 20% of the budget, so the raw character cut wins instead.
const BOUNDARY_WINDOW: f64 = 0.8;

/// Truncate `text` so it fits a token budget, returning the (possibly
/// unchanged) text and its token count.
///
/// When the text already fits, it is returned as-is with its measured count.
/// Otherwise the cut is character-based: the allowance is
/// `max_tokens * 4` characters regardless of how the initial count was
/// measured, which keeps the cut proportional and bounded even when an exact
/// tokenizer measured the input. Within the allowed prefix, the last period,
/// newline, or space wins as the cut point if it sits inside the trailing 20%
/// of the allowance; an earlier boundary would throw away too much of the
/// budget, so the ragged character cut is kept instead.
///
/// Total over its inputs: a zero budget yields `("", 0)`, and no input can
/// make this fail. The returned count is re-measured on the truncated text
/// and may land on either side of `max_tokens` by the imprecision of the
/// 4-chars-per-token allowance.
pub fn truncate_to_token_limit(text: &str, max_tokens: usize, model: &str) -> (String, usize) {
    let token_count = count_tokens(text, model);
    if token_count <= max_tokens {
        return (text.to_string(), token_count);
    }

    let max_chars = max_tokens * FALLBACK_CHARS_PER_TOKEN;
    // Character-wise prefix, never a byte slice: the input is arbitrary
    // Unicode and a byte cut could split a code point.
    let candidate: Vec<char> = text.chars().take(max_chars).collect();

    let break_point = candidate
        .iter()
        .rposition(|&c| c == '.' || c == '\n' || c == ' ');

    let truncated: String = match break_point {
        // Keep the boundary character itself.
        Some(i) if i as f64 > BOUNDARY_WINDOW * max_chars as f64 => {
            candidate[..=i].iter().collect()
        }
        _ => candidate.iter().collect(),
    };

    let final_count = count_tokens(&truncated, model);
    tracing::debug!(
        input_tokens = token_count,
        max_tokens,
        output_tokens = final_count,
        at_boundary = break_point.is_some_and(|i| i as f64 > BOUNDARY_WINDOW * max_chars as f64),
        "truncated text to token budget"
    );
    (truncated, final_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "unknown-model-xyz";

    #[test]
    fn no_truncation_when_under_limit() {
        let text = "short text";
        let (out, count) = truncate_to_token_limit(text, 100, MODEL);
        assert_eq!(out, text);
        assert_eq!(count, count_tokens(text, MODEL));
    }

    #[test]
    fn zero_budget_yields_empty() {
        let (out, count) = truncate_to_token_limit("some text here", 0, MODEL);
        assert_eq!(out, "");
        assert_eq!(count, 0);
    }

    #[test]
    fn breaks_at_late_period() {
        // 100 'A's, ". ", 5 'B's; budget chosen so max_chars = 105. The
        // period at index 100 sits inside the trailing 20% of 105, so the
        // cut moves back to include it.
        let text = format!("{}. {}{}", "A".repeat(100), "B".repeat(5), "C".repeat(200));
        let (out, _) = truncate_to_token_limit(&text, 26, MODEL);
        // Last boundary in the 104-char prefix is the space at index 101.
        assert!(out.ends_with(' '));
        assert_eq!(out.chars().count(), 102);
    }

    #[test]
    fn keeps_raw_prefix_when_no_boundary() {
        // No period/newline/space anywhere: raw character cut.
        let text = "X".repeat(1000);
        let (out, count) = truncate_to_token_limit(&text, 50, MODEL);
        assert_eq!(out.chars().count(), 200);
        assert_eq!(count, 50);
    }

    #[test]
    fn ignores_early_boundary() {
        // Single space at index 10, then unbroken text. 10 < 0.8 * 200, so
        // the boundary is too expensive and the full candidate is kept.
        let text = format!("{} {}", "a".repeat(10), "b".repeat(1000));
        let (out, _) = truncate_to_token_limit(&text, 50, MODEL);
        assert_eq!(out.chars().count(), 200);
    }

    #[test]
    fn unicode_input_cuts_on_char_boundary() {
        let text = "é".repeat(1000);
        let (out, count) = truncate_to_token_limit(&text, 100, MODEL);
        assert_eq!(out.chars().count(), 400);
        assert_eq!(count, 100);
    }

    #[test]
    fn output_never_longer_than_input() {
        for budget in [0, 1, 3, 10, 1000] {
            let text = "some words. and more words\nacross lines";
            let (out, _) = truncate_to_token_limit(text, budget, MODEL);
            assert!(out.chars().count() <= text.chars().count());
        }
    }
}
