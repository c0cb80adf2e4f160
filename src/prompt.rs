//! Prompt fragment assembly and the canned prompt pairs used by the
//! orchestration flows.

/// The user-entered prompt fragments. Blank fragments are skipped when
/// combining; labels are part of the output contract.
#[derive(Debug, Clone, Default)]
pub struct PromptParts {
    pub role: String,
    pub task: String,
    pub instruction: String,
    pub context: String,
    pub examples: String,
    pub reasoning_steps: String,
    pub delimiters: String,
}

impl PromptParts {
    /// Combine the non-blank fragments into one structured prompt, one
    /// `Label: value` paragraph per fragment, separated by blank lines.
    /// Returns an empty string when every fragment is blank.
    pub fn combine(&self) -> String {
        let labeled = [
            ("Role/Objective", &self.role),
            ("Task", &self.task),
            ("Instruction", &self.instruction),
            ("Context", &self.context),
            ("Examples", &self.examples),
            ("Reasoning Steps", &self.reasoning_steps),
            ("Delimiters/Structured Output", &self.delimiters),
        ];

        labeled
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn is_blank(&self) -> bool {
        self.combine().trim().is_empty()
    }
}

/// System message for turning combined fragments into a polished prompt.
pub const STRUCTURED_PROMPT_SYSTEM: &str =
    "You are a helpful assistant that generates well-structured prompts based on the given components.";

pub fn structured_prompt_user(combined: &str) -> String {
    format!(
        "Please generate an improved and well-structured prompt based on these components:\n\n{combined}"
    )
}

/// System message for generating a summarization prompt from document content.
pub const PROMPT_ARCHITECT_SYSTEM: &str = "You are an expert at creating effective summarization prompts. \
Based on the document content provided, generate a comprehensive prompt that will help an LLM \
create a high-quality summary. The prompt should include:\n\
1. Clear instructions for summarization\n\
2. Key points to focus on\n\
3. Desired output format\n\
4. Length requirements\n\
5. Any specific aspects to emphasize or avoid";

pub fn prompt_architect_user(content: &str, token_count: usize) -> String {
    format!(
        "Please create a detailed summarization prompt for the following document content:\n\n\
Document Content ({token_count} tokens):\n{content}\n\n\
Generate a comprehensive prompt that will help an LLM create an effective summary of this document."
    )
}

/// System message for the summarization call itself.
pub const SUMMARIZER_SYSTEM: &str = "You are an expert document summarizer. \
Follow the provided prompt carefully to create a comprehensive summary.";

pub fn summarizer_user(summarization_prompt: &str, content: &str, token_count: usize) -> String {
    format!(
        "{summarization_prompt}\n\nDocument to summarize ({token_count} tokens):\n{content}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_skips_blank_fragments() {
        let parts = PromptParts {
            role: "Senior analyst".to_string(),
            task: "   ".to_string(),
            context: "Quarterly report".to_string(),
            ..Default::default()
        };
        assert_eq!(
            parts.combine(),
            "Role/Objective: Senior analyst\n\nContext: Quarterly report"
        );
    }

    #[test]
    fn combine_all_blank_is_empty() {
        let parts = PromptParts::default();
        assert_eq!(parts.combine(), "");
        assert!(parts.is_blank());
    }

    #[test]
    fn combine_preserves_label_order() {
        let parts = PromptParts {
            role: "r".to_string(),
            task: "t".to_string(),
            instruction: "i".to_string(),
            context: "c".to_string(),
            examples: "e".to_string(),
            reasoning_steps: "s".to_string(),
            delimiters: "d".to_string(),
        };
        let combined = parts.combine();
        let order = [
            "Role/Objective:",
            "Task:",
            "Instruction:",
            "Context:",
            "Examples:",
            "Reasoning Steps:",
            "Delimiters/Structured Output:",
        ];
        let mut last = 0;
        for label in order {
            let at = combined.find(label).expect("label present");
            assert!(at >= last);
            last = at;
        }
    }
}
