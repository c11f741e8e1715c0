//! Prompt templates for answer drafting.
//!
//! These templates use basic `format!()` interpolation for type safety.

/// System prompt for drafting answers in the author's voice.
pub const ANSWER_SYSTEM_PROMPT: &str = "You answer questions as the author of a social-media \
account. Reply in one or two short sentences, in the language of the question, without \
hashtags or emoji.";

/// Generate a prompt asking for a short answer to `question`.
///
/// When `voice_example` is given it is quoted as a sample of how the author
/// writes about the topic.
///
/// # Example
/// ```
/// use mimic::llm::prompts::answer_prompt;
///
/// let prompt = answer_prompt("Kahve mi çay mı?", Some("sabah kahvesi olmadan olmaz"));
/// assert!(prompt.contains("Kahve mi çay mı?"));
/// assert!(prompt.contains("sabah kahvesi"));
/// ```
pub fn answer_prompt(question: &str, voice_example: Option<&str>) -> String {
    let question = question.trim();
    match voice_example.map(str::trim).filter(|example| !example.is_empty()) {
        Some(example) => format!(
            r#"Here is something the author once wrote on a related topic:
"{example}"

Answer the following question the way the author would.

Question: {question}
Answer:"#
        ),
        None => format!(
            r#"Answer the following question the way the author would.

Question: {question}
Answer:"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_without_example() {
        let prompt = answer_prompt("  What do you do on weekends? ", None);
        assert!(prompt.contains("Question: What do you do on weekends?\n"));
        assert!(!prompt.contains("once wrote"));
    }

    #[test]
    fn prompt_with_example_quotes_it() {
        let prompt = answer_prompt("Weekends?", Some("hiking every saturday"));
        assert!(prompt.contains("\"hiking every saturday\""));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn blank_example_is_ignored() {
        assert_eq!(answer_prompt("q", Some("   ")), answer_prompt("q", None));
    }
}
