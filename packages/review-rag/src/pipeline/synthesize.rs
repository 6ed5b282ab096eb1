//! Answer synthesis - prompt the language model with retrieved reviews.

use tracing::{debug, info};

use crate::error::{RagError, Result};
use crate::pipeline::prompts::{answer_prompt_hash, format_answer_prompt};
use crate::traits::ai::Completer;
use crate::types::review::RetrievalResult;

/// Builds the grounded prompt and returns the model's completion as-is.
///
/// There is no retry or fallback model; a failed completion fails the
/// question.
pub struct AnswerSynthesizer<C: Completer> {
    completer: C,
}

impl<C: Completer> AnswerSynthesizer<C> {
    /// Create a synthesizer over a completion capability.
    pub fn new(completer: C) -> Self {
        Self { completer }
    }

    /// Answer `question` from the retrieved review texts.
    pub async fn synthesize(&self, question: &str, retrieved: &RetrievalResult) -> Result<String> {
        let prompt = format_answer_prompt(question, retrieved.texts());

        debug!(
            reviews = retrieved.len(),
            prompt_len = prompt.len(),
            prompt_hash = %answer_prompt_hash(),
            "Prompting language model"
        );

        let answer = self
            .completer
            .complete(&prompt)
            .await
            .map_err(RagError::Synthesis)?;

        info!(answer_len = answer.len(), "Received completion");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;
    use crate::pipeline::prompts::{GUIDELINE_REPETITION, GUIDELINE_SPECIFIC_ITEMS};
    use crate::testing::MockCompleter;

    #[tokio::test]
    async fn test_returns_completion_unmodified() {
        let completer = MockCompleter::new().with_response("  Try the al pastor.\n");
        let synthesizer = AnswerSynthesizer::new(completer);

        let retrieved = RetrievalResult::new(vec!["Al pastor was great".to_string()]);
        let answer = synthesizer
            .synthesize("What should I get?", &retrieved)
            .await
            .unwrap();

        assert_eq!(answer, "  Try the al pastor.\n");
    }

    #[tokio::test]
    async fn test_prompt_carries_question_reviews_and_guidelines() {
        let completer = MockCompleter::new();
        let synthesizer = AnswerSynthesizer::new(completer.clone());

        let retrieved = RetrievalResult::new(vec![
            "The carnitas are the best".to_string(),
            "Horchata was too sweet".to_string(),
        ]);
        synthesizer
            .synthesize("What's good here?", &retrieved)
            .await
            .unwrap();

        let prompts = completer.prompts();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("What's good here?"));
        assert!(prompt.contains("The carnitas are the best\n\nHorchata was too sweet"));
        assert!(prompt.contains(GUIDELINE_REPETITION));
        assert!(prompt.contains(GUIDELINE_SPECIFIC_ITEMS));
    }

    #[tokio::test]
    async fn test_completer_failure_is_synthesis_error() {
        let synthesizer = AnswerSynthesizer::new(MockCompleter::new().failing());
        let retrieved = RetrievalResult::new(vec!["ok".to_string()]);

        let result = synthesizer.synthesize("q", &retrieved).await;
        assert!(matches!(result, Err(RagError::Synthesis(AiError::Api(_)))));
    }
}
