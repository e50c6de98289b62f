//! Answer outcomes and response types for the HTTP boundary

use serde::{Deserialize, Serialize};

/// Outcome of answering a question.
///
/// Retrieval misses and non-answers from the generation model are normal
/// outcomes, not errors; each variant renders to its own user-facing
/// message. The query path never surfaces a raw error to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The generation model produced an answer, returned verbatim
    Answered(String),
    /// The aggregated answer was blank
    NoAnswer {
        /// The question that went unanswered
        question: String,
    },
    /// The question was empty or whitespace-only; nothing was attempted
    EmptyQuestion,
    /// Something failed while answering; carries the error description
    Failed(String),
}

impl AnswerOutcome {
    /// Render the outcome as the string returned to the caller
    pub fn into_message(self) -> String {
        match self {
            AnswerOutcome::Answered(answer) => answer,
            AnswerOutcome::NoAnswer { question } => format!(
                "No relevant information was found for the question: \"{}\".",
                question
            ),
            AnswerOutcome::EmptyQuestion => "Please provide a valid question.".to_string(),
            AnswerOutcome::Failed(reason) => {
                format!("An error occurred while processing the question: {}", reason)
            }
        }
    }
}

/// Response for the ask endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The rendered answer; always present
    pub answer: String,
}

/// Response for the ingest endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Acknowledgment message
    pub message: String,
    /// Number of chunks embedded and stored
    pub chunks_stored: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_returns_verbatim() {
        let outcome = AnswerOutcome::Answered("The answer.".to_string());
        assert_eq!(outcome.into_message(), "The answer.");
    }

    #[test]
    fn no_answer_names_the_question() {
        let outcome = AnswerOutcome::NoAnswer {
            question: "What are models?".to_string(),
        };
        assert_eq!(
            outcome.into_message(),
            "No relevant information was found for the question: \"What are models?\"."
        );
    }

    #[test]
    fn empty_question_is_fixed_message() {
        assert_eq!(
            AnswerOutcome::EmptyQuestion.into_message(),
            "Please provide a valid question."
        );
    }

    #[test]
    fn failure_carries_reason() {
        let outcome = AnswerOutcome::Failed("Upstream error: boom".to_string());
        assert_eq!(
            outcome.into_message(),
            "An error occurred while processing the question: Upstream error: boom"
        );
    }
}
