//! Prompt templates for RAG generation

/// Marker inserted in place of the context section when retrieval misses
pub const NO_CONTEXT_MARKER: &str = "No relevant context was found.";

const INSTRUCTIONS: &str = "You are an assistant specialized in answering questions from technical \
documents. Your task is to extract the exact definition of the asked term from the provided \
context. Answer concisely, using the exact definition from the context, without adding outside \
information. If the term is not in the context, answer: 'The term was not found in the provided \
context.'";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the grounded prompt: fixed instructions, the retrieved context
    /// (each chunk followed by a blank line, or the no-context marker), and
    /// the question. Built fresh per query, never persisted.
    pub fn build_rag_prompt(question: &str, context: &[String]) -> String {
        let mut prompt = String::from(INSTRUCTIONS);
        prompt.push_str("\n\nContext:\n");

        if context.is_empty() {
            prompt.push_str(NO_CONTEXT_MARKER);
            prompt.push('\n');
        } else {
            for chunk in context {
                prompt.push_str(chunk);
                prompt.push_str("\n\n");
            }
        }

        prompt.push_str(&format!("Question: {}\n", question));
        prompt.push_str("Answer: ");
        prompt
    }
}
