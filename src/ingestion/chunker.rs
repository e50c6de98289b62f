//! Sentence-respecting text chunking with a word-count budget

/// Text chunker with a configurable word budget per chunk.
///
/// Word counts are naive whitespace tokenization, a proxy for tokens.
/// Sentences are never split: a lone sentence longer than the budget is
/// emitted as its own chunk.
pub struct WordChunker {
    /// Chunk budget in whitespace-delimited words
    max_words: usize,
}

impl WordChunker {
    /// Create a new chunker
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Split `text` into sentence-respecting chunks.
    ///
    /// Sentences accumulate into a running chunk while the running word count
    /// stays at or below the budget. A sentence that would push the count over
    /// the budget first flushes the accumulated chunk, then seeds the next one.
    /// Empty or whitespace-only input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut word_count = 0usize;

        for sentence in split_sentences(text) {
            let words = sentence.split_whitespace().count();
            if word_count + words > self.max_words && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                word_count = 0;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
            word_count += words;
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

/// Split text into sentences on `.`, `!`, `?` boundaries.
///
/// Each sentence ends with its punctuation; whitespace before the next
/// sentence is discarded. Trailing text without closing punctuation forms a
/// final sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
            while let Some(&(j, w)) = chars.peek() {
                if !w.is_whitespace() {
                    break;
                }
                chars.next();
                start = j + w.len_utf8();
            }
        }
    }

    let tail = text[start..].trim_end();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = WordChunker::new(10);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t ").is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunker = WordChunker::new(100);
        let chunks = chunker.chunk("First sentence. Second sentence.");
        assert_eq!(chunks, vec!["First sentence. Second sentence."]);
    }

    #[test]
    fn sentence_boundaries_respect_all_terminators() {
        let chunker = WordChunker::new(100);
        let chunks = chunker.chunk("One! Two? Three.");
        assert_eq!(chunks, vec!["One! Two? Three."]);
    }

    #[test]
    fn overflow_flushes_before_the_triggering_sentence() {
        // Budget 4: the second sentence (3 words) would bring the count to 6,
        // so the first sentence flushes alone and the second seeds chunk two.
        let chunker = WordChunker::new(4);
        let chunks = chunker.chunk("One two three. Four five six.");
        assert_eq!(chunks, vec!["One two three.", "Four five six."]);
    }

    #[test]
    fn count_at_budget_does_not_flush() {
        // Two sentences of two words each fit a budget of exactly four.
        let chunker = WordChunker::new(4);
        let chunks = chunker.chunk("One two. Three four.");
        assert_eq!(chunks, vec!["One two. Three four."]);
    }

    #[test]
    fn oversized_sentence_is_emitted_whole() {
        let chunker = WordChunker::new(3);
        let chunks = chunker.chunk("One two three four five six. Short one.");
        assert_eq!(chunks, vec!["One two three four five six.", "Short one."]);
    }

    #[test]
    fn oversized_leading_sentence_produces_no_empty_chunk() {
        let chunker = WordChunker::new(2);
        let chunks = chunker.chunk("Alpha beta gamma delta.");
        assert_eq!(chunks, vec!["Alpha beta gamma delta."]);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn text_without_closing_punctuation_is_kept() {
        let chunker = WordChunker::new(100);
        let chunks = chunker.chunk("A sentence. And a trailing fragment");
        assert_eq!(chunks, vec!["A sentence. And a trailing fragment"]);
    }

    #[test]
    fn concatenation_reconstructs_the_word_sequence() {
        let text = "The quick brown fox jumps over the lazy dog. \
                    Pack my box with five dozen liquor jugs! \
                    How vexingly quick daft zebras jump? \
                    Sphinx of black quartz, judge my vow.";
        let chunker = WordChunker::new(9);
        let chunks = chunker.chunk(text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));

        let rejoined = chunks.join(" ");
        assert_eq!(words(&rejoined), words(text));
    }

    #[test]
    fn sentence_splitter_discards_inter_sentence_whitespace() {
        let sentences = split_sentences("First.   Second!\n\nThird?");
        assert_eq!(sentences, vec!["First.", "Second!", "Third?"]);
    }
}
