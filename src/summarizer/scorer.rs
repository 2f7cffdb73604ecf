//! Sentence scoring
//!
//! A sentence scores the sum of the term weights of its tokens, looked up by
//! literal surface text. Repeated words count once per occurrence.

use super::term_weights::TermWeightTable;
use crate::types::{Document, Sentence};
use rayon::prelude::*;

/// Scores sentences from a [`TermWeightTable`]
#[derive(Debug, Clone)]
pub struct SentenceScorer {
    /// Sentence count at which scoring runs on the rayon pool
    parallel_threshold: usize,
}

impl Default for SentenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceScorer {
    pub fn new() -> Self {
        Self {
            parallel_threshold: crate::types::SummarizerConfig::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the sentence count at which scoring goes parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Score a single sentence of `document`.
    ///
    /// A sentence from another document whose token range falls outside
    /// this one scores 0.
    pub fn score(&self, document: &Document, sentence: &Sentence, table: &TermWeightTable) -> f64 {
        document
            .sentence_tokens(sentence)
            .iter()
            .map(|t| table.weight(&t.text))
            .sum()
    }

    /// Score every sentence of the document, in document order.
    ///
    /// Each sentence is summed sequentially, so the parallel path returns
    /// exactly the same values as the sequential one.
    pub fn score_all(&self, document: &Document, table: &TermWeightTable) -> Vec<f64> {
        let sentences = document.sentences();
        if sentences.len() >= self.parallel_threshold {
            sentences
                .par_iter()
                .map(|s| self.score(document, s, table))
                .collect()
        } else {
            sentences
                .iter()
                .map(|s| self.score(document, s, table))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    fn word(text: &str) -> Token {
        Token::new(text, 0, text.len(), 0, 0)
    }

    fn sample_document() -> Document {
        Document::builder()
            .sentence("Graphs rank words.", vec![word("Graphs"), word("rank"), word("words"), word(".").with_punctuation(true)])
            .sentence("Words and words.", vec![word("words"), word("and").with_stopword(true), word("words"), word(".").with_punctuation(true)])
            .sentence("and .", vec![word("and").with_stopword(true), word(".").with_punctuation(true)])
            .build()
    }

    #[test]
    fn test_foreign_sentence_scores_zero() {
        let doc = sample_document();
        let table = TermWeightTable::build(&doc).unwrap();
        let foreign = Sentence::new("elsewhere", 0, 40, 44);
        assert_eq!(SentenceScorer::new().score(&doc, &foreign, &table), 0.0);
    }

    #[test]
    fn test_score_sums_per_occurrence() {
        let doc = sample_document();
        let table = TermWeightTable::build(&doc).unwrap();
        let scorer = SentenceScorer::new();

        let s1 = scorer.score(&doc, &doc.sentences()[1], &table);
        assert!((s1 - 2.0 * table.weight("words")).abs() < 1e-12);

        let s0 = scorer.score(&doc, &doc.sentences()[0], &table);
        let expected = table.weight("Graphs") + table.weight("rank") + table.weight("words");
        assert!((s0 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sentence_without_content_scores_zero() {
        let doc = sample_document();
        let table = TermWeightTable::build(&doc).unwrap();
        let score = SentenceScorer::new().score(&doc, &doc.sentences()[2], &table);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = sample_document();
        let table = TermWeightTable::build(&doc).unwrap();

        let sequential = SentenceScorer::new().score_all(&doc, &table);
        let parallel = SentenceScorer::new()
            .with_parallel_threshold(1)
            .score_all(&doc, &table);

        assert_eq!(sequential, parallel);
        assert!(sequential.iter().all(|&s| s >= 0.0));
    }
}
