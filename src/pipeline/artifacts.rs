//! Pipeline artifacts.
//!
//! Intermediate results flowing between stages ([`TermWeightTable`] lives in
//! the summarizer module) and the public [`Summary`] returned to callers.
//!
//! [`TermWeightTable`]: crate::summarizer::term_weights::TermWeightTable

use serde::{Deserialize, Serialize};

use crate::types::{OutputLayout, Sentence};

/// A sentence paired with the score it received for this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f64,
}

impl ScoredSentence {
    pub fn new(sentence: Sentence, score: f64) -> Self {
        Self { sentence, score }
    }

    /// Position of the sentence in its document
    pub fn index(&self) -> usize {
        self.sentence.index
    }

    pub fn text(&self) -> &str {
        &self.sentence.text
    }
}

/// Public-facing summary: the selected sentences in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Selected sentences, ordered by position in the source document
    pub sentences: Vec<ScoredSentence>,
    /// Number of sentences in the source document
    pub total_sentences: usize,
}

impl Summary {
    pub fn new(sentences: Vec<ScoredSentence>, total_sentences: usize) -> Self {
        Self {
            sentences,
            total_sentences,
        }
    }

    /// Sentence texts joined by a single space
    pub fn text(&self) -> String {
        self.join(" ")
    }

    /// Sentence texts, one per line
    pub fn lines(&self) -> String {
        self.join("\n")
    }

    /// Render according to an [`OutputLayout`]
    pub fn render(&self, layout: OutputLayout) -> String {
        match layout {
            OutputLayout::Inline => self.text(),
            OutputLayout::OnePerLine => self.lines(),
        }
    }

    fn join(&self, separator: &str) -> String {
        self.sentences
            .iter()
            .map(ScoredSentence::text)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Indices of the selected sentences
    pub fn indices(&self) -> Vec<usize> {
        self.sentences.iter().map(ScoredSentence::index).collect()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
