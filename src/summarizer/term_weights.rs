//! Term statistics for a single document
//!
//! Weights every distinct content word by its term frequency, dampened by
//! how often the same surface text recurs anywhere in the document:
//!
//! ```text
//! tf(w)     = count(w in content words) / |content words|
//! occ(w)    = 1 + count(w in all tokens)
//! weight(w) = tf(w) / occ(w)
//! ```
//!
//! `occ` is a document-local factor, not a corpus IDF; there is only one
//! document to draw statistics from.

use crate::errors::{Result, SummarizerError};
use crate::types::Document;
use rustc_hash::FxHashMap;

/// Per-document term weights keyed by surface text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeightTable {
    weights: FxHashMap<String, f64>,
}

impl TermWeightTable {
    /// Compute the table for a document.
    ///
    /// Fails with [`SummarizerError::EmptyContent`] when the document has no
    /// content words.
    pub fn build(document: &Document) -> Result<Self> {
        let tokens = document.tokens();

        let mut content_counts: FxHashMap<&str, usize> = FxHashMap::default();
        let mut num_content = 0usize;
        for token in tokens.iter().filter(|t| t.is_content_word()) {
            *content_counts.entry(token.text.as_str()).or_insert(0) += 1;
            num_content += 1;
        }

        if num_content == 0 {
            return Err(SummarizerError::EmptyContent);
        }

        // Occurrences over the full stream, restricted to content vocabulary.
        let mut all_counts: FxHashMap<&str, usize> =
            FxHashMap::with_capacity_and_hasher(content_counts.len(), Default::default());
        for token in tokens {
            if content_counts.contains_key(token.text.as_str()) {
                *all_counts.entry(token.text.as_str()).or_insert(0) += 1;
            }
        }

        let total = num_content as f64;
        let weights = content_counts
            .into_iter()
            .map(|(word, count)| {
                let tf = count as f64 / total;
                let occ = 1 + all_counts.get(word).copied().unwrap_or(0);
                (word.to_string(), tf / occ as f64)
            })
            .collect();

        Ok(Self { weights })
    }

    /// Weight of a term; 0 for anything that is not a content word
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    /// Number of distinct content words
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Terms sorted by weight descending, ties by term ascending
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut terms: Vec<_> = self.iter().collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }
}
