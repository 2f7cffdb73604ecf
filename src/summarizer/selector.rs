//! Top-k sentence selection for summarization
//!
//! Ranks sentences by score, keeps the best `k`, and restores document
//! order so the summary reads in the same sequence as the source.

use crate::pipeline::artifacts::ScoredSentence;
use crate::types::Sentence;
use std::cmp::Ordering;

/// Ranks scored sentences and picks the top `k`
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSelector;

impl SentenceSelector {
    pub fn new() -> Self {
        Self
    }

    /// Ranking order: score descending, then earlier sentence first.
    pub fn rank_cmp(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.index().cmp(&b.index()))
    }

    /// Rank all sentences, best first
    pub fn rank(&self, sentences: &[Sentence], scores: &[f64]) -> Vec<ScoredSentence> {
        debug_assert_eq!(sentences.len(), scores.len());

        let mut ranked: Vec<ScoredSentence> = sentences
            .iter()
            .zip(scores)
            .map(|(s, &score)| ScoredSentence::new(s.clone(), score))
            .collect();
        ranked.sort_by(Self::rank_cmp);
        ranked
    }

    /// Select up to `k` sentences and return them in document order.
    ///
    /// `k <= 0` selects nothing; `k` beyond the sentence count selects all.
    pub fn select(&self, sentences: &[Sentence], scores: &[f64], k: i64) -> Vec<ScoredSentence> {
        if k <= 0 || sentences.is_empty() {
            return Vec::new();
        }

        let take = usize::try_from(k).map_or(sentences.len(), |k| k.min(sentences.len()));

        let mut selected = self.rank(sentences, scores);
        selected.truncate(take);

        // Sort by document order
        selected.sort_by_key(ScoredSentence::index);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> Vec<Sentence> {
        (0..n)
            .map(|i| Sentence::new(format!("Sentence {i}."), i, i * 3, i * 3 + 3))
            .collect()
    }

    #[test]
    fn test_selects_top_k_in_document_order() {
        let sents = sentences(4);
        let scores = [0.1, 0.9, 0.5, 0.7];

        let selected = SentenceSelector::new().select(&sents, &scores, 2);
        let indices: Vec<_> = selected.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_document_order() {
        let sents = sentences(5);
        let scores = [0.5, 0.1, 0.9, 0.3, 0.8];

        let selected = SentenceSelector::new().select(&sents, &scores, 3);
        for i in 1..selected.len() {
            assert!(selected[i].index() > selected[i - 1].index());
        }
    }

    #[test]
    fn test_ties_prefer_earlier_sentence() {
        let sents = sentences(4);
        let scores = [0.2, 0.5, 0.5, 0.5];

        let selected = SentenceSelector::new().select(&sents, &scores, 2);
        let indices: Vec<_> = selected.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_rank_is_best_first() {
        let sents = sentences(3);
        let ranked = SentenceSelector::new().rank(&sents, &[0.3, 0.6, 0.3]);
        let indices: Vec<_> = ranked.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_oversized_k_returns_everything() {
        let sents = sentences(10);
        let scores: Vec<f64> = (0..10).map(|i| (i % 3) as f64).collect();

        let selected = SentenceSelector::new().select(&sents, &scores, 50);
        assert_eq!(selected.len(), 10);
        let indices: Vec<_> = selected.iter().map(|s| s.index()).collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_non_positive_k_is_empty() {
        let sents = sentences(3);
        let scores = [1.0, 2.0, 3.0];

        assert!(SentenceSelector::new().select(&sents, &scores, 0).is_empty());
        assert!(SentenceSelector::new().select(&sents, &scores, -4).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let selected = SentenceSelector::new().select(&[], &[], 3);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_scores_carried_through() {
        let sents = sentences(2);
        let selected = SentenceSelector::new().select(&sents, &[0.25, 0.75], 1);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index(), 1);
        assert!((selected[0].score - 0.75).abs() < 1e-12);
    }
}
