//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Implementations are
//! statically dispatched; the zero-sized defaults wire the stages to the
//! term-weight summarizer in [`crate::summarizer`].

use crate::errors::Result;
use crate::pipeline::artifacts::ScoredSentence;
use crate::summarizer::scorer::SentenceScorer;
use crate::summarizer::selector::SentenceSelector;
use crate::summarizer::term_weights::TermWeightTable;
use crate::types::{Document, Sentence, SummarizerConfig};

// ============================================================================
// TermWeighter: stage 1
// ============================================================================

/// Builds the per-document term weight table.
///
/// # Contract
///
/// - **Input**: the whole document.
/// - **Output**: weights for content words, all `>= 0`.
/// - Fails with `EmptyContent` when nothing can be weighted.
pub trait TermWeighter {
    fn weigh(&self, document: &Document, cfg: &SummarizerConfig) -> Result<TermWeightTable>;
}

/// Term frequency dampened by in-document recurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTermWeighter;

impl TermWeighter for LocalTermWeighter {
    fn weigh(&self, document: &Document, _cfg: &SummarizerConfig) -> Result<TermWeightTable> {
        TermWeightTable::build(document)
    }
}

// ============================================================================
// SentenceScoring: stage 2
// ============================================================================

/// Produces one score per sentence, in document order.
pub trait SentenceScoring {
    fn score(&self, document: &Document, weights: &TermWeightTable, cfg: &SummarizerConfig)
        -> Vec<f64>;
}

/// Sum of token weights per sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermSumScorer;

impl SentenceScoring for TermSumScorer {
    fn score(
        &self,
        document: &Document,
        weights: &TermWeightTable,
        cfg: &SummarizerConfig,
    ) -> Vec<f64> {
        SentenceScorer::new()
            .with_parallel_threshold(cfg.parallel_threshold)
            .score_all(document, weights)
    }
}

// ============================================================================
// SentenceRanking: stage 3
// ============================================================================

/// Chooses which sentences make the summary.
///
/// # Contract
///
/// - Output is ordered by sentence index, strictly increasing.
/// - At most `max(k, 0)` sentences are returned.
pub trait SentenceRanking {
    fn select(
        &self,
        sentences: &[Sentence],
        scores: &[f64],
        k: i64,
        cfg: &SummarizerConfig,
    ) -> Vec<ScoredSentence>;
}

impl SentenceRanking for SentenceSelector {
    fn select(
        &self,
        sentences: &[Sentence],
        scores: &[f64],
        k: i64,
        _cfg: &SummarizerConfig,
    ) -> Vec<ScoredSentence> {
        SentenceSelector::select(self, sentences, scores, k)
    }
}
