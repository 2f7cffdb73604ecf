//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of pipeline stages.
//! Calling [`Pipeline::run`] executes them in order, threading artifacts
//! between stages and notifying a [`PipelineObserver`] at each boundary.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler monomorphizes
//! each combination into a unique concrete type. The default stages are
//! zero-sized and add no runtime cost.

use crate::errors::{Result, SummarizerError};
use crate::pipeline::artifacts::Summary;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReportBuilder, STAGE_SCORE, STAGE_SELECT, STAGE_WEIGHTS,
};
use crate::pipeline::traits::{
    LocalTermWeighter, SentenceRanking, SentenceScoring, TermSumScorer, TermWeighter,
};
use crate::summarizer::selector::SentenceSelector;
use crate::types::{Document, SummarizerConfig};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `W`   | [`TermWeighter`] | [`LocalTermWeighter`] |
/// | `S`   | [`SentenceScoring`] | [`TermSumScorer`] |
/// | `R`   | [`SentenceRanking`] | [`SentenceSelector`] |
#[derive(Debug, Clone)]
pub struct Pipeline<W, S, R> {
    pub weighter: W,
    pub scorer: S,
    pub ranking: R,
}

/// Type alias for the default term-weight summarization pipeline.
pub type StandardPipeline = Pipeline<LocalTermWeighter, TermSumScorer, SentenceSelector>;

impl StandardPipeline {
    /// Build the standard pipeline: local term weights, summed per
    /// sentence, top-k selection in document order.
    pub fn standard() -> Self {
        Pipeline {
            weighter: LocalTermWeighter,
            scorer: TermSumScorer,
            ranking: SentenceSelector,
        }
    }
}

impl Default for StandardPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<W, S, R> Pipeline<W, S, R>
where
    W: TermWeighter,
    S: SentenceScoring,
    R: SentenceRanking,
{
    /// Execute the pipeline, producing a [`Summary`].
    ///
    /// Stages run in order:
    /// 1. Build term weights
    /// 2. Score sentences
    /// 3. Select and reorder
    ///
    /// Errors from any stage are returned as-is; there is no partial result.
    pub fn run(
        &self,
        document: &Document,
        k: i64,
        cfg: &SummarizerConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary> {
        if let Some(limit) = cfg.max_tokens {
            if document.num_tokens() > limit {
                return Err(SummarizerError::InputTooLarge {
                    tokens: document.num_tokens(),
                    limit,
                });
            }
        }

        // Stage 1: Term weights
        trace_stage!(STAGE_WEIGHTS);
        observer.on_stage_start(STAGE_WEIGHTS);
        let clock = StageClock::start();
        let weights = self.weighter.weigh(document, cfg)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .terms(weights.len())
            .build();
        observer.on_stage_end(STAGE_WEIGHTS, &report);
        observer.on_weights(&weights);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            terms = weights.len(),
            tokens = document.num_tokens(),
            "built term weight table"
        );

        // Stage 2: Score sentences
        trace_stage!(STAGE_SCORE);
        observer.on_stage_start(STAGE_SCORE);
        let clock = StageClock::start();
        let scores = self.scorer.score(document, &weights, cfg);
        let report = StageReportBuilder::new(clock.elapsed())
            .sentences(scores.len())
            .build();
        observer.on_stage_end(STAGE_SCORE, &report);
        observer.on_scores(&scores);

        // Stage 3: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let selected = self.ranking.select(document.sentences(), &scores, k, cfg);
        let report = StageReportBuilder::new(clock.elapsed())
            .sentences(scores.len())
            .selected(selected.len())
            .build();
        observer.on_stage_end(STAGE_SELECT, &report);
        observer.on_selection(&selected);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            k,
            selected = selected.len(),
            sentences = document.num_sentences(),
            "selected summary sentences"
        );

        Ok(Summary::new(selected, document.num_sentences()))
    }
}

// ============================================================================
// PipelineBuilder: fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the standard stages and allows overriding individual ones.
pub struct PipelineBuilder<W = LocalTermWeighter, S = TermSumScorer, R = SentenceSelector> {
    weighter: W,
    scorer: S,
    ranking: R,
}

impl PipelineBuilder {
    /// Start building from the standard stages.
    pub fn new() -> Self {
        PipelineBuilder {
            weighter: LocalTermWeighter,
            scorer: TermSumScorer,
            ranking: SentenceSelector,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, S, R> PipelineBuilder<W, S, R> {
    /// Override the term weight stage.
    pub fn weighter<T: TermWeighter>(self, weighter: T) -> PipelineBuilder<T, S, R> {
        PipelineBuilder {
            weighter,
            scorer: self.scorer,
            ranking: self.ranking,
        }
    }

    /// Override the scoring stage.
    pub fn scorer<T: SentenceScoring>(self, scorer: T) -> PipelineBuilder<W, T, R> {
        PipelineBuilder {
            weighter: self.weighter,
            scorer,
            ranking: self.ranking,
        }
    }

    /// Override the selection stage.
    pub fn ranking<T: SentenceRanking>(self, ranking: T) -> PipelineBuilder<W, S, T> {
        PipelineBuilder {
            weighter: self.weighter,
            scorer: self.scorer,
            ranking,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<W, S, R> {
        Pipeline {
            weighter: self.weighter,
            scorer: self.scorer,
            ranking: self.ranking,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::artifacts::ScoredSentence;
    use crate::pipeline::observer::{NoopObserver, StageTimingObserver};
    use crate::summarizer::term_weights::TermWeightTable;
    use crate::types::Token;

    fn word(text: &str) -> Token {
        Token::new(text, 0, text.len(), 0, 0)
    }

    fn stop(text: &str) -> Token {
        word(text).with_stopword(true)
    }

    fn sample_document() -> Document {
        Document::builder()
            .sentence("The cat sat.", vec![stop("The"), word("cat"), word("sat"), word(".").with_punctuation(true)])
            .sentence("Quantum lasers cool rubidium atoms.", vec![word("Quantum"), word("lasers"), word("cool"), word("rubidium"), word("atoms"), word(".").with_punctuation(true)])
            .sentence("It was late.", vec![stop("It"), stop("was"), word("late"), word(".").with_punctuation(true)])
            .build()
    }

    #[test]
    fn test_standard_pipeline_constructs() {
        let _pipeline = StandardPipeline::standard();
    }

    #[test]
    fn test_pipeline_builder_default() {
        let _pipeline = PipelineBuilder::new().build();
    }

    #[test]
    fn test_pipeline_run_with_noop_observer() {
        let pipeline = StandardPipeline::standard();
        let cfg = SummarizerConfig::default();

        let summary = pipeline
            .run(&sample_document(), 1, &cfg, &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.indices(), vec![1]);
        assert_eq!(summary.total_sentences, 3);
    }

    #[test]
    fn test_pipeline_run_with_timing_observer() {
        let pipeline = StandardPipeline::standard();
        let cfg = SummarizerConfig::default();
        let mut obs = StageTimingObserver::new();

        let _summary = pipeline.run(&sample_document(), 2, &cfg, &mut obs).unwrap();

        let stage_names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(stage_names, vec![STAGE_WEIGHTS, STAGE_SCORE, STAGE_SELECT]);

        let weights = obs.report(STAGE_WEIGHTS).unwrap();
        assert_eq!(weights.terms(), Some(8));
        let select = obs.report(STAGE_SELECT).unwrap();
        assert_eq!(select.selected(), Some(2));
        assert_eq!(select.sentences(), Some(3));
    }

    #[test]
    fn test_pipeline_empty_content_propagates() {
        let doc = Document::builder()
            .sentence("the of", vec![stop("the"), stop("of")])
            .build();
        let mut obs = StageTimingObserver::new();

        let res = StandardPipeline::standard().run(&doc, 1, &SummarizerConfig::default(), &mut obs);
        assert!(matches!(res, Err(SummarizerError::EmptyContent)));
        // No stage completed.
        assert!(obs.reports().is_empty());
    }

    #[test]
    fn test_pipeline_rejects_oversized_input() {
        let cfg = SummarizerConfig::default().with_max_tokens(5);
        let res = StandardPipeline::standard().run(&sample_document(), 1, &cfg, &mut NoopObserver);
        assert!(matches!(
            res,
            Err(SummarizerError::InputTooLarge { tokens: 14, limit: 5 })
        ));
    }

    /// Custom observer that captures artifact snapshots.
    #[derive(Default)]
    struct ArtifactObserver {
        saw_weights: bool,
        scores: Vec<f64>,
        selected: usize,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_weights(&mut self, _weights: &TermWeightTable) {
            self.saw_weights = true;
        }
        fn on_scores(&mut self, scores: &[f64]) {
            self.scores = scores.to_vec();
        }
        fn on_selection(&mut self, selected: &[ScoredSentence]) {
            self.selected = selected.len();
        }
    }

    #[test]
    fn test_pipeline_calls_all_artifact_observers() {
        let mut obs = ArtifactObserver::default();
        let _summary = StandardPipeline::standard()
            .run(&sample_document(), 2, &SummarizerConfig::default(), &mut obs)
            .unwrap();

        assert!(obs.saw_weights, "on_weights not called");
        assert_eq!(obs.scores.len(), 3);
        assert_eq!(obs.selected, 2);
    }

    #[test]
    fn test_pipeline_builder_with_custom_ranking() {
        struct LastOnly;

        impl SentenceRanking for LastOnly {
            fn select(
                &self,
                sentences: &[crate::types::Sentence],
                scores: &[f64],
                _k: i64,
                _cfg: &SummarizerConfig,
            ) -> Vec<ScoredSentence> {
                match (sentences.last(), scores.last()) {
                    (Some(s), Some(&score)) => vec![ScoredSentence::new(s.clone(), score)],
                    _ => Vec::new(),
                }
            }
        }

        let pipeline = PipelineBuilder::new().ranking(LastOnly).build();
        let summary = pipeline
            .run(&sample_document(), 3, &SummarizerConfig::default(), &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.indices(), vec![2]);
    }
}
