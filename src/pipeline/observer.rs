//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::pipeline::artifacts::ScoredSentence;
use crate::summarizer::term_weights::TermWeightTable;

pub const STAGE_WEIGHTS: &str = "term_weights";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_SELECT: &str = "select";

// ============================================================================
// Stage timing
// ============================================================================

/// Wall-clock timer started at a stage boundary.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    terms: Option<usize>,
    sentences: Option<usize>,
    selected: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Default::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Distinct content words in the term table
    pub fn terms(&self) -> Option<usize> {
        self.terms
    }

    /// Sentences scored
    pub fn sentences(&self) -> Option<usize> {
        self.sentences
    }

    /// Sentences kept by the selector
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

/// Builder for reports that carry stage metrics.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn terms(mut self, n: usize) -> Self {
        self.report.terms = Some(n);
        self
    }

    pub fn sentences(mut self, n: usize) -> Self {
        self.report.sentences = Some(n);
        self
    }

    pub fn selected(mut self, n: usize) -> Self {
        self.report.selected = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ============================================================================
// Observer trait
// ============================================================================

/// Receives callbacks as the pipeline runs. Every method has an empty
/// default, so implementors override only what they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_weights(&mut self, _weights: &TermWeightTable) {}

    fn on_scores(&mut self, _scores: &[f64]) {}

    fn on_selection(&mut self, _selected: &[ScoredSentence]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records a report per finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
