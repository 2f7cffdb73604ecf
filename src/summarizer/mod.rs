//! Summarization components
//!
//! Extractive summarization by term weight: every content word gets a weight
//! from its local frequency, sentences score the sum of their token weights,
//! and the top `k` sentences come back in document order.
//!
//! [`summarize`] and [`summarize_request`] run the core over a prepared
//! [`Document`]. [`Summarizer`] adds configuration, language handling and
//! tokenization on top for callers starting from raw text.

pub mod scorer;
pub mod selector;
pub mod term_weights;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::nlp::language::{DetectedLanguage, LanguageDetector, LanguageProfiles};
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::artifacts::Summary;
use crate::pipeline::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::runner::StandardPipeline;
use crate::types::{Document, OutputLayout, SummarizerConfig, SummaryRequest};

/// Summarize a document with the default configuration
pub fn summarize(document: &Document, k: i64) -> Result<Summary> {
    StandardPipeline::standard().run(document, k, &SummarizerConfig::default(), &mut NoopObserver)
}

/// Summarize a [`SummaryRequest`]
pub fn summarize_request(request: SummaryRequest) -> Result<Summary> {
    summarize(&request.document, request.k)
}

// ============================================================================
// Text requests
// ============================================================================

/// A summarization request over raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
    pub num_sentences: i64,
    /// Language code; `None` uses the configured language or detection
    #[serde(default)]
    pub language: Option<String>,
    /// Overrides the configured layout
    #[serde(default)]
    pub layout: Option<OutputLayout>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>, num_sentences: i64) -> Self {
        Self {
            text: text.into(),
            num_sentences,
            language: None,
            layout: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}

/// Result of a [`TextRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    /// Rendered summary text
    pub summary: String,
    /// Language code whose profile was used for tokenization
    pub language: String,
    /// Detection outcome, when the language was detected
    pub detected: Option<DetectedLanguage>,
    /// Indices of the selected sentences, ascending
    pub sentences: Vec<usize>,
    pub total_sentences: usize,
}

// ============================================================================
// Summarizer
// ============================================================================

/// Configured summarizer for raw text and prepared documents
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummarizerConfig,
    profiles: LanguageProfiles,
    detector: LanguageDetector,
    pipeline: StandardPipeline,
}

impl Summarizer {
    /// Create a summarizer; the config is validated first
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            profiles: LanguageProfiles::standard(),
            detector: LanguageDetector::new(),
            pipeline: StandardPipeline::standard(),
        })
    }

    pub fn with_profiles(mut self, profiles: LanguageProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn profiles(&self) -> &LanguageProfiles {
        &self.profiles
    }

    /// Summarize a prepared document
    pub fn summarize_document(&self, document: &Document, k: i64) -> Result<Summary> {
        self.pipeline.run(document, k, &self.config, &mut NoopObserver)
    }

    /// Summarize a prepared document, reporting stages to `observer`
    pub fn summarize_observed(
        &self,
        document: &Document,
        k: i64,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary> {
        self.pipeline.run(document, k, &self.config, observer)
    }

    /// Summarize each document independently on the rayon pool.
    ///
    /// Results come back in input order, one per document.
    pub fn summarize_batch(&self, documents: &[Document], k: i64) -> Vec<Result<Summary>> {
        documents
            .par_iter()
            .map(|document| self.summarize_document(document, k))
            .collect()
    }

    /// Pick the language for `text`.
    ///
    /// An explicit code wins; otherwise the detector runs, and a detection
    /// failure falls back to the configured fallback language.
    pub fn resolve_language(
        &self,
        text: &str,
        requested: Option<&str>,
    ) -> (String, Option<DetectedLanguage>) {
        if let Some(code) = requested.or(self.config.language.as_deref()) {
            return (code.to_lowercase(), None);
        }

        match self.detector.detect(text) {
            Ok(detected) => (detected.code.clone(), Some(detected)),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %err,
                    fallback = %self.config.fallback_language,
                    "language detection failed, using fallback"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = err;
                (self.config.fallback_language.to_lowercase(), None)
            }
        }
    }

    /// Tokenizer for a language, with the configured extra stopwords applied
    pub fn tokenizer_for(&self, code: &str) -> Result<(String, Tokenizer)> {
        let (resolved, profile) = self.profiles.resolve(code)?;
        let mut profile = profile.clone();
        profile.extra_stopwords.extend(self.config.stopwords.iter().cloned());
        profile.case_sensitive |= self.config.case_sensitive_stopwords;
        Ok((resolved.to_string(), Tokenizer::new(&profile)))
    }

    /// Tokenize and summarize raw text
    pub fn summarize_text(&self, request: &TextRequest) -> Result<TextResponse> {
        let (code, detected) = self.resolve_language(&request.text, request.language.as_deref());
        let (language, tokenizer) = self.tokenizer_for(&code)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            requested = %code,
            language = %language,
            detected = detected.is_some(),
            "resolved tokenizer profile"
        );

        let document = tokenizer.tokenize(&request.text);
        let summary = self.summarize_document(&document, request.num_sentences)?;
        let layout = request.layout.unwrap_or(self.config.layout);

        Ok(TextResponse {
            summary: summary.render(layout),
            language,
            detected,
            sentences: summary.indices(),
            total_sentences: summary.total_sentences,
        })
    }
}
