//! # rapid_summarizer
//!
//! Extractive text summarization by local term weighting.
//!
//! Every content word is weighted by its frequency among the document's
//! content words, dampened by how often its text recurs anywhere in the
//! token stream. A sentence scores the sum of its token weights, and the
//! best `k` sentences are returned in their original order.
//!
//! ## Features
//!
//! - **Deterministic**: ties break by sentence position, repeated runs are byte-identical
//! - **Unicode-aware**: UAX #29 sentence and word segmentation, CJK stopword lists
//! - **Composable**: statically dispatched pipeline stages with observer hooks
//!
//! ```
//! use rapid_summarizer::{Summarizer, SummarizerConfig, TextRequest};
//!
//! let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
//! let response = summarizer
//!     .summarize_text(&TextRequest::new("Cats purr. Dogs bark loudly at the mailman every night. Birds sing.", 1).with_language("en"))
//!     .unwrap();
//! assert_eq!(response.summary, "Dogs bark loudly at the mailman every night.");
//! ```

pub mod errors;
pub mod nlp;
pub mod pipeline;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, SummarizerError};
pub use types::{
    Document, DocumentBuilder, OutputLayout, Sentence, SummarizerConfig, SummaryRequest, Token,
};

// Re-export main functionality
pub use nlp::{
    language::{DetectedLanguage, LanguageDetector, LanguageProfiles, TokenizerProfile},
    stopwords::StopwordFilter,
    tokenizer::Tokenizer,
};
pub use pipeline::artifacts::{ScoredSentence, Summary};
pub use pipeline::runner::{Pipeline, PipelineBuilder, StandardPipeline};
pub use summarizer::{
    selector::SentenceSelector, summarize, summarize_request, term_weights::TermWeightTable,
    Summarizer, TextRequest, TextResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
