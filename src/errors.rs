//! Error types for rapid_summarizer

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SummarizerError>;

/// Errors raised by summarization and its collaborators
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// The document has no content words once stop words and punctuation
    /// are removed, so no term weight is defined.
    #[error("document has no content words after stop word and punctuation filtering")]
    EmptyContent,

    /// The requested sentence count is not a usable integer.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Sentences do not partition the token stream.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("input has {tokens} tokens, exceeding the limit of {limit}")]
    InputTooLarge { tokens: usize, limit: usize },

    #[error("language detection failed: {0}")]
    LanguageDetection(String),

    #[error("no tokenizer profile for language \"{0}\"")]
    UnsupportedLanguage(String),

    #[error("summary spec error: {0}")]
    Spec(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SummarizerError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn language_detection(msg: impl Into<String>) -> Self {
        Self::LanguageDetection(msg.into())
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Spec(err.to_string())
    }
}
