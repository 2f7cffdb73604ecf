//! Core types for rapid_summarizer
//!
//! This module defines the document model consumed by the summarization
//! core (tokens, sentences, documents), the request type, and configuration.

use crate::errors::{Result, SummarizerError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Token
// ============================================================================

/// A token from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// Byte offset (start) in original text
    pub start: usize,
    /// Byte offset (end) in original text
    pub end: usize,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token index within the document
    pub token_idx: usize,
    /// Whether this token is a stopword
    pub is_stopword: bool,
    /// Whether this token is punctuation
    pub is_punctuation: bool,
}

impl Token {
    /// Create a new content token
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            sentence_idx,
            token_idx,
            is_stopword: false,
            is_punctuation: false,
        }
    }

    pub fn with_stopword(mut self, is_stopword: bool) -> Self {
        self.is_stopword = is_stopword;
        self
    }

    pub fn with_punctuation(mut self, is_punctuation: bool) -> Self {
        self.is_punctuation = is_punctuation;
        self
    }

    /// Check if this token carries term weight (neither stopword nor punctuation)
    pub fn is_content_word(&self) -> bool {
        !self.is_stopword && !self.is_punctuation
    }
}

// ============================================================================
// Sentence
// ============================================================================

/// A sentence from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text
    pub text: String,
    /// Start byte offset in original text
    pub start: usize,
    /// End byte offset in original text
    pub end: usize,
    /// Sentence index within the document; summaries are ordered by it
    pub index: usize,
    /// Start token index (inclusive)
    pub start_token: usize,
    /// End token index (exclusive)
    pub end_token: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(
        text: impl Into<String>,
        index: usize,
        start_token: usize,
        end_token: usize,
    ) -> Self {
        Self {
            text: text.into(),
            start: 0,
            end: 0,
            index,
            start_token,
            end_token,
        }
    }

    /// Set the byte span of the sentence in the original text
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Number of tokens in this sentence; 0 for an inverted range
    pub fn token_len(&self) -> usize {
        self.end_token.saturating_sub(self.start_token)
    }
}

// ============================================================================
// Document
// ============================================================================

/// A tokenized document, segmented into sentences.
///
/// Sentences partition the token stream: they are contiguous, in order, and
/// every token belongs to exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
}

/// Unchecked wire form of a [`Document`]
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    sentences: Vec<Sentence>,
}

impl TryFrom<RawDocument> for Document {
    type Error = SummarizerError;

    fn try_from(raw: RawDocument) -> Result<Self> {
        Document::new(raw.tokens, raw.sentences)
    }
}

impl Document {
    /// Create a document, checking the sentence/token partition.
    pub fn new(tokens: Vec<Token>, sentences: Vec<Sentence>) -> Result<Self> {
        let mut expected_start = 0;
        for (position, sentence) in sentences.iter().enumerate() {
            if sentence.index != position {
                return Err(SummarizerError::invalid_document(format!(
                    "sentence at position {} has index {}",
                    position, sentence.index
                )));
            }
            if sentence.start_token != expected_start {
                return Err(SummarizerError::invalid_document(format!(
                    "sentence {} starts at token {}, expected {}",
                    position, sentence.start_token, expected_start
                )));
            }
            if sentence.end_token < sentence.start_token || sentence.end_token > tokens.len() {
                return Err(SummarizerError::invalid_document(format!(
                    "sentence {} has invalid token range {}..{}",
                    position, sentence.start_token, sentence.end_token
                )));
            }
            for token in &tokens[sentence.start_token..sentence.end_token] {
                if token.sentence_idx != position {
                    return Err(SummarizerError::invalid_document(format!(
                        "token {} claims sentence {} but lies in sentence {}",
                        token.token_idx, token.sentence_idx, position
                    )));
                }
            }
            expected_start = sentence.end_token;
        }

        if expected_start != tokens.len() {
            return Err(SummarizerError::invalid_document(format!(
                "{} trailing tokens are not covered by any sentence",
                tokens.len() - expected_start
            )));
        }

        if let Some((position, token)) = tokens
            .iter()
            .enumerate()
            .find(|(i, t)| t.token_idx != *i)
        {
            return Err(SummarizerError::invalid_document(format!(
                "token at position {} has token_idx {}",
                position, token.token_idx
            )));
        }

        Ok(Self { tokens, sentences })
    }

    /// Start building a document sentence by sentence
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// All tokens, in document order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// All sentences, in document order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Tokens belonging to one sentence.
    ///
    /// A sentence whose token range does not fit this document (one taken
    /// from another document, say) has no tokens here.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        self.tokens
            .get(sentence.start_token..sentence.end_token)
            .unwrap_or(&[])
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Builds a [`Document`] one sentence at a time, assigning token and
/// sentence indices so the partition always holds.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
}

impl DocumentBuilder {
    /// Append a sentence made of the given tokens.
    ///
    /// `sentence_idx` and `token_idx` on the tokens are overwritten. The
    /// sentence span is taken from the first and last token offsets.
    pub fn sentence(mut self, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        self.push_sentence(text, tokens);
        self
    }

    /// Non-consuming form of [`DocumentBuilder::sentence`]
    pub fn push_sentence(&mut self, text: impl Into<String>, tokens: Vec<Token>) {
        let index = self.sentences.len();
        let start_token = self.tokens.len();
        let start = tokens.first().map_or(0, |t| t.start);
        let end = tokens.last().map_or(0, |t| t.end);

        for mut token in tokens {
            token.sentence_idx = index;
            token.token_idx = self.tokens.len();
            self.tokens.push(token);
        }

        self.sentences
            .push(Sentence::new(text, index, start_token, self.tokens.len()).with_span(start, end));
    }

    pub fn build(self) -> Document {
        Document {
            tokens: self.tokens,
            sentences: self.sentences,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// A document plus the number of sentences to extract.
///
/// `k` is not checked against the document length: a `k` larger than the
/// sentence count returns the whole document and `k <= 0` returns nothing.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub document: Document,
    pub k: i64,
}

impl SummaryRequest {
    pub fn new(document: Document, k: i64) -> Self {
        Self { document, k }
    }

    /// Coerce caller-supplied text (e.g. a form field) into a sentence count
    pub fn parse_count(raw: &str) -> Result<i64> {
        let trimmed = raw.trim();
        trimmed.parse::<i64>().map_err(|_| {
            SummarizerError::invalid_request(format!(
                "sentence count \"{}\" is not an integer",
                trimmed
            ))
        })
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// How the summary text is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// Sentences joined by a single space
    #[default]
    Inline,
    /// One sentence per line
    OnePerLine,
}

impl OutputLayout {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "lines" | "one_per_line" | "newline" | "y" | "yes" => OutputLayout::OnePerLine,
            _ => OutputLayout::Inline,
        }
    }
}

impl std::str::FromStr for OutputLayout {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(OutputLayout::parse(value))
    }
}

fn default_parallel_threshold() -> usize {
    SummarizerConfig::DEFAULT_PARALLEL_THRESHOLD
}

fn default_fallback_language() -> String {
    "en".to_string()
}

/// Configuration for summarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Number of sentences to extract
    pub num_sentences: i64,
    /// Language code for tokenization; `None` detects it from the text
    #[serde(default)]
    pub language: Option<String>,
    /// Language used when detection fails
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
    /// Optional additional stopwords (extends the built-in list)
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Whether stopword matching is case-sensitive
    #[serde(default)]
    pub case_sensitive_stopwords: bool,
    /// Sentence count at which scoring switches to rayon
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Maximum input tokens before rejecting
    #[serde(default)]
    pub max_tokens: Option<usize>,
    /// Output layout for the summary text
    #[serde(default)]
    pub layout: OutputLayout,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            num_sentences: 3,
            language: None,
            fallback_language: default_fallback_language(),
            stopwords: Vec::new(),
            case_sensitive_stopwords: false,
            parallel_threshold: default_parallel_threshold(),
            max_tokens: None,
            layout: OutputLayout::Inline,
        }
    }
}

impl SummarizerConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(SummarizerError::invalid_config(
                "parallel_threshold must be > 0",
            ));
        }

        if self.max_tokens == Some(0) {
            return Err(SummarizerError::invalid_config("max_tokens must be > 0"));
        }

        if self.fallback_language.trim().is_empty() {
            return Err(SummarizerError::invalid_config(
                "fallback_language must not be empty",
            ));
        }

        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(SummarizerError::invalid_config(
                    "language must not be empty when set",
                ));
            }
        }

        Ok(())
    }

    /// Builder method: set number of sentences
    pub fn with_num_sentences(mut self, n: i64) -> Self {
        self.num_sentences = n;
        self
    }

    /// Builder method: set language (disables detection)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder method: set fallback language
    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = language.into();
        self
    }

    /// Builder method: set additional stopwords
    pub fn with_stopwords(mut self, words: Vec<String>) -> Self {
        self.stopwords = words;
        self
    }

    /// Builder method: set parallel scoring threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Builder method: set maximum token limit
    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Builder method: set output layout
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }
}
