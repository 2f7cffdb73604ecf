//! Text to [`Document`] tokenization
//!
//! Sentence and word boundaries follow Unicode text segmentation (UAX #29).
//! Whitespace never becomes a token; segments without any alphanumeric
//! character are kept as punctuation tokens.

use unicode_segmentation::UnicodeSegmentation;

use super::language::{LanguageProfiles, TokenizerProfile};
use super::stopwords::StopwordFilter;
use crate::errors::Result;
use crate::types::{Document, Token};

/// Splits raw text into sentences and flagged tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: StopwordFilter,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerProfile::new("en"))
    }
}

impl Tokenizer {
    pub fn new(profile: &TokenizerProfile) -> Self {
        Self {
            stopwords: profile.stopword_filter(),
        }
    }

    /// Tokenizer for a language code, using the standard profiles
    pub fn for_language(code: &str) -> Result<Self> {
        let profiles = LanguageProfiles::standard();
        let (_, profile) = profiles.resolve(code)?;
        Ok(Self::new(profile))
    }

    /// Tokenizer over an explicit stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Tokenize `text` into a document.
    ///
    /// Offsets are byte offsets into `text`. Sentences that produce no
    /// tokens are dropped.
    pub fn tokenize(&self, text: &str) -> Document {
        let mut builder = Document::builder();

        for (offset, segment) in text.split_sentence_bound_indices() {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                continue;
            }
            let sentence_start = offset + (segment.len() - segment.trim_start().len());

            let tokens: Vec<Token> = trimmed
                .split_word_bound_indices()
                .filter(|(_, word)| !word.trim().is_empty())
                .map(|(word_offset, word)| self.token(word, sentence_start + word_offset))
                .collect();

            if tokens.is_empty() {
                continue;
            }
            builder.push_sentence(trimmed, tokens);
        }

        builder.build()
    }

    fn token(&self, word: &str, start: usize) -> Token {
        let is_punctuation = !word.chars().any(char::is_alphanumeric);
        let is_stopword = !is_punctuation && self.stopwords.is_stopword(word);
        // Indices are assigned by the document builder.
        Token::new(word, start, start + word.len(), 0, 0)
            .with_punctuation(is_punctuation)
            .with_stopword(is_stopword)
    }
}
