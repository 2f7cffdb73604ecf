//! Natural Language Processing components
//!
//! This module turns raw text into a [`crate::types::Document`]: language
//! profiles and detection, stopword filtering and tokenization.

pub mod language;
pub mod stopwords;
pub mod tokenizer;
