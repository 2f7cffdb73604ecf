//! Summary specification types.
//!
//! A [`SummarySpec`] is the JSON form of a summarization configuration:
//! language, sentence count, layout, runtime limits and strictness. It is
//! checked by [`super::validation::ValidationEngine`] and converted into a
//! [`SummarizerConfig`] with [`SummarySpec::to_config`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "language": "en",
//!   "num_sentences": 3,
//!   "layout": "one_per_line",
//!   "stopwords": ["however"],
//!   "runtime": { "max_tokens": 200000, "parallel_threshold": 256 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SummarizerError};
use crate::types::{OutputLayout, SummarizerConfig};

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

/// Top-level summary specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Language code; omitted means detect from the text.
    #[serde(default)]
    pub language: Option<String>,

    /// Language used when detection fails.
    #[serde(default)]
    pub fallback_language: Option<String>,

    /// Number of sentences to extract. Kept as raw JSON so a non-integer
    /// value surfaces as a diagnostic instead of a parse failure.
    #[serde(default)]
    pub num_sentences: Option<serde_json::Value>,

    #[serde(default)]
    pub layout: Option<OutputLayout>,

    /// Extra stopwords added to the language's list.
    #[serde(default)]
    pub stopwords: Vec<String>,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Runtime execution limits (fail-fast guards).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of input tokens before rejecting.
    #[serde(default)]
    pub max_tokens: Option<usize>,

    /// Sentence count at which scoring goes parallel.
    #[serde(default)]
    pub parallel_threshold: Option<usize>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarySpec {
    /// Parse a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The sentence count as an integer, if it is one.
    pub fn num_sentences(&self) -> Option<i64> {
        self.num_sentences.as_ref().and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Build a config on top of `base`, overriding whatever the spec sets.
    ///
    /// A `num_sentences` that is present but not an integer is an
    /// `InvalidRequest`.
    pub fn to_config(&self, base: &SummarizerConfig) -> Result<SummarizerConfig> {
        let mut config = base.clone();

        if let Some(raw) = &self.num_sentences {
            config.num_sentences = self.num_sentences().ok_or_else(|| {
                SummarizerError::invalid_request(format!(
                    "num_sentences {} is not an integer",
                    raw
                ))
            })?;
        }
        if let Some(language) = &self.language {
            config.language = Some(language.clone());
        }
        if let Some(fallback) = &self.fallback_language {
            config.fallback_language = fallback.clone();
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if !self.stopwords.is_empty() {
            config.stopwords = self.stopwords.clone();
        }
        if let Some(max) = self.runtime.max_tokens {
            config.max_tokens = Some(max);
        }
        if let Some(threshold) = self.runtime.parallel_threshold {
            config.parallel_threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = SummarySpec::from_json(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert!(spec.language.is_none());
        assert!(spec.num_sentences.is_none());
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "language": "de",
            "num_sentences": 5,
            "layout": "one_per_line",
            "stopwords": ["jedoch"],
            "runtime": { "max_tokens": 100000, "parallel_threshold": 64 },
            "strict": true
        }"#;
        let spec = SummarySpec::from_json(json).unwrap();
        assert_eq!(spec.language.as_deref(), Some("de"));
        assert_eq!(spec.num_sentences(), Some(5));
        assert_eq!(spec.layout, Some(OutputLayout::OnePerLine));
        assert_eq!(spec.runtime.max_tokens, Some(100000));
        assert!(spec.strict);

        let config = spec.to_config(&SummarizerConfig::default()).unwrap();
        assert_eq!(config.num_sentences, 5);
        assert_eq!(config.language.as_deref(), Some("de"));
        assert_eq!(config.stopwords, vec!["jedoch".to_string()]);
        assert_eq!(config.parallel_threshold, 64);
        assert_eq!(config.max_tokens, Some(100000));
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "runtime": { "max_nodes": 10 }
        }"#;
        let spec = SummarySpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.runtime.unknown_fields.contains_key("max_nodes"));
    }

    #[test]
    fn test_string_count_is_coerced() {
        let spec = SummarySpec::from_json(r#"{ "v": 1, "num_sentences": " 4 " }"#).unwrap();
        assert_eq!(spec.num_sentences(), Some(4));
    }

    #[test]
    fn test_non_integer_count_is_invalid_request() {
        let spec = SummarySpec::from_json(r#"{ "v": 1, "num_sentences": "many" }"#).unwrap();
        let res = spec.to_config(&SummarizerConfig::default());
        assert!(matches!(res, Err(SummarizerError::InvalidRequest(_))));
    }

    #[test]
    fn test_missing_fields_keep_base() {
        let base = SummarizerConfig::default().with_num_sentences(7);
        let spec = SummarySpec::from_json(r#"{ "v": 1 }"#).unwrap();
        let config = spec.to_config(&base).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_malformed_json_is_spec_error() {
        assert!(matches!(
            SummarySpec::from_json(r#"{ "v": "#),
            Err(SummarizerError::Spec(_))
        ));
    }
}
