//! Structured errors for summary spec validation.
//!
//! Every diagnostic carries a stable machine-readable [`ErrorCode`], a JSON
//! pointer to the offending field, a message, and an optional hint.

use serde::Serialize;
use thiserror::Error;

/// Stable error codes for spec diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec version is not supported.
    UnsupportedVersion,
    /// A value is outside its allowed range.
    InvalidValue,
    /// A language code is unknown or has no profile.
    UnknownLanguage,
    /// A runtime limit is zero or otherwise unusable.
    LimitExceeded,
    /// A field name is not part of the schema.
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidValue => "invalid_value",
            Self::UnknownLanguage => "unknown_language",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single spec problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    /// JSON pointer to the field (e.g. `/runtime/max_tokens`)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
