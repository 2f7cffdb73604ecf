//! Validation engine for summary specifications.
//!
//! A [`ValidationEngine`] runs each of its [`ValidationRule`]s over a
//! [`SummarySpec`](super::spec::SummarySpec). Findings from every rule end up
//! in one [`ValidationReport`]; a failing rule does not stop the others.
//!
//! ```rust
//! use rapid_summarizer::pipeline::spec::SummarySpec;
//! use rapid_summarizer::pipeline::validation::ValidationEngine;
//!
//! let spec = SummarySpec::from_json(r#"{ "v": 1, "num_sentences": 2 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.is_valid());
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::errors::{ErrorCode, PipelineSpecError};
use super::spec::*;
use crate::nlp::language::LanguageProfiles;

/// Errors block a spec; warnings are reported and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding. Serializes as the error's fields plus `severity`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: PipelineSpecError,
}

impl ValidationDiagnostic {
    pub fn new(severity: Severity, error: PipelineSpecError) -> Self {
        Self { severity, error }
    }

    pub fn error(error: PipelineSpecError) -> Self {
        Self::new(Severity::Error, error)
    }

    pub fn warning(error: PipelineSpecError) -> Self {
        Self::new(Severity::Warning, error)
    }
}

/// Every diagnostic produced by one engine run, in rule order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn of_severity(&self, severity: Severity) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| &d.error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.of_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.of_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// A spec with only warnings is still valid.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A check over a [`SummarySpec`].
///
/// `Send + Sync` so a configured engine can be shared between threads.
pub trait ValidationRule: Send + Sync {
    /// Stable identifier, e.g. `"runtime_limits"`
    fn name(&self) -> &str;

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic>;
}

/// Ordered set of rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// An engine with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Version, sentence count, language, runtime limits and unknown fields
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(SentenceCountRule));
        engine.add_rule(Box::new(LanguageRule::new(LanguageProfiles::standard())));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Rule names in run order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &SummarySpec) -> ValidationReport {
        ValidationReport {
            diagnostics: self.rules.iter().flat_map(|rule| rule.validate(spec)).collect(),
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── 1. Supported version ───────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            PipelineSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Sentence count must be an integer ───────────────────────────────────

struct SentenceCountRule;

impl ValidationRule for SentenceCountRule {
    fn name(&self) -> &str {
        "sentence_count"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let Some(raw) = &spec.num_sentences else {
            return vec![];
        };

        match spec.num_sentences() {
            None => vec![ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::InvalidValue,
                    "/num_sentences",
                    format!("num_sentences must be an integer, got {raw}"),
                )
                .with_hint("Use a whole number such as 3"),
            )],
            Some(n) if n <= 0 => vec![ValidationDiagnostic::warning(
                PipelineSpecError::new(
                    ErrorCode::InvalidValue,
                    "/num_sentences",
                    format!("num_sentences is {n}; every summary will be empty"),
                )
                .with_hint("Use a positive count"),
            )],
            Some(_) => vec![],
        }
    }
}

// ─── 3. Language codes ──────────────────────────────────────────────────────

/// Codes must be ISO 639-1; codes without a tokenizer profile fall back to
/// the default profile and only warn.
struct LanguageRule {
    profiles: LanguageProfiles,
}

impl LanguageRule {
    fn new(profiles: LanguageProfiles) -> Self {
        Self { profiles }
    }

    fn check(&self, path: &str, code: &str) -> Option<ValidationDiagnostic> {
        let normalized = code.trim().to_lowercase();
        if isolang::Language::from_639_1(&normalized).is_none() {
            return Some(ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::UnknownLanguage,
                    path,
                    format!("\"{code}\" is not an ISO 639-1 language code"),
                )
                .with_hint("Use a two-letter code such as \"en\" or \"de\""),
            ));
        }
        if !self.profiles.contains(&normalized) {
            return Some(ValidationDiagnostic::warning(
                PipelineSpecError::new(
                    ErrorCode::UnknownLanguage,
                    path,
                    format!(
                        "no tokenizer profile for \"{code}\"; the \"{}\" profile will be used",
                        self.profiles.default_code()
                    ),
                )
                .with_hint(format!(
                    "Supported languages: {}",
                    self.profiles.codes().join(", ")
                )),
            ));
        }
        None
    }
}

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        if let Some(code) = &spec.language {
            out.extend(self.check("/language", code));
        }
        if let Some(code) = &spec.fallback_language {
            out.extend(self.check("/fallback_language", code));
        }
        out
    }
}

// ─── 4. Runtime limits ──────────────────────────────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        [
            ("max_tokens", spec.runtime.max_tokens),
            ("parallel_threshold", spec.runtime.parallel_threshold),
        ]
        .into_iter()
        .filter(|(_, value)| *value == Some(0))
        .map(|(field, _)| {
            ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::LimitExceeded,
                    format!("/runtime/{field}"),
                    format!("{field} is 0"),
                )
                .with_hint(format!("Omit {field} for the default or use a positive value")),
            )
        })
        .collect()
    }
}

// ─── 5. Unknown fields ──────────────────────────────────────────────────────

/// Errors under `strict`, warnings otherwise.
struct UnknownFieldsRule;

fn unknown_field_diagnostics(
    parent: &str,
    fields: &HashMap<String, serde_json::Value>,
    strict: bool,
) -> impl Iterator<Item = ValidationDiagnostic> {
    let severity = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };
    let mut keys: Vec<String> = fields.keys().cloned().collect();
    keys.sort();
    let parent = parent.to_string();
    keys.into_iter().map(move |key| {
        ValidationDiagnostic::new(
            severity,
            PipelineSpecError::new(
                ErrorCode::UnknownField,
                format!("{parent}/{key}"),
                format!("field \"{key}\" is not recognized"),
            )
            .with_hint("Fix the spelling or drop the field"),
        )
    })
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        unknown_field_diagnostics("", &spec.unknown_fields, spec.strict)
            .chain(unknown_field_diagnostics(
                "/runtime",
                &spec.runtime.unknown_fields,
                spec.strict,
            ))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> SummarySpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_full_spec_is_valid() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "language": "fr",
                "fallback_language": "en",
                "num_sentences": 4,
                "runtime": { "max_tokens": 5000 }
            }"#,
        ));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let report = engine().validate(&spec(r#"{ "v": 2 }"#));
        assert!(report.has_errors());
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::UnsupportedVersion);
        assert_eq!(err.path, "/v");
    }

    #[test]
    fn test_non_integer_count_is_error() {
        let report = engine().validate(&spec(r#"{ "v": 1, "num_sentences": "lots" }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidValue);
        assert_eq!(err.path, "/num_sentences");
    }

    #[test]
    fn test_non_positive_count_is_warning() {
        let report = engine().validate(&spec(r#"{ "v": 1, "num_sentences": 0 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_bad_language_code_is_error() {
        let report = engine().validate(&spec(r#"{ "v": 1, "language": "english" }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::UnknownLanguage);
        assert_eq!(err.path, "/language");
    }

    #[test]
    fn test_language_without_profile_is_warning() {
        // Italian is valid ISO 639-1 but has no standard profile.
        let report = engine().validate(&spec(r#"{ "v": 1, "language": "it" }"#));
        assert!(report.is_valid());
        let warn = report.warnings().next().unwrap();
        assert_eq!(warn.code, ErrorCode::UnknownLanguage);
    }

    #[test]
    fn test_zero_runtime_limits() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "runtime": { "max_tokens": 0, "parallel_threshold": 0 } }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/runtime/max_tokens", "/runtime/parallel_threshold"]);
    }

    #[test]
    fn test_all_errors_collected() {
        let report = engine().validate(&spec(
            r#"{ "v": 9, "num_sentences": [1], "language": "xx", "strict": true, "extra": 1 }"#,
        ));
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_unknown_fields_warn_when_not_strict() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "bogus": true, "runtime": { "max_nodes": 3 } }"#,
        ));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/bogus", "/runtime/max_nodes"]);
    }

    #[test]
    fn test_unknown_fields_error_when_strict() {
        let report = engine().validate(&spec(r#"{ "v": 1, "strict": true, "bogus": true }"#));
        assert!(report.has_errors());
        assert_eq!(report.errors().next().unwrap().code, ErrorCode::UnknownField);
    }

    #[test]
    fn test_custom_rule() {
        struct RequireLanguage;

        impl ValidationRule for RequireLanguage {
            fn name(&self) -> &str {
                "require_language"
            }

            fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
                if spec.language.is_some() {
                    vec![]
                } else {
                    vec![ValidationDiagnostic::error(PipelineSpecError::new(
                        ErrorCode::InvalidValue,
                        "/language",
                        "language is required",
                    ))]
                }
            }
        }

        let mut engine = ValidationEngine::new();
        engine.add_rule(Box::new(RequireLanguage));
        assert_eq!(engine.rule_names(), vec!["require_language"]);
        assert!(engine.validate(&spec(r#"{ "v": 1 }"#)).has_errors());
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = engine().validate(&spec(r#"{ "v": 2 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diag = &json["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "unsupported_version");
        assert_eq!(diag["path"], "/v");
    }
}
