//! Language profiles and detection
//!
//! [`LanguageProfiles`] maps ISO 639-1 codes to the tokenizer settings used
//! for that language, with a default entry for everything else.
//! [`LanguageDetector`] guesses the language of a text from its script and
//! stopword usage. Detection returns a `Result`; deciding what to do when it
//! fails is left to the caller.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;
use crate::errors::{Result, SummarizerError};

// ============================================================================
// Profiles
// ============================================================================

/// Tokenizer settings for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerProfile {
    /// Which built-in stopword list to load
    pub stopword_language: String,
    /// Stopwords added on top of the built-in list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl TokenizerProfile {
    pub fn new(stopword_language: impl Into<String>) -> Self {
        Self {
            stopword_language: stopword_language.into(),
            extra_stopwords: Vec::new(),
            case_sensitive: false,
        }
    }

    pub fn with_extra_stopwords(mut self, words: Vec<String>) -> Self {
        self.extra_stopwords = words;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Build the stopword filter this profile describes
    pub fn stopword_filter(&self) -> StopwordFilter {
        let mut filter =
            StopwordFilter::new(&self.stopword_language).with_case_sensitive(self.case_sensitive);
        filter.add_stopwords(&self.extra_stopwords);
        filter
    }
}

/// Language code to tokenizer profile mapping with a default entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfiles {
    profiles: BTreeMap<String, TokenizerProfile>,
    default: String,
}

impl Default for LanguageProfiles {
    fn default() -> Self {
        Self::standard()
    }
}

impl LanguageProfiles {
    /// A mapping holding only the default profile
    pub fn new(default_code: impl Into<String>, default_profile: TokenizerProfile) -> Self {
        let default = default_code.into().to_lowercase();
        let mut profiles = BTreeMap::new();
        profiles.insert(default.clone(), default_profile);
        Self { profiles, default }
    }

    /// Profiles for en, fr, zh, de, ja, ko, ru and es; English is the default
    pub fn standard() -> Self {
        let mut profiles = Self::new("en", TokenizerProfile::new("en"));
        for code in ["fr", "zh", "de", "ja", "ko", "ru", "es"] {
            profiles.insert(code, TokenizerProfile::new(code));
        }
        profiles
    }

    /// Add or replace a profile
    pub fn insert(&mut self, code: &str, profile: TokenizerProfile) {
        self.profiles.insert(code.to_lowercase(), profile);
    }

    /// Change the default entry; the code must already have a profile
    pub fn with_default(mut self, code: &str) -> Result<Self> {
        let code = code.to_lowercase();
        if !self.profiles.contains_key(&code) {
            return Err(SummarizerError::UnsupportedLanguage(code));
        }
        self.default = code;
        Ok(self)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.profiles.contains_key(&code.to_lowercase())
    }

    pub fn get(&self, code: &str) -> Option<&TokenizerProfile> {
        self.profiles.get(&code.to_lowercase())
    }

    pub fn default_code(&self) -> &str {
        &self.default
    }

    /// Registered codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Profile for `code`, or the default profile when there is none.
    ///
    /// Returns the code actually used alongside the profile.
    pub fn resolve(&self, code: &str) -> Result<(&str, &TokenizerProfile)> {
        let code = code.to_lowercase();
        if let Some((key, profile)) = self.profiles.get_key_value(&code) {
            return Ok((key.as_str(), profile));
        }
        self.profiles
            .get_key_value(&self.default)
            .map(|(key, profile)| (key.as_str(), profile))
            .ok_or(SummarizerError::UnsupportedLanguage(code))
    }
}

// ============================================================================
// Detection
// ============================================================================

/// Outcome of a successful detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// ISO 639-1 code
    pub code: String,
    /// Share of the evidence that supported this language (0..=1)
    pub confidence: f64,
}

impl DetectedLanguage {
    /// English name of the language, if the code is known
    pub fn name(&self) -> Option<&'static str> {
        language_name(&self.code)
    }
}

/// English name for an ISO 639-1 code
pub fn language_name(code: &str) -> Option<&'static str> {
    isolang::Language::from_639_1(code).map(|l| l.to_name())
}

/// Share of letters a script must reach to decide the language on its own.
const SCRIPT_SHARE: f64 = 0.2;

#[derive(Debug, Default)]
struct ScriptCounts {
    letters: usize,
    hangul: usize,
    kana: usize,
    han: usize,
    cyrillic: usize,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            counts.letters += 1;
            match c as u32 {
                0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F => counts.hangul += 1,
                0x3040..=0x30FF => counts.kana += 1,
                0x4E00..=0x9FFF | 0x3400..=0x4DBF => counts.han += 1,
                0x0400..=0x04FF => counts.cyrillic += 1,
                _ => {}
            }
        }
        counts
    }

    fn share(&self, n: usize) -> f64 {
        if self.letters == 0 {
            0.0
        } else {
            n as f64 / self.letters as f64
        }
    }
}

/// Script and stopword based language detector
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    /// Latin-script candidates, in tie-break order
    candidates: Vec<(String, StopwordFilter)>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    /// Detector over the Latin-script languages of the standard profiles
    pub fn new() -> Self {
        Self::with_candidates(&["en", "fr", "de", "es"])
    }

    /// Detector choosing among the given Latin-script languages
    pub fn with_candidates(codes: &[&str]) -> Self {
        Self {
            candidates: codes
                .iter()
                .map(|code| (code.to_string(), StopwordFilter::new(code)))
                .collect(),
        }
    }

    /// Detect the language of `text`.
    ///
    /// Fails with [`SummarizerError::LanguageDetection`] when the text has
    /// no letters or no stopword of any candidate language.
    pub fn detect(&self, text: &str) -> Result<DetectedLanguage> {
        let scripts = ScriptCounts::of(text);
        if scripts.letters == 0 {
            return Err(SummarizerError::language_detection("text contains no letters"));
        }

        let by_script = [
            ("ko", scripts.hangul),
            ("ja", scripts.kana + if scripts.kana > 0 { scripts.han } else { 0 }),
            ("zh", scripts.han),
            ("ru", scripts.cyrillic),
        ];
        for (code, n) in by_script {
            let share = scripts.share(n);
            if share >= SCRIPT_SHARE {
                return Ok(DetectedLanguage {
                    code: code.to_string(),
                    confidence: share,
                });
            }
        }

        let words: Vec<&str> = text.unicode_words().collect();
        let mut hits: FxHashMap<&str, usize> = FxHashMap::default();
        for (code, filter) in &self.candidates {
            let n = words.iter().filter(|w| filter.is_stopword(w)).count();
            hits.insert(code.as_str(), n);
        }

        // First candidate wins ties.
        let mut best: Option<(&str, usize)> = None;
        for (code, _) in &self.candidates {
            let n = hits.get(code.as_str()).copied().unwrap_or(0);
            if n > best.map_or(0, |(_, b)| b) {
                best = Some((code.as_str(), n));
            }
        }

        match best {
            Some((code, n)) => Ok(DetectedLanguage {
                code: code.to_string(),
                confidence: n as f64 / words.len().max(1) as f64,
            }),
            None => Err(SummarizerError::language_detection(
                "no stopwords of any candidate language found",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profiles() {
        let profiles = LanguageProfiles::standard();
        assert_eq!(profiles.default_code(), "en");
        assert_eq!(profiles.codes(), vec!["de", "en", "es", "fr", "ja", "ko", "ru", "zh"]);
        assert!(profiles.contains("DE"));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let profiles = LanguageProfiles::standard();
        let (code, profile) = profiles.resolve("pt").unwrap();
        assert_eq!(code, "en");
        assert_eq!(profile.stopword_language, "en");

        let (code, _) = profiles.resolve("fr").unwrap();
        assert_eq!(code, "fr");
    }

    #[test]
    fn test_with_default_requires_profile() {
        assert!(LanguageProfiles::standard().with_default("de").is_ok());
        assert!(matches!(
            LanguageProfiles::standard().with_default("pt"),
            Err(SummarizerError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_profile_extra_stopwords() {
        let profile = TokenizerProfile::new("en").with_extra_stopwords(vec!["rust".into()]);
        let filter = profile.stopword_filter();
        assert!(filter.is_stopword("Rust"));
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn test_detect_english() {
        let detected = LanguageDetector::new()
            .detect("The quick brown fox jumps over the lazy dog and then it runs away.")
            .unwrap();
        assert_eq!(detected.code, "en");
        assert_eq!(detected.name(), Some("English"));
        assert!(detected.confidence > 0.0 && detected.confidence <= 1.0);
    }

    #[test]
    fn test_detect_german() {
        let detected = LanguageDetector::new()
            .detect("Der Hund und die Katze sind nicht mehr in dem Haus, weil sie auch müde sind.")
            .unwrap();
        assert_eq!(detected.code, "de");
    }

    #[test]
    fn test_detect_by_script() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("기계 학습은 인공지능의 한 분야이다.").unwrap().code, "ko");
        assert_eq!(detector.detect("機械学習は人工知能の一分野です。").unwrap().code, "ja");
        assert_eq!(detector.detect("机器学习是人工智能的一个分支。").unwrap().code, "zh");
        assert_eq!(detector.detect("Машинное обучение это раздел искусственного интеллекта.").unwrap().code, "ru");
    }

    #[test]
    fn test_detect_fails_without_letters() {
        let res = LanguageDetector::new().detect("12345 !!! ...");
        assert!(matches!(res, Err(SummarizerError::LanguageDetection(_))));
    }

    #[test]
    fn test_detect_fails_without_stopwords() {
        let res = LanguageDetector::with_candidates(&["en"]).detect("Xyzzy plugh qwrtk");
        assert!(matches!(res, Err(SummarizerError::LanguageDetection(_))));
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("fr"), Some("French"));
        assert_eq!(language_name("zz"), None);
    }
}
