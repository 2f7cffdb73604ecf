//! Stop word lists
//!
//! Lists come from the `stop-words` crate where it has one. Chinese, Japanese
//! and Korean use short built-in lists of particles and function words.

use rustc_hash::FxHashSet;
use stop_words::LANGUAGE;

const CHINESE: &[&str] = &[
    "的", "是", "在", "有", "和", "与", "或", "不", "了", "也", "就", "都", "而", "及",
    "这", "那", "个", "为", "以", "等", "但", "被", "给", "让", "把", "从", "到", "对",
    "将", "于", "能", "会", "可", "要", "很", "还", "更", "最", "只", "已", "又", "再",
    "我", "你", "他", "她", "它", "们", "之", "其",
];

const JAPANESE: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある",
    "いる", "も", "する", "から", "な", "こと", "として", "い", "や", "など", "ない",
    "この", "ため", "その", "よう", "また", "もの", "という", "あり", "まで", "られ",
    "なる", "へ", "か", "だ", "これ", "によって", "により", "おり", "です", "ます",
];

const KOREAN: &[&str] = &[
    "이", "그", "저", "것", "수", "등", "들", "및", "에", "의", "가", "을", "를", "은",
    "는", "와", "과", "도", "로", "으로", "에서", "하다", "있다", "되다", "그리고",
    "그러나", "하지만", "또한", "또", "더", "안", "못", "위해", "때문에",
];

/// Where a language's built-in list lives
enum ListSource {
    Crate(LANGUAGE),
    Static(&'static [&'static str]),
}

impl ListSource {
    /// Codes and English names are both accepted; anything else is English.
    fn for_language(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "zh" | "chinese" => return Self::Static(CHINESE),
            "ja" | "japanese" => return Self::Static(JAPANESE),
            "ko" | "korean" => return Self::Static(KOREAN),
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            _ => LANGUAGE::English,
        };
        Self::Crate(lang)
    }

    fn words(self) -> FxHashSet<String> {
        match self {
            Self::Crate(lang) => stop_words::get(lang).iter().map(|w| w.to_lowercase()).collect(),
            Self::Static(list) => list.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Decides whether a token is a stop word
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Stored lowercase
    words: FxHashSet<String>,
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Built-in list for `language`. Languages without a list get English.
    pub fn new(language: &str) -> Self {
        Self {
            words: ListSource::for_language(language).words(),
            case_sensitive: false,
        }
    }

    /// A filter that matches nothing
    pub fn empty() -> Self {
        Self::from_list(&[])
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
            case_sensitive: false,
        }
    }

    /// Match only the exact (lowercase) form when `true`
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        self.words
            .extend(words.iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for w in words {
            self.words.remove(&w.as_ref().to_lowercase());
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        match self.case_sensitive {
            true => self.words.contains(word),
            false => self.words.contains(&word.to_lowercase()),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The built-in list for a language, sorted
    pub fn built_in_list(language: &str) -> Vec<String> {
        let mut words: Vec<String> = ListSource::for_language(language).words().into_iter().collect();
        words.sort();
        words
    }
}
