use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Chinese,
    German,
    Spanish,
    Russian,
    Korean,
    French,
    Japanese,
    Portuguese,
    Turkish,
}

impl Language {
    /// Parses a two-letter code. Unrecognized codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" => Language::English,
            "zh" => Language::Chinese,
            "de" => Language::German,
            "es" => Language::Spanish,
            "ru" => Language::Russian,
            "ko" => Language::Korean,
            "fr" => Language::French,
            "ja" => Language::Japanese,
            "pt" => Language::Portuguese,
            "tr" => Language::Turkish,
            other => {
                log::warn!("[OPTIONS] Unknown language code '{}', using English", other);
                Language::English
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Russian => "ru",
            Language::Korean => "ko",
            Language::French => "fr",
            Language::Japanese => "ja",
            Language::Portuguese => "pt",
            Language::Turkish => "tr",
        }
    }

    pub fn tesseract_code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Chinese => "chi_sim",
            Language::German => "deu",
            Language::Spanish => "spa",
            Language::Russian => "rus",
            Language::Korean => "kor",
            Language::French => "fra",
            Language::Japanese => "jpn",
            Language::Portuguese => "por",
            Language::Turkish => "tur",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Per-call knobs. `None` at the call site means the settings defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizeOptions {
    pub languages: Vec<Language>,
    pub confidence_threshold: f32,
    pub timeout: Option<Duration>,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            languages: vec![Language::English],
            confidence_threshold: 0.0,
            timeout: None,
        }
    }
}

impl RecognizeOptions {
    pub fn languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn language_codes<S: AsRef<str>>(self, codes: &[S]) -> Self {
        let languages = codes
            .iter()
            .map(|code| Language::from_code(code.as_ref()))
            .collect();
        self.languages(languages)
    }

    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Languages to hand to the engine, never empty.
    pub fn effective_languages(&self) -> Vec<Language> {
        if self.languages.is_empty() {
            vec![Language::English]
        } else {
            self.languages.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_are_case_insensitive() {
        assert_eq!(Language::from_code("DE"), Language::German);
        assert_eq!(Language::from_code(" ja "), Language::Japanese);
    }

    #[test]
    fn test_unknown_language_code_falls_back_to_english() {
        assert_eq!(Language::from_code("xx"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
    }

    #[test]
    fn test_code_round_trips_through_from_code() {
        let all = [
            Language::English,
            Language::Chinese,
            Language::German,
            Language::Spanish,
            Language::Russian,
            Language::Korean,
            Language::French,
            Language::Japanese,
            Language::Portuguese,
            Language::Turkish,
        ];

        for language in all {
            assert_eq!(Language::from_code(language.code()), language);
        }
    }

    #[test]
    fn test_builder_sets_fields() {
        let options = RecognizeOptions::default()
            .language_codes(&["ko", "en"])
            .confidence_threshold(0.6)
            .timeout(Duration::from_secs(5));

        assert_eq!(options.languages, vec![Language::Korean, Language::English]);
        assert_eq!(options.confidence_threshold, 0.6);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_confidence_threshold_is_clamped() {
        assert_eq!(RecognizeOptions::default().confidence_threshold(7.0).confidence_threshold, 1.0);
        assert_eq!(RecognizeOptions::default().confidence_threshold(-1.0).confidence_threshold, 0.0);
    }

    #[test]
    fn test_nan_confidence_threshold_keeps_every_line() {
        let options = RecognizeOptions::default().confidence_threshold(f32::NAN);

        assert_eq!(options.confidence_threshold, 0.0);
    }

    #[test]
    fn test_effective_languages_defaults_to_english() {
        let options = RecognizeOptions::default().languages(vec![]);

        assert_eq!(options.effective_languages(), vec![Language::English]);
    }
}
