//! Conversation language detection.
//!
//! A keyword heuristic, not a real classifier: any whole-word English
//! function word or domain stem marks the text as English, everything else
//! is treated as Indonesian.

use std::sync::LazyLock;

use artdx_core::Language;
use regex::Regex;

static ENGLISH_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(the|is|are|you|what|how|why|analysis|style|artist)\b")
        .expect("Invalid language marker regex")
});

/// Classify `text` as English or Indonesian.
pub fn detect(text: &str) -> Language {
    if ENGLISH_MARKERS.is_match(text) {
        Language::English
    } else {
        Language::Indonesian
    }
}

/// Strategy for deciding which language a user message is written in.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Language;
}

/// The default keyword-based classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordLanguageDetector;

impl LanguageClassifier for KeywordLanguageDetector {
    fn classify(&self, text: &str) -> Language {
        detect(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_question() {
        assert_eq!(detect("What style is this?"), Language::English);
        assert_eq!(detect("who is the ARTIST"), Language::English);
    }

    #[test]
    fn test_indonesian_question() {
        assert_eq!(detect("Apa gaya lukisan ini?"), Language::Indonesian);
        assert_eq!(detect("Siapa senimannya?"), Language::Indonesian);
    }

    #[test]
    fn test_hello_has_no_marker() {
        assert_eq!(detect("hello"), Language::Indonesian);
    }

    #[test]
    fn test_requires_whole_word() {
        // "this" and "island" contain "is" but not as a word
        assert_eq!(detect("this island"), Language::Indonesian);
        assert_eq!(detect("stylish"), Language::Indonesian);
    }

    #[test]
    fn test_known_false_positive() {
        assert_eq!(detect("Tolong jelaskan style lukisan ini"), Language::English);
    }

    #[test]
    fn test_total_on_odd_input() {
        for text in ["", "   ", "\n\n", "🎨🖼️", "???", "the"] {
            let lang = detect(text);
            assert!(matches!(lang, Language::English | Language::Indonesian));
        }
    }

    #[test]
    fn test_classifier_delegates_to_detect() {
        let classifier = KeywordLanguageDetector;
        assert_eq!(classifier.classify("how old is it"), Language::English);
        assert_eq!(classifier.classify("berapa umurnya"), Language::Indonesian);
    }
}
