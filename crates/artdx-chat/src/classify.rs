//! Failure detection on answer text.
//!
//! Two keyword sets are in use and they are intentionally kept apart: one
//! decides whether an answer is an apology (no analysis prefix), the other
//! whether it is informational enough to offer follow-up suggestions.

/// Strategy for judging whether an answer reports a failure.
pub trait FailureClassifier: Send + Sync {
    fn is_failure(&self, answer: &str) -> bool;
}

/// Case-insensitive substring match against a fixed keyword list.
#[derive(Debug, Clone)]
pub struct KeywordFailureClassifier {
    keywords: Vec<String>,
}

impl KeywordFailureClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Apology markers that suppress the analysis prefix.
    pub fn apology() -> Self {
        Self::new(["mohon maaf", "sorry", "error"])
    }

    /// Failure markers that suppress suggestion chips.
    pub fn non_informational() -> Self {
        Self::new([
            "gagal",
            "mohon maaf",
            "terjadi kesalahan",
            "sorry",
            "error",
            "fail",
        ])
    }
}

impl FailureClassifier for KeywordFailureClassifier {
    fn is_failure(&self, answer: &str) -> bool {
        let lower = answer.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}
