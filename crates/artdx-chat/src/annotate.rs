//! Presentation markup for answer text.
//!
//! Art-criticism vocabulary is bolded and English loanwords are italicised.
//! The bold pass runs to completion before the italic pass; a word in both
//! lists ends up wrapped by both, italic outermost.
//!
//! Annotation is not idempotent: the markup characters are non-word
//! characters, so a second pass wraps `**style**` again. Store plain text
//! and annotate once per display.

use std::sync::LazyLock;

use regex::Regex;

/// Domain terms (Indonesian and English) rendered bold.
pub const BOLD_TERMS: &[&str] = &[
    "analisis",
    "kritik",
    "teknik",
    "gaya",
    "periode",
    "seniman",
    "simbolisme",
    "authentication",
    "analysis",
    "technique",
    "style",
    "artist",
];

/// English loanwords rendered italic.
pub const ITALIC_TERMS: &[&str] = &[
    "data", "science", "rag", "agent", "tool", "api", "prompt", "feedback", "visual", "web",
    "input", "output", "pdf", "file", "word", "docx", "txt", "doc", "admin", "report", "journal",
    "jpg", "png",
];

fn whole_word_patterns(terms: &[&str]) -> Vec<Regex> {
    terms
        .iter()
        .map(|t| {
            Regex::new(&format!(r"(?i)\b({})\b", regex::escape(t)))
                .expect("Invalid annotation regex")
        })
        .collect()
}

static BOLD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| whole_word_patterns(BOLD_TERMS));
static ITALIC_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| whole_word_patterns(ITALIC_TERMS));

/// Applies bold/italic markup to known vocabulary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAnnotator;

impl TextAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Return `text` with vocabulary markup applied. Matched words keep
    /// their original casing.
    pub fn annotate(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in BOLD_PATTERNS.iter() {
            out = re.replace_all(&out, "**${1}**").into_owned();
        }
        for re in ITALIC_PATTERNS.iter() {
            out = re.replace_all(&out, "*${1}*").into_owned();
        }
        out
    }
}
