//! Follow-up suggestion chips.

use artdx_core::Language;

/// Strategy that proposes follow-up questions after an answer.
pub trait SuggestionStrategy: Send + Sync {
    /// Return candidate questions, most useful first.
    fn suggest(&self, answer: &str, language: Language) -> Vec<String>;
}

struct Aspect {
    markers: &'static [&'static str],
    english: &'static str,
    indonesian: &'static str,
}

const ASPECTS: &[Aspect] = &[
    Aspect {
        markers: &["style", "gaya"],
        english: "What other works share this style?",
        indonesian: "Karya lain apa yang memiliki gaya serupa?",
    },
    Aspect {
        markers: &["period", "periode", "century", "abad"],
        english: "Which historical period does this belong to?",
        indonesian: "Karya ini berasal dari periode sejarah apa?",
    },
    Aspect {
        markers: &["technique", "teknik"],
        english: "What technique did the artist use?",
        indonesian: "Teknik apa yang digunakan senimannya?",
    },
    Aspect {
        markers: &["artist", "seniman", "painter", "pelukis"],
        english: "Who might the artist be?",
        indonesian: "Siapa kemungkinan senimannya?",
    },
    Aspect {
        markers: &["authentic", "autentik"],
        english: "How could this work be authenticated?",
        indonesian: "Bagaimana cara mengautentikasi karya ini?",
    },
];

/// Default strategy: one question per critique aspect, aspects the answer
/// has not touched yet first.
#[derive(Debug, Default, Clone, Copy)]
pub struct FollowUpSuggestions;

impl SuggestionStrategy for FollowUpSuggestions {
    fn suggest(&self, answer: &str, language: Language) -> Vec<String> {
        let lower = answer.to_lowercase();
        let (covered, missing): (Vec<&Aspect>, Vec<&Aspect>) = ASPECTS
            .iter()
            .partition(|a| a.markers.iter().any(|m| lower.contains(m)));

        missing
            .into_iter()
            .chain(covered)
            .map(|a| match language {
                Language::English => a.english.to_string(),
                Language::Indonesian => a.indonesian.to_string(),
            })
            .collect()
    }
}
