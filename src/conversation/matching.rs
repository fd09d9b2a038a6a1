//! Question matching for the conversation engine.

use log::debug;

use super::questions::KnownQuestion;

/// How auxiliary intent keywords take part in matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Each question only checks its own keywords.
    #[default]
    Scoped,
    /// Every question checks the keywords of the whole table, so any keyword
    /// hit resolves to the first question in table order.
    Legacy,
}

impl KnownQuestion {
    /// Returns true when the normalized input selects this question.
    fn matches(&self, normalized: &str, keywords: &[&str]) -> bool {
        if normalized.contains(self.key) {
            debug!("Question match: trigger hit (key='{}')", self.key);
            return true;
        }
        if self.title.to_lowercase().contains(normalized) {
            debug!("Question match: title hit (key='{}')", self.key);
            return true;
        }
        if let Some(keyword) = keywords.iter().find(|keyword| normalized.contains(*keyword)) {
            debug!(
                "Question match: keyword hit (key='{}', keyword='{keyword}')",
                self.key
            );
            return true;
        }
        false
    }
}

/// Lowercases and trims raw user input.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Returns the first question in table order that the normalized input selects.
pub fn select_question<'a>(
    questions: &'a [KnownQuestion],
    normalized: &str,
    policy: MatchPolicy,
) -> Option<&'a KnownQuestion> {
    if normalized.is_empty() {
        return None;
    }

    let table_keywords: Vec<&str> = match policy {
        MatchPolicy::Scoped => Vec::new(),
        MatchPolicy::Legacy => questions
            .iter()
            .flat_map(|question| question.keywords.iter().copied())
            .collect(),
    };

    questions.iter().find(|question| {
        let keywords = match policy {
            MatchPolicy::Scoped => question.keywords,
            MatchPolicy::Legacy => table_keywords.as_slice(),
        };
        question.matches(normalized, keywords)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: [KnownQuestion; 2] = [
        KnownQuestion {
            key: "alpha question",
            title: "Alpha question?",
            answer: "<p>alpha</p>",
            keywords: &["first"],
        },
        KnownQuestion {
            key: "beta question",
            title: "Beta question?",
            answer: "<p>beta</p>",
            keywords: &["second"],
        },
    ];

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Hello THERE \n"), "hello there");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn trigger_phrase_matches_as_substring() {
        let found = select_question(&TABLE, "so, beta question please", MatchPolicy::Scoped)
            .expect("expected match");
        assert_eq!(found.key, "beta question");
    }

    #[test]
    fn partial_input_matches_title() {
        let found =
            select_question(&TABLE, "beta", MatchPolicy::Scoped).expect("expected match");
        assert_eq!(found.key, "beta question");
    }

    #[test]
    fn empty_input_never_matches() {
        assert!(select_question(&TABLE, "", MatchPolicy::Scoped).is_none());
        assert!(select_question(&TABLE, "", MatchPolicy::Legacy).is_none());
    }

    #[test]
    fn scoped_keywords_stay_with_their_question() {
        let found =
            select_question(&TABLE, "my second try", MatchPolicy::Scoped).expect("expected match");
        assert_eq!(found.key, "beta question");
    }

    #[test]
    fn legacy_keywords_resolve_to_first_entry() {
        let found =
            select_question(&TABLE, "my second try", MatchPolicy::Legacy).expect("expected match");
        assert_eq!(found.key, "alpha question");
    }

    #[test]
    fn unrelated_input_matches_nothing() {
        assert!(select_question(&TABLE, "gamma", MatchPolicy::Scoped).is_none());
        assert!(select_question(&TABLE, "gamma", MatchPolicy::Legacy).is_none());
    }
}
