//! Stateless responder over the fixed question table.

use log::debug;

use super::matching::{MatchPolicy, normalize, select_question};
use super::questions::{COMPANY_SUMMARY, FALLBACK_APOLOGY, KnownQuestion, known_questions};

/// What the assistant says back to one user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// A known question matched.
    Answer {
        key: &'static str,
        html: &'static str,
    },
    /// Nothing matched; apology followed by the company summary.
    Fallback {
        apology: &'static str,
        summary: &'static str,
    },
}

impl Response {
    /// Message bodies in display order.
    pub fn parts(&self) -> Vec<&'static str> {
        match *self {
            Response::Answer { html, .. } => vec![html],
            Response::Fallback { apology, summary } => vec![apology, summary],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Response::Fallback { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConversationEngine {
    questions: &'static [KnownQuestion],
    policy: MatchPolicy,
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::new(known_questions(), MatchPolicy::default())
    }
}

impl ConversationEngine {
    pub fn new(questions: &'static [KnownQuestion], policy: MatchPolicy) -> Self {
        Self { questions, policy }
    }

    /// Built-in table with the given keyword policy.
    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self::new(known_questions(), policy)
    }

    pub fn questions(&self) -> &'static [KnownQuestion] {
        self.questions
    }

    /// Answers one user input.
    ///
    /// Returns `None` for empty or whitespace-only input; every other input
    /// yields exactly one response.
    pub fn respond(&self, input: &str) -> Option<Response> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            debug!("Respond: empty input ignored");
            return None;
        }

        let response = match select_question(self.questions, &normalized, self.policy) {
            Some(question) => Response::Answer {
                key: question.key,
                html: question.answer,
            },
            None => {
                debug!("Respond: no question matched '{normalized}', using fallback");
                Response::Fallback {
                    apology: FALLBACK_APOLOGY,
                    summary: COMPANY_SUMMARY,
                }
            }
        };

        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_key(response: Option<Response>) -> Option<&'static str> {
        match response? {
            Response::Answer { key, .. } => Some(key),
            Response::Fallback { .. } => None,
        }
    }

    #[test]
    fn empty_and_blank_input_is_a_no_op() {
        let engine = ConversationEngine::default();
        assert_eq!(engine.respond(""), None);
        assert_eq!(engine.respond("   \t\n"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let engine = ConversationEngine::default();
        let upper = engine.respond("WHAT CAN YOU DO FOR ME");
        let lower = engine.respond("what can you do for me");
        assert!(upper.is_some());
        assert_eq!(upper, lower);
        assert_eq!(answer_key(upper), Some("what can you do for me"));
    }

    #[test]
    fn trigger_phrase_matches_inside_longer_input() {
        let engine = ConversationEngine::default();
        let response = engine.respond("ok so how much will it cost me");
        assert_eq!(answer_key(response), Some("how much will it cost"));
    }

    #[test]
    fn auxiliary_keywords_reach_their_question() {
        let engine = ConversationEngine::default();
        assert_eq!(
            answer_key(engine.respond("what's the price, roughly how much?")),
            Some("how much will it cost")
        );
        assert_eq!(
            answer_key(engine.respond("I'd like to talk to expert")),
            Some("how do i get started")
        );
        assert_eq!(
            answer_key(engine.respond("what app could you build")),
            Some("what can you do for me")
        );
    }

    #[test]
    fn short_input_matches_a_title() {
        let engine = ConversationEngine::default();
        assert_eq!(
            answer_key(engine.respond("get started")),
            Some("how do i get started")
        );
    }

    #[test]
    fn unknown_question_falls_back_to_company_summary() {
        let engine = ConversationEngine::default();
        let response = engine
            .respond("do you do logo design")
            .expect("expected a response");
        assert!(response.is_fallback());
        assert_eq!(response.parts(), vec![FALLBACK_APOLOGY, COMPANY_SUMMARY]);
    }

    #[test]
    fn answers_carry_a_single_html_part() {
        let engine = ConversationEngine::default();
        let response = engine
            .respond("how do i get started")
            .expect("expected a response");
        assert_eq!(response.parts().len(), 1);
        assert!(response.parts()[0].starts_with("<p>"));
    }

    #[test]
    fn table_order_decides_between_trigger_and_keyword() {
        // "cost" trigger and the "start" keyword both apply; the cost entry
        // comes first in the table.
        let input = "how much will it cost to start";
        let scoped = ConversationEngine::with_policy(MatchPolicy::Scoped);
        assert_eq!(
            answer_key(scoped.respond(input)),
            Some("how much will it cost")
        );

        // Legacy checks every keyword on every entry, so the first entry wins.
        let legacy = ConversationEngine::with_policy(MatchPolicy::Legacy);
        assert_eq!(
            answer_key(legacy.respond(input)),
            Some("what can you do for me")
        );
    }

    #[test]
    fn legacy_keyword_short_circuits_before_own_entry() {
        let legacy = ConversationEngine::with_policy(MatchPolicy::Legacy);
        assert_eq!(
            answer_key(legacy.respond("when can we begin")),
            Some("what can you do for me")
        );
        let scoped = ConversationEngine::default();
        assert_eq!(
            answer_key(scoped.respond("when can we begin")),
            Some("how do i get started")
        );
    }

    #[test]
    fn respond_is_idempotent() {
        let engine = ConversationEngine::default();
        for input in ["how much will it cost", "do you do logo design", "Start"] {
            assert_eq!(engine.respond(input), engine.respond(input));
        }
    }

    #[test]
    fn every_non_blank_input_gets_one_response() {
        let engine = ConversationEngine::default();
        for input in ["x", "?", "hello", "  spaced out  ", "ÉCOLE"] {
            assert!(engine.respond(input).is_some(), "no response for '{input}'");
        }
    }
}
