//! Scripted FAQ chat: the conversation engine and the widget state around it.

mod engine;
mod matching;
mod questions;
mod widget;

pub use engine::{ConversationEngine, Response};
pub use matching::MatchPolicy;
pub use questions::{
    COMPANY_SUMMARY, FALLBACK_APOLOGY, GREETING, KnownQuestion, known_questions,
};
pub use widget::{
    ChatMessage, ChatWidget, Opening, QuickAction, Transcript, Turn, WidgetState,
};
