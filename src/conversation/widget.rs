//! Chat widget state: open/closed flag plus the append-only transcript.

use log::{debug, info};

use super::engine::ConversationEngine;
use super::questions::GREETING;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub is_user: bool,
    pub body: String,
}

impl ChatMessage {
    pub fn user(body: impl Into<String>) -> Self {
        Self {
            is_user: true,
            body: body.into(),
        }
    }

    pub fn bot(body: impl Into<String>) -> Self {
        Self {
            is_user: false,
            body: body.into(),
        }
    }
}

/// Displayed messages, oldest first. Only grows.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

/// Menu button that asks one of the known questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub key: &'static str,
    pub title: &'static str,
}

/// One exchange: the user's message and the replies to show after the typing delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: ChatMessage,
    pub replies: Vec<ChatMessage>,
}

/// What a first open puts on screen: the greeting and the menu under it.
///
/// Empty when the widget was already greeted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opening {
    pub greeting: Vec<ChatMessage>,
    pub menu: Vec<QuickAction>,
}

impl Opening {
    pub fn is_empty(&self) -> bool {
        self.greeting.is_empty() && self.menu.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    engine: ConversationEngine,
    state: WidgetState,
    transcript: Transcript,
}

impl ChatWidget {
    pub fn new(engine: ConversationEngine) -> Self {
        Self {
            engine,
            state: WidgetState::Collapsed,
            transcript: Transcript::default(),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == WidgetState::Expanded
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Expands the widget.
    ///
    /// The first time the transcript is empty the scripted greeting is
    /// appended and returned with the quick-action menu; later opens return
    /// nothing new.
    pub fn open(&mut self) -> Opening {
        self.state = WidgetState::Expanded;
        if !self.transcript.is_empty() {
            debug!("Chat widget reopened with {} messages", self.transcript.len());
            return Opening::default();
        }

        info!("Chat widget opened for the first time");
        let greeting: Vec<ChatMessage> = GREETING
            .iter()
            .map(|line| ChatMessage::bot(*line))
            .collect();
        for message in &greeting {
            self.transcript.push(message.clone());
        }
        Opening {
            greeting,
            menu: self.quick_actions(),
        }
    }

    pub fn close(&mut self) {
        debug!("Chat widget collapsed");
        self.state = WidgetState::Collapsed;
    }

    /// Flips between collapsed and expanded, returning any opening shown.
    pub fn toggle(&mut self) -> Opening {
        match self.state {
            WidgetState::Collapsed => self.open(),
            WidgetState::Expanded => {
                self.close();
                Opening::default()
            }
        }
    }

    /// Quick-action menu, in table order.
    pub fn quick_actions(&self) -> Vec<QuickAction> {
        self.engine
            .questions()
            .iter()
            .map(|question| QuickAction {
                key: question.key,
                title: question.title,
            })
            .collect()
    }

    /// Submits free text typed by the visitor.
    pub fn submit(&mut self, text: &str) -> Option<Turn> {
        let text = text.trim();
        self.exchange(text, text)
    }

    /// Submits the quick action at `index`; the transcript shows its title.
    pub fn press(&mut self, index: usize) -> Option<Turn> {
        let question = self.engine.questions().get(index)?;
        self.exchange(question.title, question.key)
    }

    fn exchange(&mut self, shown: &str, asked: &str) -> Option<Turn> {
        if !self.is_expanded() {
            debug!("Chat widget is collapsed, ignoring input");
            return None;
        }

        let response = self.engine.respond(asked)?;
        let user = ChatMessage::user(shown);
        let replies: Vec<ChatMessage> = response
            .parts()
            .into_iter()
            .map(ChatMessage::bot)
            .collect();

        self.transcript.push(user.clone());
        for reply in &replies {
            self.transcript.push(reply.clone());
        }
        debug!(
            "Chat turn recorded (fallback={}, transcript={})",
            response.is_fallback(),
            self.transcript.len()
        );

        Some(Turn { user, replies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{COMPANY_SUMMARY, FALLBACK_APOLOGY};

    #[test]
    fn starts_collapsed_and_empty() {
        let widget = ChatWidget::default();
        assert_eq!(widget.state(), WidgetState::Collapsed);
        assert!(widget.transcript().is_empty());
    }

    #[test]
    fn first_open_greets_and_later_opens_do_not() {
        let mut widget = ChatWidget::default();
        let opening = widget.open();
        assert_eq!(opening.greeting.len(), GREETING.len());
        assert!(opening.greeting.iter().all(|message| !message.is_user));
        assert_eq!(opening.menu, widget.quick_actions());
        assert_eq!(widget.transcript().len(), GREETING.len());

        widget.close();
        assert!(widget.open().is_empty());
        assert_eq!(widget.transcript().len(), GREETING.len());
    }

    #[test]
    fn toggle_is_reversible() {
        let mut widget = ChatWidget::default();
        assert_eq!(widget.toggle().menu.len(), 3);
        assert!(widget.is_expanded());
        assert!(widget.toggle().is_empty());
        assert_eq!(widget.state(), WidgetState::Collapsed);
        assert!(widget.toggle().is_empty());
        assert!(widget.is_expanded());
    }

    #[test]
    fn collapsed_widget_ignores_input() {
        let mut widget = ChatWidget::default();
        assert!(widget.submit("how much will it cost").is_none());
        assert!(widget.transcript().is_empty());
    }

    #[test]
    fn blank_input_leaves_transcript_untouched() {
        let mut widget = ChatWidget::default();
        widget.open();
        let before = widget.transcript().len();
        assert!(widget.submit("   ").is_none());
        assert_eq!(widget.transcript().len(), before);
    }

    #[test]
    fn fallback_turn_appends_user_message_and_two_replies() {
        let mut widget = ChatWidget::default();
        widget.open();
        let before = widget.transcript().len();

        let turn = widget
            .submit("  do you do logo design ")
            .expect("expected a turn");
        assert_eq!(turn.user, ChatMessage::user("do you do logo design"));
        assert_eq!(
            turn.replies,
            vec![
                ChatMessage::bot(FALLBACK_APOLOGY),
                ChatMessage::bot(COMPANY_SUMMARY)
            ]
        );
        assert_eq!(widget.transcript().len(), before + 3);
        assert_eq!(widget.transcript().messages()[before], turn.user);
    }

    #[test]
    fn quick_action_shows_title_and_answers_trigger() {
        let mut widget = ChatWidget::default();
        widget.open();
        let actions = widget.quick_actions();
        assert_eq!(actions.len(), 3);

        let turn = widget.press(1).expect("expected a turn");
        assert_eq!(turn.user.body, actions[1].title);
        assert_eq!(turn.replies.len(), 1);
        assert!(turn.replies[0].body.contains("Starter"));
    }

    #[test]
    fn out_of_range_quick_action_is_ignored() {
        let mut widget = ChatWidget::default();
        widget.open();
        assert!(widget.press(7).is_none());
    }
}
