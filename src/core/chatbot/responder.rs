//! Conversation state of one chatbot widget.
//!
//! The widget is either closed or open. While a reply is being "typed" every
//! new submission is ignored; nothing is queued. Replies land after a short
//! randomized delay on a spawned task, and closing the widget does not cancel
//! them: a reply that arrives while closed counts as unread.

use super::classifier::{respond, respond_to_action};
use super::knowledge::{ChatResponse, QuickAction, Topic};
use crate::config::ChatbotConfig;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// `msg-<unix millis>-<random>`
    pub id: String,
    /// Message body
    pub text: String,
    /// Written by the bot rather than the user
    pub is_bot: bool,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: impl Into<String>, is_bot: bool) -> Self {
        let timestamp = Utc::now();
        Self {
            id: message_id(timestamp),
            text: text.into(),
            is_bot,
            timestamp,
        }
    }
}

fn message_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("msg-{}-{suffix}", at.timestamp_millis())
}

/// Simulated typing time: a fixed base plus uniform jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    base: Duration,
    jitter: Duration,
}

impl TypingDelay {
    /// Delay of `base + uniform[0, jitter)`
    #[must_use]
    pub const fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// Draws one delay
    #[must_use]
    pub fn sample(&self) -> Duration {
        // Configured values are milliseconds well inside u64.
        #[allow(clippy::cast_possible_truncation)]
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
    }
}

impl From<&ChatbotConfig> for TypingDelay {
    fn from(config: &ChatbotConfig) -> Self {
        Self::new(config.base_delay(), config.jitter())
    }
}

#[derive(Debug, Default)]
struct ChatState {
    is_open: bool,
    transcript: Vec<Message>,
    is_typing: bool,
    unread: usize,
    quick_actions: &'static [QuickAction],
    show_quick_actions: bool,
    scroll_requested: bool,
}

impl ChatState {
    fn push_user(&mut self, text: &str) {
        self.transcript.push(Message::new(text, false));
        self.scroll_requested = true;
    }

    fn push_bot(&mut self, response: &ChatResponse) {
        self.transcript.push(Message::new(response.message, true));
        self.quick_actions = response.quick_actions;
        self.show_quick_actions = !response.quick_actions.is_empty();
        if !self.is_open {
            self.unread += 1;
        }
        self.scroll_requested = true;
    }
}

/// One user's chatbot session. Clones share the same conversation.
#[derive(Debug, Clone)]
pub struct Chatbot {
    state: Arc<Mutex<ChatState>>,
    delay: TypingDelay,
}

impl Chatbot {
    /// Closed widget with an empty transcript
    #[must_use]
    pub fn new(delay: TypingDelay) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChatState::default())),
            delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the widget, greeting on first open and clearing the unread count.
    pub fn open(&self) {
        let mut state = self.lock();
        state.is_open = true;
        state.unread = 0;
        if state.transcript.is_empty() {
            state.push_bot(Topic::Greetings.response());
        }
        state.scroll_requested = true;
    }

    /// Closes the widget. Pending replies still arrive.
    pub fn close(&self) {
        self.lock().is_open = false;
    }

    /// Opens a closed widget or closes an open one.
    pub fn toggle(&self) {
        let is_open = self.lock().is_open;
        if is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Sends typed text. Returns the handle of the pending reply, or `None`
    /// when the text is blank or a reply is already being typed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit_text(&self, text: &str) -> Option<JoinHandle<()>> {
        let text = text.trim();
        {
            let mut state = self.lock();
            if text.is_empty() || state.is_typing {
                return None;
            }
            state.push_user(text);
            state.show_quick_actions = false;
            state.is_typing = true;
        }
        Some(self.reply_later(respond(text)))
    }

    /// Picks a quick action. The transcript shows `label`; the reply is
    /// chosen from `action_id`. Returns `None` while a reply is being typed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit_quick_action(&self, action_id: &str, label: &str) -> Option<JoinHandle<()>> {
        {
            let mut state = self.lock();
            if state.is_typing {
                return None;
            }
            state.push_user(label);
            state.is_typing = true;
        }
        Some(self.reply_later(respond_to_action(action_id)))
    }

    fn reply_later(&self, response: &'static ChatResponse) -> JoinHandle<()> {
        let delay = self.delay.sample();
        let state = Arc::clone(&self.state);
        debug!("Chatbot replying in {}ms", delay.as_millis());

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.is_typing = false;
            state.push_bot(response);
        })
    }

    /// Whether the widget is open
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    /// Whether a reply is pending
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.lock().is_typing
    }

    /// Bot messages received while closed
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock().unread
    }

    /// Copy of the whole conversation
    #[must_use]
    pub fn transcript(&self) -> Vec<Message> {
        self.lock().transcript.clone()
    }

    /// Latest bot message, if any
    #[must_use]
    pub fn last_reply(&self) -> Option<Message> {
        self.lock().transcript.iter().rev().find(|m| m.is_bot).cloned()
    }

    /// Quick actions currently offered; empty while they are hidden
    #[must_use]
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        let state = self.lock();
        if state.show_quick_actions {
            state.quick_actions
        } else {
            &[]
        }
    }

    /// Returns and clears the "scroll to latest" signal
    pub fn take_scroll_request(&self) -> bool {
        std::mem::take(&mut self.lock().scroll_requested)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::chatbot::knowledge::FALLBACK;

    fn instant() -> Chatbot {
        Chatbot::new(TypingDelay::new(Duration::ZERO, Duration::ZERO))
    }

    fn slow() -> Chatbot {
        Chatbot::new(TypingDelay::new(Duration::from_millis(50), Duration::ZERO))
    }

    #[test]
    fn test_first_open_greets_once() {
        let bot = instant();
        assert!(!bot.is_open());
        assert!(bot.transcript().is_empty());

        bot.open();
        bot.close();
        bot.open();

        let transcript = bot.transcript();
        assert_eq!(transcript.len(), 1);
        assert!(transcript[0].is_bot);
        assert_eq!(transcript[0].text, Topic::Greetings.response().message);
        assert_eq!(bot.quick_actions(), Topic::Greetings.response().quick_actions);
        assert!(bot.take_scroll_request());
        assert!(!bot.take_scroll_request());
    }

    #[test]
    fn test_toggle() {
        let bot = instant();
        bot.toggle();
        assert!(bot.is_open());
        bot.toggle();
        assert!(!bot.is_open());
    }

    #[test]
    fn test_message_ids() {
        let message = Message::new("hi", false);
        let parts: Vec<&str> = message.id.splitn(3, '-').collect();
        assert_eq!(parts[0], "msg");
        assert_eq!(parts[1], message.timestamp.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(message.id, Message::new("hi", false).id);
    }

    #[test]
    fn test_typing_delay_bounds() {
        let delay = TypingDelay::new(Duration::from_millis(800), Duration::from_millis(400));
        for _ in 0..100 {
            let sampled = delay.sample();
            assert!(sampled >= Duration::from_millis(800));
            assert!(sampled < Duration::from_millis(1200));
        }
        let fixed = TypingDelay::from(&ChatbotConfig {
            typing_delay_ms: 5,
            typing_jitter_ms: 0,
        });
        assert_eq!(fixed.sample(), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_text_round_trip() {
        let bot = instant();
        bot.open();

        bot.submit_text("  How do I pay  ").unwrap().await.unwrap();

        let transcript = bot.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].text, "How do I pay");
        assert!(!transcript[1].is_bot);
        assert_eq!(transcript[2].text, Topic::Payments.response().message);
        assert!(!bot.is_typing());
        assert_eq!(bot.quick_actions(), Topic::Payments.response().quick_actions);
    }

    #[tokio::test]
    async fn test_blank_text_is_ignored() {
        let bot = instant();
        bot.open();
        assert!(bot.submit_text("   ").is_none());
        assert_eq!(bot.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_quick_action_echoes_label_and_answers_by_id() {
        let bot = instant();
        bot.open();

        bot.submit_quick_action("fees", "Permit Fees").unwrap().await.unwrap();

        let transcript = bot.transcript();
        assert_eq!(transcript[1].text, "Permit Fees");
        assert_eq!(bot.last_reply().unwrap().text, Topic::Fees.response().message);
    }

    #[tokio::test]
    async fn test_unknown_text_gets_fallback() {
        let bot = instant();
        bot.open();
        bot.submit_text("xyzxyz unrelated gibberish")
            .unwrap()
            .await
            .unwrap();
        assert_eq!(bot.last_reply().unwrap().text, FALLBACK.message);
        assert_eq!(bot.quick_actions(), FALLBACK.quick_actions);
    }

    #[tokio::test]
    async fn test_submissions_ignored_while_typing() {
        let bot = slow();
        bot.open();

        let pending = bot.submit_text("hello").unwrap();
        assert!(bot.is_typing());
        assert!(bot.quick_actions().is_empty());
        assert!(bot.submit_text("how do i pay").is_none());
        assert!(bot.submit_quick_action("contact", "Contact Us").is_none());

        pending.await.unwrap();
        assert_eq!(bot.transcript().len(), 3);
        assert!(bot.submit_text("how do i pay").is_some());
    }

    #[tokio::test]
    async fn test_reply_while_closed_counts_as_unread() {
        let bot = slow();
        bot.open();
        let pending = bot.submit_text("where is your office").unwrap();
        bot.close();

        pending.await.unwrap();
        assert_eq!(bot.unread_count(), 1);
        assert_eq!(bot.last_reply().unwrap().text, Topic::Office.response().message);

        bot.open();
        assert_eq!(bot.unread_count(), 0);
        assert_eq!(bot.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_unread_accumulates_until_opened() {
        let bot = slow();
        bot.submit_text("how do i pay").unwrap().await.unwrap();
        bot.submit_quick_action("fees", "Permit Fees")
            .unwrap()
            .await
            .unwrap();
        assert_eq!(bot.unread_count(), 2);

        bot.open();
        assert_eq!(bot.unread_count(), 0);
    }
}
