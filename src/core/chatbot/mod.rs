//! Rule-based help-desk chatbot.
//!
//! A static [`knowledge`] base of topics, a keyword [`classifier`] that picks
//! the best topic for some input, and the [`responder`] holding one
//! conversation's state.

pub mod classifier;
pub mod knowledge;
pub mod responder;

pub use classifier::{Classification, MATCH_THRESHOLD, classify, respond, respond_to_action};
pub use knowledge::{ChatResponse, FALLBACK, QuickAction, Topic};
pub use responder::{Chatbot, Message, TypingDelay};
