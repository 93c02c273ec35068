//! Ordered message log for the active chat.
//!
//! Ids are `len + 1` at append time. Nothing is ever removed from the middle of
//! the log, so ids stay unique and follow append order until the whole log is
//! replaced.

use crate::core_types::{HistoryEntry, Message, Sender};

pub const GREETING: &str = "Hello! I'm your mental health companion. How are you feeling today?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_greeting()
    }
}

impl Transcript {
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// A fresh transcript holding only the assistant's opening line.
    pub fn with_greeting() -> Self {
        Self {
            messages: vec![Message::new(1, Sender::Assistant, GREETING)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn next_id(&self) -> u64 {
        self.messages.len() as u64 + 1
    }

    /// Appends a user turn. Blank input is ignored and yields `None`.
    pub fn append_user_message(&mut self, text: &str) -> Option<&Message> {
        if text.trim().is_empty() {
            return None;
        }

        let message = Message::new(self.next_id(), Sender::User, text);
        self.messages.push(message);
        self.messages.last()
    }

    pub fn append_assistant_message(&mut self, text: &str) -> &Message {
        let message = Message::new(self.next_id(), Sender::Assistant, text);
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Swaps in a previously archived message sequence as-is.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Rebuilds the log from backend history. Server timestamps are not part of
    /// the history payload, so every entry is stamped with the load time.
    pub fn replace_from_history(&mut self, history: &[HistoryEntry]) {
        self.messages = history
            .iter()
            .enumerate()
            .map(|(index, entry)| Message::new(index as u64 + 1, entry.sender(), &entry.content))
            .collect();
    }

    pub fn first_user_message(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_user())
    }
}
