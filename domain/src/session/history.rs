//! Conversation history
//!
//! [`ConversationHistory`] is the ordered, append-only transcript the
//! orchestrator sends to the model on every call. It always starts with
//! the system message it was seeded with; [`reset`](ConversationHistory::reset)
//! is the only operation that removes messages.

use super::entities::{Message, Role};

/// Ordered message sequence owned by a single conversation.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Create a history seeded with a system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
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

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Message::assistant(content));
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.push(Message::system(content));
    }

    /// Copy of the history with one extra message at the end.
    ///
    /// The history itself is left untouched, which is what the judgment
    /// call needs: the synthetic question is sent but never persisted.
    pub fn snapshot_with(&self, extra: Message) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend_from_slice(&self.messages);
        messages.push(extra);
        messages
    }

    /// Content of the most recent user message, scanning backwards.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    /// Drop every message and re-seed with a fresh system prompt.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.messages.clear();
        self.messages.push(Message::system(system_prompt));
    }
}
