use crate::error::{CtxChatError, Result};
use crate::models::{Message, Role};

/// Ordered message history for one conversation.
///
/// Owned by a single session and mutated by one caller at a time. Entries
/// keep their append order; nothing is reordered or dropped except through
/// [`ConversationHistory::reset`] and [`ConversationHistory::trim`].
#[derive(Clone, Debug, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end of the history.
    ///
    /// Rejects empty or whitespace-only content; the endpoint answers such
    /// messages with useless completions, so we fail early instead.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CtxChatError::EmptyInput);
        }
        self.messages.push(Message::new(role, content));
        Ok(())
    }

    /// The full ordered sequence, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// Clear everything, starting a fresh conversation.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Insert a system message at the front unless one already leads the
    /// history. Never duplicates.
    pub fn ensure_system_prompt(&mut self, content: impl Into<String>) {
        if self.messages.first().map(|m| m.role) == Some(Role::System) {
            return;
        }
        self.messages.insert(0, Message::new(Role::System, content));
    }

    /// Keep system messages plus the last `max_pairs` user/assistant
    /// exchanges, preserving relative order.
    pub fn trim(&mut self, max_pairs: usize) {
        let mut system_messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .cloned()
            .collect();

        let conversation_messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect();

        // Each exchange is a user message plus an assistant reply.
        let keep_count = max_pairs * 2;
        let trimmed: Vec<Message> = conversation_messages
            .into_iter()
            .rev()
            .take(keep_count)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        self.messages.clear();
        self.messages.append(&mut system_messages);
        self.messages.extend(trimmed);
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl From<Vec<Message>> for ConversationHistory {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
