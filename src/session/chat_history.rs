use serde::{Deserialize, Serialize};

/// One question and the answer shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub query: String,
    pub response: String,
}

/// Ordered, append-only conversation history.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, query: impl Into<String>, response: impl Into<String>) {
        self.turns.push(ChatTurn {
            query: query.into(),
            response: response.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Turns paired with their 1-based display position.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &ChatTurn)> {
        self.turns.iter().enumerate().map(|(i, turn)| (i + 1, turn))
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
