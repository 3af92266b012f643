//! Conversation transcript threaded through agent runs.

use crate::completion::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
    ToolResult,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
            Role::ToolResult => write!(f, "tool"),
        }
    }
}

/// One entry of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }

    fn to_message(&self) -> Message {
        match self.role {
            Role::User => Message::user(self.content.clone()),
            Role::Agent => Message::assistant(self.content.clone()),
            Role::ToolResult => Message::system(format!("Earlier tool result: {}", self.content)),
        }
    }
}

/// Append-only, caller-owned conversation history.
///
/// `Agent::run` takes `&mut Session`, so runs sharing a session are serialised
/// by the borrow checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a turn.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Drop all turns, keeping the session identity.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Record a completed user/agent exchange.
    pub(crate) fn record_exchange(&mut self, user: &str, agent: &str) {
        self.push(Role::User, user);
        self.push(Role::Agent, agent);
    }

    /// The last `limit` turns as context messages.
    pub(crate) fn context_messages(&self, limit: usize) -> Vec<Message> {
        let start = self.turns.len().saturating_sub(limit);
        self.turns[start..].iter().map(Turn::to_message).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
