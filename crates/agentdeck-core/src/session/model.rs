//! Session domain model.
//!
//! A session is one independent conversation thread, bound to zero or
//! more agents, holding an ordered message log. The session list shown
//! to the user is always sorted by `updated_at` descending, so every
//! mutation that matters to ordering must refresh that timestamp.

use super::message::{Message, Sender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to sessions before the first user message names them.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// How many characters of the first user message become the title.
pub const TITLE_PREVIEW_CHARS: usize = 30;

/// A conversation thread in the application's domain layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Participating agent ids, insertion order = display order,
    /// duplicates forbidden. Entries may dangle after a bot is deleted;
    /// readers resolve and drop them, they never fail.
    #[serde(default)]
    pub agent_ids: Vec<String>,
    /// The agent currently replying in this session. Always a member of
    /// `agent_ids` (or `None` when the membership list is empty).
    #[serde(default)]
    pub selected_agent_id: Option<String>,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the session was last updated
    pub updated_at: DateTime<Utc>,
    /// Ordered message log, append-only
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Session {
    /// Creates an empty session, optionally seeded with one agent.
    pub fn create(initial_agent_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            agent_ids: initial_agent_id.iter().cloned().collect(),
            selected_agent_id: initial_agent_id,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Whether the title has never been set to anything meaningful.
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_SESSION_TITLE
    }

    /// Appends a message and refreshes `updated_at`.
    ///
    /// While the title is still the default, the first user-sent message
    /// names the session: its text truncated to [`TITLE_PREVIEW_CHARS`]
    /// characters with an ellipsis.
    pub fn push_message(&mut self, message: Message) {
        if self.has_default_title() && message.sender == Sender::User {
            self.title = derive_title(&message.text);
        }
        self.messages.push(message);
        self.touch();
    }

    /// Adds an agent to the membership list.
    ///
    /// Returns `false` without modification when the agent is already a
    /// member; membership is a duplicate-free ordered list. The first
    /// member to join becomes the selected agent.
    pub fn add_agent(&mut self, agent_id: impl Into<String>) -> bool {
        let agent_id = agent_id.into();
        if self.agent_ids.contains(&agent_id) {
            return false;
        }
        if self.selected_agent_id.is_none() {
            self.selected_agent_id = Some(agent_id.clone());
        }
        self.agent_ids.push(agent_id);
        self.touch();
        true
    }

    /// Removes an agent from the membership list.
    ///
    /// Returns `true` when the agent was a member. Removing the
    /// selected agent falls back to the first remaining member, or to
    /// no selection when the list becomes empty.
    pub fn remove_agent(&mut self, agent_id: &str) -> bool {
        let before = self.agent_ids.len();
        self.agent_ids.retain(|id| id != agent_id);
        let removed = self.agent_ids.len() != before;
        if removed {
            if self.selected_agent_id.as_deref() == Some(agent_id) {
                self.selected_agent_id = self.agent_ids.first().cloned();
            }
            self.touch();
        }
        removed
    }

    /// Gives the session an explicit title.
    ///
    /// A renamed session keeps its title: later appends no longer
    /// re-derive it from message text.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Selects which member agent replies in this session.
    ///
    /// Returns `false` when the agent is not a member.
    pub fn select_agent(&mut self, agent_id: &str) -> bool {
        if !self.agent_ids.iter().any(|id| id == agent_id) {
            return false;
        }
        self.selected_agent_id = Some(agent_id.to_string());
        self.touch();
        true
    }

    /// Refreshes `updated_at`, keeping it non-decreasing even if the
    /// wall clock steps backwards.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// Derives a session title from message text.
fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > TITLE_PREVIEW_CHARS {
        let preview: String = trimmed.chars().take(TITLE_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    } else if trimmed.is_empty() {
        DEFAULT_SESSION_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}
