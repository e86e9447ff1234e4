//! Response generator interface.
//!
//! The workbench treats reply generation as a pluggable collaborator: a
//! single async method from user text plus conversation context to a
//! reply. The default scripted implementation lives outside this
//! workspace; swapping in a real inference backend must not touch the
//! session or registry code.

use crate::bot::BotKind;
use crate::error::Result;
use crate::session::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Context handed to the generator alongside the user's text.
#[derive(Debug, Clone)]
pub struct ReplyContext {
    /// Functional category of the bot that is replying
    pub bot_kind: BotKind,
    /// Conversation so far, oldest first
    pub history: Vec<Message>,
}

/// A structured action a reply may carry besides its text
/// (e.g. "open the pricing page").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyAction {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A generated reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReply {
    pub text: String,
    #[serde(default)]
    pub actions: Vec<ReplyAction>,
}

impl GeneratedReply {
    /// A plain text reply with no actions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }
}

/// Produces a reply for a user message.
///
/// A single resolution per call: no retries, no cancellation. Callers
/// treat the latency as opaque.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, user_text: &str, context: &ReplyContext) -> Result<GeneratedReply>;
}
