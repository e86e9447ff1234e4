//! In-memory doubles for service tests.
//!
//! These mirror the storage contracts without touching the filesystem
//! so service tests stay fast and deterministic.

use agentdeck_core::bot::{Bot, BotRepository};
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::ledger::{Activity, CreditBalance, LedgerRepository, RECENT_ACTIVITY_CAP};
use agentdeck_core::responder::{GeneratedReply, ReplyContext, ResponseGenerator};
use agentdeck_core::session::{Session, SessionRepository};
use async_trait::async_trait;
use std::sync::Mutex;

/// Bot repository backed by a plain vector.
#[derive(Default)]
pub struct InMemoryBotRepository {
    bots: Mutex<Vec<Bot>>,
}

#[async_trait]
impl BotRepository for InMemoryBotRepository {
    async fn get_all(&self) -> Result<Vec<Bot>> {
        Ok(self.bots.lock().unwrap().clone())
    }

    async fn save_all(&self, bots: &[Bot]) -> Result<()> {
        *self.bots.lock().unwrap() = bots.to_vec();
        Ok(())
    }
}

/// Session repository backed by a vector plus an active-id slot.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
    active_id: Mutex<Option<String>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == session_id)
            .cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.push(session.clone()),
        }
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.sessions.lock().unwrap().retain(|s| s.id != session_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions = self.sessions.lock().unwrap().clone();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn get_active_session_id(&self) -> Result<Option<String>> {
        Ok(self.active_id.lock().unwrap().clone())
    }

    async fn set_active_session_id(&self, session_id: &str) -> Result<()> {
        *self.active_id.lock().unwrap() = Some(session_id.to_string());
        Ok(())
    }
}

/// Ledger keeping the credit pair and activity feed in memory.
pub struct InMemoryLedger {
    total: u64,
    used: Mutex<u64>,
    feed: Mutex<Vec<Activity>>,
}

impl InMemoryLedger {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            used: Mutex::new(0),
            feed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn balance(&self) -> Result<CreditBalance> {
        Ok(CreditBalance::compute(self.total, *self.used.lock().unwrap()))
    }

    async fn debit(&self, amount: u64) -> Result<CreditBalance> {
        let mut used = self.used.lock().unwrap();
        *used = used.saturating_add(amount);
        Ok(CreditBalance::compute(self.total, *used))
    }

    async fn record_activity(&self, activity: Activity) -> Result<()> {
        let mut feed = self.feed.lock().unwrap();
        feed.insert(0, activity);
        feed.truncate(RECENT_ACTIVITY_CAP);
        Ok(())
    }

    async fn recent_activities(&self) -> Result<Vec<Activity>> {
        Ok(self.feed.lock().unwrap().clone())
    }
}

/// Responder with a fixed outcome.
pub struct StaticResponder {
    outcome: std::result::Result<String, String>,
}

impl StaticResponder {
    /// Always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl ResponseGenerator for StaticResponder {
    async fn generate(&self, _user_text: &str, _context: &ReplyContext) -> Result<GeneratedReply> {
        match &self.outcome {
            Ok(text) => Ok(GeneratedReply::text(text.clone())),
            Err(message) => Err(DeckError::internal(message.clone())),
        }
    }
}
