//! Chat session use cases.
//!
//! `SessionService` coordinates the session repository and the bot
//! registry to keep the multi-chat invariants: there is always an
//! active session once any session has existed, the session list reads
//! most-recent-first, and agent membership stays duplicate-free with a
//! valid selection.

use agentdeck_core::bot::{Bot, BotRepository};
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::session::{Message, Session, SessionRepository};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Use case layer for chat sessions.
///
/// # Thread Safety
///
/// Mutating operations run under an internal mutex so two callers
/// cannot interleave a read-modify-write on the same session, and the
/// "at least one session" invariant cannot be violated by a concurrent
/// delete.
pub struct SessionService {
    /// Repository for session data persistence
    session_repository: Arc<dyn SessionRepository>,
    /// Repository for bots (membership resolution and first-run seeding)
    bot_repository: Arc<dyn BotRepository>,
    /// Serializes session mutations
    write_lock: Mutex<()>,
}

impl SessionService {
    /// Creates a new `SessionService`.
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        bot_repository: Arc<dyn BotRepository>,
    ) -> Self {
        Self {
            session_repository,
            bot_repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a new session, optionally seeded with one agent, and
    /// makes it the active session.
    pub async fn create_session(&self, initial_agent_id: Option<String>) -> Result<Session> {
        let _guard = self.write_lock.lock().await;
        let session = Session::create(initial_agent_id);
        self.session_repository.save(&session).await?;
        self.session_repository
            .set_active_session_id(&session.id)
            .await?;
        Ok(session)
    }

    /// Lists all sessions, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Session>> {
        self.session_repository.list_all().await
    }

    /// Returns the active session, establishing one if needed.
    ///
    /// Resolution order: the stored active pointer; else the most
    /// recently updated session; else a brand-new session seeded with
    /// the first available bot (the first-run path).
    pub async fn active_session(&self) -> Result<Session> {
        let _guard = self.write_lock.lock().await;
        self.ensure_active_session().await
    }

    /// Makes `session_id` the active session.
    ///
    /// Switching to an id that does not exist is a silent no-op;
    /// `None` tells the caller nothing changed.
    pub async fn switch_active(&self, session_id: &str) -> Result<Option<Session>> {
        match self.session_repository.find_by_id(session_id).await? {
            Some(session) => {
                self.session_repository
                    .set_active_session_id(session_id)
                    .await?;
                Ok(Some(session))
            }
            None => {
                tracing::debug!("ignoring switch to unknown session '{}'", session_id);
                Ok(None)
            }
        }
    }

    /// Appends a message to a session's log.
    ///
    /// The first user message also names a session that still carries
    /// the default title. Returns the updated session, or `None` when
    /// the id does not exist.
    pub async fn append_message(
        &self,
        session_id: &str,
        message: Message,
    ) -> Result<Option<Session>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        session.push_message(message);
        self.session_repository.save(&session).await?;
        Ok(Some(session))
    }

    /// Renames a session.
    ///
    /// # Errors
    ///
    /// `DeckError::Validation` when the new title is blank.
    pub async fn rename(&self, session_id: &str, new_title: &str) -> Result<Option<Session>> {
        if new_title.trim().is_empty() {
            return Err(DeckError::validation("session title must not be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let Some(mut session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        session.rename(new_title.trim());
        self.session_repository.save(&session).await?;
        Ok(Some(session))
    }

    /// Deletes a session and returns the session that is active
    /// afterwards.
    ///
    /// Deleting the active session activates the most recently updated
    /// survivor; deleting the last session leaves exactly one fresh
    /// session behind, so the registry never reads as empty once any
    /// session has existed.
    pub async fn delete_session(&self, session_id: &str) -> Result<Session> {
        let _guard = self.write_lock.lock().await;
        self.session_repository.delete(session_id).await?;
        self.ensure_active_session().await
    }

    /// Adds an agent to a session's membership list.
    ///
    /// A duplicate add leaves the session untouched. Returns the
    /// session, or `None` when the id does not exist.
    pub async fn add_agent(&self, session_id: &str, agent_id: &str) -> Result<Option<Session>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.add_agent(agent_id) {
            self.session_repository.save(&session).await?;
        }
        Ok(Some(session))
    }

    /// Removes an agent from a session's membership list.
    ///
    /// Removing the selected agent falls back to the first remaining
    /// member. Returns the session, or `None` when the id does not
    /// exist.
    pub async fn remove_agent(&self, session_id: &str, agent_id: &str) -> Result<Option<Session>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.remove_agent(agent_id) {
            self.session_repository.save(&session).await?;
        }
        Ok(Some(session))
    }

    /// Selects which member agent replies in a session.
    pub async fn select_agent(&self, session_id: &str, agent_id: &str) -> Result<Option<Session>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.select_agent(agent_id) {
            self.session_repository.save(&session).await?;
        }
        Ok(Some(session))
    }

    /// Resolves a session's agent ids against the bot registry.
    ///
    /// Ids that no longer resolve (the bot was deleted) are dropped
    /// silently; a stale membership entry is routine, never an error.
    pub async fn agents_for(&self, session_id: &str) -> Result<Vec<Bot>> {
        let Some(session) = self.session_repository.find_by_id(session_id).await? else {
            return Ok(Vec::new());
        };

        let bots = self.bot_repository.get_all().await?;
        let mut resolved = Vec::new();
        for agent_id in &session.agent_ids {
            match bots.iter().find(|bot| bot.id == *agent_id) {
                Some(bot) => resolved.push(bot.clone()),
                None => {
                    tracing::debug!(
                        "dropping dangling agent id '{}' from session '{}'",
                        agent_id,
                        session_id
                    );
                }
            }
        }
        Ok(resolved)
    }

    /// Active-session resolution; callers must hold the write lock.
    async fn ensure_active_session(&self) -> Result<Session> {
        if let Some(active_id) = self.session_repository.get_active_session_id().await? {
            if let Some(session) = self.session_repository.find_by_id(&active_id).await? {
                return Ok(session);
            }
            tracing::debug!("active session '{}' no longer exists", active_id);
        }

        // Most recently updated survivor, if any
        if let Some(session) = self.session_repository.list_all().await?.into_iter().next() {
            self.session_repository
                .set_active_session_id(&session.id)
                .await?;
            return Ok(session);
        }

        // First run, or the last session was deleted: seed a fresh one
        let first_bot_id = self
            .bot_repository
            .get_all()
            .await?
            .first()
            .map(|bot| bot.id.clone());
        let session = Session::create(first_bot_id);
        self.session_repository.save(&session).await?;
        self.session_repository
            .set_active_session_id(&session.id)
            .await?;
        Ok(session)
    }
}
