//! Bot management use cases.
//!
//! `BotService` owns every mutation of the bot registry: create,
//! patch, delete (with session-membership cleanup), and execute. It
//! coordinates the bot repository, the usage ledger, and the response
//! generator so callers see one operation per user intent.

use agentdeck_core::bot::{
    Bot, BotPatch, BotRepository, ExecutionReceipt, ExecutionStatus, NewBot,
};
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::ledger::{Activity, LedgerRepository};
use agentdeck_core::responder::{ReplyContext, ResponseGenerator};
use agentdeck_core::session::SessionRepository;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Use case layer for the bot registry.
///
/// # Thread Safety
///
/// The registry is persisted as one collection, so every
/// read-modify-write cycle runs under an internal mutex; concurrent
/// callers within the process cannot interleave a stale read with a
/// write.
pub struct BotService {
    /// Repository for the bot collection
    bot_repository: Arc<dyn BotRepository>,
    /// Repository for sessions (membership cleanup on delete)
    session_repository: Arc<dyn SessionRepository>,
    /// Credit ledger debited per execution
    ledger: Arc<dyn LedgerRepository>,
    /// Pluggable reply producer
    responder: Arc<dyn ResponseGenerator>,
    /// Serializes mutations of the bot collection
    write_lock: Mutex<()>,
}

impl BotService {
    /// Creates a new `BotService`.
    pub fn new(
        bot_repository: Arc<dyn BotRepository>,
        session_repository: Arc<dyn SessionRepository>,
        ledger: Arc<dyn LedgerRepository>,
        responder: Arc<dyn ResponseGenerator>,
    ) -> Self {
        Self {
            bot_repository,
            session_repository,
            ledger,
            responder,
            write_lock: Mutex::new(()),
        }
    }

    /// Lists all bots in insertion order.
    pub async fn list(&self) -> Result<Vec<Bot>> {
        self.bot_repository.get_all().await
    }

    /// Lists the bots matching `filter`, keeping insertion order.
    pub async fn list_filtered<F>(&self, filter: F) -> Result<Vec<Bot>>
    where
        F: Fn(&Bot) -> bool,
    {
        let mut bots = self.bot_repository.get_all().await?;
        bots.retain(|bot| filter(bot));
        Ok(bots)
    }

    /// Counts the bots matching `filter`.
    pub async fn count<F>(&self, filter: F) -> Result<usize>
    where
        F: Fn(&Bot) -> bool,
    {
        let bots = self.bot_repository.get_all().await?;
        Ok(bots.iter().filter(|bot| filter(bot)).count())
    }

    /// Looks up one bot. A missing id is routine, not an error.
    pub async fn get(&self, bot_id: &str) -> Result<Option<Bot>> {
        let bots = self.bot_repository.get_all().await?;
        Ok(bots.into_iter().find(|bot| bot.id == bot_id))
    }

    /// Creates a bot from the request, filling defaults, and persists it.
    ///
    /// # Errors
    ///
    /// `DeckError::Validation` when the name is blank; nothing reaches
    /// persistence in that case.
    pub async fn add(&self, new: NewBot) -> Result<Bot> {
        if new.name.trim().is_empty() {
            return Err(DeckError::validation("bot name must not be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let mut bots = self.bot_repository.get_all().await?;
        let bot = Bot::create(new);
        bots.push(bot.clone());
        self.bot_repository.save_all(&bots).await?;
        Ok(bot)
    }

    /// Merges `patch` onto the bot and persists the collection.
    ///
    /// Returns `None` when the id does not exist.
    pub async fn update(&self, bot_id: &str, patch: BotPatch) -> Result<Option<Bot>> {
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(DeckError::validation("bot name must not be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let mut bots = self.bot_repository.get_all().await?;
        let Some(bot) = bots.iter_mut().find(|bot| bot.id == bot_id) else {
            return Ok(None);
        };

        bot.apply_patch(patch);
        let updated = bot.clone();
        self.bot_repository.save_all(&bots).await?;
        Ok(Some(updated))
    }

    /// Deletes a bot, reporting whether it existed.
    ///
    /// The id is also stripped from every session's membership list so
    /// listings stop showing a participant that no longer exists.
    /// Readers tolerate dangling ids regardless; the cleanup keeps the
    /// stored state tidy rather than correct.
    pub async fn remove(&self, bot_id: &str) -> Result<bool> {
        let removed = {
            let _guard = self.write_lock.lock().await;
            let mut bots = self.bot_repository.get_all().await?;
            let before = bots.len();
            bots.retain(|bot| bot.id != bot_id);
            if bots.len() == before {
                return Ok(false);
            }
            self.bot_repository.save_all(&bots).await?;
            true
        };

        for mut session in self.session_repository.list_all().await? {
            if session.remove_agent(bot_id) {
                self.session_repository.save(&session).await?;
            }
        }

        Ok(removed)
    }

    /// Runs a bot against one input.
    ///
    /// Bumps the bot's execution bookkeeping, debits the ledger by its
    /// cost estimate, records an activity entry, and returns a receipt
    /// carrying the generated reply. The debit and the count update
    /// happen even when reply generation fails; the run consumed
    /// capacity either way, and the receipt reports `Failed`.
    ///
    /// # Errors
    ///
    /// `DeckError::NotFound` when the bot does not exist.
    pub async fn execute(&self, bot_id: &str, input: &str) -> Result<ExecutionReceipt> {
        let executed_at = Utc::now();

        let bot = {
            let _guard = self.write_lock.lock().await;
            let mut bots = self.bot_repository.get_all().await?;
            let bot = bots
                .iter_mut()
                .find(|bot| bot.id == bot_id)
                .ok_or_else(|| DeckError::not_found("bot", bot_id))?;
            bot.mark_executed(executed_at);
            let snapshot = bot.clone();
            self.bot_repository.save_all(&bots).await?;
            snapshot
        };

        let tpu_used = bot.average_tpu_consumption;
        self.ledger.debit(tpu_used).await?;

        let context = ReplyContext {
            bot_kind: bot.kind,
            history: Vec::new(),
        };
        let (status, result) = match self.responder.generate(input, &context).await {
            Ok(reply) => (ExecutionStatus::Completed, reply.text),
            Err(e) => {
                tracing::warn!("reply generation failed for bot '{}': {}", bot.id, e);
                (ExecutionStatus::Failed, e.to_string())
            }
        };

        self.ledger
            .record_activity(Activity::new(
                "bot_execution",
                json!({
                    "bot_id": bot.id.clone(),
                    "bot_name": bot.name.clone(),
                    "tpu_used": tpu_used,
                    "status": status,
                }),
            ))
            .await?;

        Ok(ExecutionReceipt {
            id: Uuid::new_v4().to_string(),
            bot_id: bot.id,
            status,
            tpu_used,
            timestamp: executed_at,
            result,
        })
    }
}
