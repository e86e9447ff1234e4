//! Key-value-store-backed LedgerRepository implementation.

use crate::storage::JsonKvStore;
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::ledger::{Activity, CreditBalance, LedgerRepository, RECENT_ACTIVITY_CAP};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CREDITS_KEY: &str = "credits";
const ACTIVITIES_KEY: &str = "recent_activities";

/// The canonical persisted ledger fields.
///
/// `remaining` is intentionally absent: it is derived at read time so
/// the stored fields cannot drift out of sync with each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CreditsRecord {
    total: u64,
    used: u64,
}

/// Ledger repository over the key-value store.
///
/// Stores the credit pair under `credits` and the capped activity feed
/// under `recent_activities`. The billing-period budget is injected at
/// construction (from configuration) and seeds the record the first
/// time the ledger is touched.
pub struct JsonLedgerRepository {
    store: Arc<JsonKvStore>,
    period_total: u64,
}

impl JsonLedgerRepository {
    /// Creates a ledger over the given store with the configured
    /// billing-period credit total.
    pub fn new(store: Arc<JsonKvStore>, period_total: u64) -> Self {
        Self {
            store,
            period_total,
        }
    }

    fn seed(&self) -> CreditsRecord {
        CreditsRecord {
            total: self.period_total,
            used: 0,
        }
    }
}

#[async_trait]
impl LedgerRepository for JsonLedgerRepository {
    async fn balance(&self) -> Result<CreditBalance> {
        let record = self.store.get(CREDITS_KEY, self.seed());
        Ok(CreditBalance::compute(record.total, record.used))
    }

    async fn debit(&self, amount: u64) -> Result<CreditBalance> {
        let mut balance = CreditBalance::compute(self.period_total, 0);
        let seed = self.seed();

        let written = self.store.update(CREDITS_KEY, seed, |record| {
            record.used = record.used.saturating_add(amount);
            balance = CreditBalance::compute(record.total, record.used);
        });

        if !written {
            return Err(DeckError::storage("failed to persist credit debit"));
        }

        if balance.is_overdrawn() {
            tracing::warn!(
                "credit ledger overdrawn: used {} of {} ({} remaining)",
                balance.used,
                balance.total,
                balance.remaining
            );
        }

        Ok(balance)
    }

    async fn record_activity(&self, activity: Activity) -> Result<()> {
        let written = self
            .store
            .update(ACTIVITIES_KEY, Vec::<Activity>::new(), |feed| {
                feed.insert(0, activity);
                feed.truncate(RECENT_ACTIVITY_CAP);
            });

        if !written {
            return Err(DeckError::storage("failed to persist activity entry"));
        }
        Ok(())
    }

    async fn recent_activities(&self) -> Result<Vec<Activity>> {
        Ok(self.store.get(ACTIVITIES_KEY, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn ledger(temp_dir: &TempDir, total: u64) -> JsonLedgerRepository {
        JsonLedgerRepository::new(Arc::new(JsonKvStore::new(temp_dir.path())), total)
    }

    #[tokio::test]
    async fn test_balance_before_any_debit() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ledger(&temp_dir, 2_592_000);

        let balance = repository.balance().await.unwrap();
        assert_eq!(balance.total, 2_592_000);
        assert_eq!(balance.used, 0);
        assert_eq!(balance.remaining, 2_592_000);
    }

    #[tokio::test]
    async fn test_three_debits_accumulate() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ledger(&temp_dir, 2_592_000);

        for _ in 0..3 {
            repository.debit(270).await.unwrap();
        }

        let balance = repository.balance().await.unwrap();
        assert_eq!(balance.total, 2_592_000);
        assert_eq!(balance.used, 810);
        assert_eq!(balance.remaining, 2_591_190);
    }

    #[tokio::test]
    async fn test_overdraft_is_permitted() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ledger(&temp_dir, 100);

        let balance = repository.debit(250).await.unwrap();
        assert_eq!(balance.remaining, -150);
        assert!(balance.is_overdrawn());
    }

    #[tokio::test]
    async fn test_activity_feed_is_newest_first_and_capped() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ledger(&temp_dir, 1000);

        for i in 0..(RECENT_ACTIVITY_CAP + 5) {
            repository
                .record_activity(Activity::new("bot_execution", json!({ "seq": i })))
                .await
                .unwrap();
        }

        let feed = repository.recent_activities().await.unwrap();
        assert_eq!(feed.len(), RECENT_ACTIVITY_CAP);
        // Newest entry first; the five oldest were dropped
        assert_eq!(feed[0].detail["seq"], json!(RECENT_ACTIVITY_CAP + 4));
        assert_eq!(feed.last().unwrap().detail["seq"], json!(5));
    }
}
