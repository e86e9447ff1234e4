//! Credit usage use cases.
//!
//! Thin application facade over the ledger repository: the dashboard
//! reads balances and the activity feed through this type, and
//! anything that consumes credits debits through it.

use agentdeck_core::error::Result;
use agentdeck_core::ledger::{Activity, CreditBalance, LedgerRepository};
use std::sync::Arc;

/// Use case layer for the credit ledger and activity feed.
pub struct UsageService {
    ledger: Arc<dyn LedgerRepository>,
}

impl UsageService {
    /// Creates a new `UsageService`.
    pub fn new(ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger }
    }

    /// Returns the current balance, computed fresh from the stored
    /// total/used pair.
    pub async fn balance(&self) -> Result<CreditBalance> {
        self.ledger.balance().await
    }

    /// Debits `amount` credits and returns the resulting balance.
    ///
    /// A zero amount is a no-op by arithmetic; negative amounts cannot
    /// be expressed. Overdraft is permitted and shows up as negative
    /// `remaining`.
    pub async fn debit(&self, amount: u64) -> Result<CreditBalance> {
        self.ledger.debit(amount).await
    }

    /// Records an entry on the recent-activity feed.
    pub async fn record_activity(&self, activity: Activity) -> Result<()> {
        self.ledger.record_activity(activity).await
    }

    /// Returns the activity feed, newest first.
    pub async fn recent_activities(&self) -> Result<Vec<Activity>> {
        self.ledger.recent_activities().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryLedger;
    use serde_json::json;

    #[tokio::test]
    async fn test_monthly_budget_scenario() {
        let service = UsageService::new(Arc::new(InMemoryLedger::new(2_592_000)));

        for _ in 0..3 {
            service.debit(270).await.unwrap();
        }

        let balance = service.balance().await.unwrap();
        assert_eq!(balance.total, 2_592_000);
        assert_eq!(balance.used, 810);
        assert_eq!(balance.remaining, 2_591_190);
    }

    #[tokio::test]
    async fn test_zero_debit_changes_nothing() {
        let service = UsageService::new(Arc::new(InMemoryLedger::new(100)));

        let balance = service.debit(0).await.unwrap();
        assert_eq!(balance.used, 0);
        assert_eq!(balance.remaining, 100);
    }

    #[tokio::test]
    async fn test_activity_feed_reads_back_newest_first() {
        let service = UsageService::new(Arc::new(InMemoryLedger::new(100)));

        service
            .record_activity(Activity::new("bot_created", json!({ "name": "A" })))
            .await
            .unwrap();
        service
            .record_activity(Activity::new("bot_execution", json!({ "name": "A" })))
            .await
            .unwrap();

        let feed = service.recent_activities().await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].kind, "bot_execution");
        assert_eq!(feed[1].kind, "bot_created");
    }
}
