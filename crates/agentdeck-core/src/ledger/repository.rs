//! Usage ledger repository trait.

use super::model::{Activity, CreditBalance};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the credit ledger and activity feed.
///
/// Amounts are unsigned by construction; a negative debit cannot be
/// expressed at this boundary. Implementations must keep `used`
/// monotonic and must never persist the derived `remaining` value.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Returns the current balance, computed fresh from the stored
    /// `total`/`used` pair.
    async fn balance(&self) -> Result<CreditBalance>;

    /// Increases the `used` accumulator by `amount` and returns the
    /// resulting balance. Overdraft is permitted; `remaining` simply
    /// goes negative.
    async fn debit(&self, amount: u64) -> Result<CreditBalance>;

    /// Pushes an entry onto the recent-activity feed, dropping the
    /// oldest entry once the feed holds
    /// [`RECENT_ACTIVITY_CAP`](super::model::RECENT_ACTIVITY_CAP) items.
    async fn record_activity(&self, activity: Activity) -> Result<()>;

    /// Returns the activity feed, newest first.
    async fn recent_activities(&self) -> Result<Vec<Activity>>;
}
