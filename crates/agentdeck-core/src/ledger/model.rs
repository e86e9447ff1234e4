//! Usage ledger domain model.
//!
//! The ledger is a monotonic counter pair: a fixed `total` credit budget
//! per billing period and a `used` accumulator debited per bot
//! execution. `remaining` is always derived at read time, never stored,
//! so the two canonical fields cannot drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capacity of the recent-activity log; oldest entries drop on overflow.
pub const RECENT_ACTIVITY_CAP: usize = 50;

/// A point-in-time view of the credit ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    /// Credit budget for the billing period
    pub total: u64,
    /// Credits consumed so far (monotonically increasing)
    pub used: u64,
    /// Derived `total - used`; negative when overdrawn
    pub remaining: i64,
}

impl CreditBalance {
    /// Computes a balance from the canonical stored fields.
    pub fn compute(total: u64, used: u64) -> Self {
        Self {
            total,
            used,
            remaining: total as i64 - used as i64,
        }
    }

    /// Whether more credits were consumed than budgeted.
    pub fn is_overdrawn(&self) -> bool {
        self.remaining < 0
    }
}

/// One entry in the recent-activity feed.
///
/// Entries are display-oriented: a kind tag, a timestamp, and a
/// free-form payload the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Kind tag, e.g. "bot_execution" or "bot_created"
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    /// Free-form payload for display
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl Activity {
    /// Creates an activity entry stamped now.
    pub fn new(kind: impl Into<String>, detail: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            timestamp: Utc::now(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_is_derived() {
        let balance = CreditBalance::compute(2_592_000, 810);
        assert_eq!(balance.remaining, 2_591_190);
        assert!(!balance.is_overdrawn());
    }

    #[test]
    fn test_overdraft_goes_negative() {
        let balance = CreditBalance::compute(100, 250);
        assert_eq!(balance.remaining, -150);
        assert!(balance.is_overdrawn());
    }
}
