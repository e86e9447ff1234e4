//! Bot domain model.
//!
//! Represents configured AI assistants managed by the workbench.
//! Each bot has a display identity, a cost-per-execution estimate, and
//! execution bookkeeping that feeds the usage ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The functional category a bot belongs to.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BotKind {
    /// Customer-support assistant
    Support,
    /// Sales assistant
    Sales,
    /// Content-writing assistant
    Content,
}

impl Default for BotKind {
    fn default() -> Self {
        BotKind::Support
    }
}

/// Whether a bot is currently available for execution.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BotStatus {
    Active,
    Inactive,
}

impl Default for BotStatus {
    fn default() -> Self {
        BotStatus::Active
    }
}

/// A configured bot (agent) record.
///
/// Bots are created from a [`NewBot`] request, mutated by field patches,
/// and destroyed explicitly. Executing a bot increments `execution_count`
/// and stamps `last_executed`; both are bookkeeping owned by this record,
/// while the credit accounting lives in the usage ledger.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Bot {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Functional category
    #[serde(default)]
    pub kind: BotKind,
    /// Availability status
    #[serde(default)]
    pub status: BotStatus,
    /// Short display token (emoji or initials)
    #[serde(default)]
    pub avatar: String,
    /// Slug derived from the name (lowercased, whitespace stripped)
    #[serde(default)]
    pub domain: String,
    /// Estimated TPU-seconds consumed per execution
    #[serde(default)]
    pub average_tpu_consumption: u64,
    /// Number of completed executions (monotonically non-decreasing)
    #[serde(default)]
    pub execution_count: u64,
    /// Timestamp of the most recent execution, if any
    #[serde(default)]
    pub last_executed: Option<DateTime<Utc>>,
    /// Timestamp when the bot was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the bot was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a bot.
///
/// Fields not present here are filled with defaults at creation time.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct NewBot {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: BotKind,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub average_tpu_consumption: u64,
}

/// A field-wise patch applied to an existing bot.
///
/// `None` fields are left untouched. Execution bookkeeping
/// (`execution_count`, `last_executed`) is deliberately not patchable.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct BotPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<BotKind>,
    pub status: Option<BotStatus>,
    pub avatar: Option<String>,
    pub average_tpu_consumption: Option<u64>,
}

impl Bot {
    /// Creates a bot from a request, filling every defaulted field.
    ///
    /// The id is a fresh UUID; creation-order sorting is served by
    /// `created_at` rather than the id itself.
    pub fn create(new: NewBot) -> Self {
        let now = Utc::now();
        let domain = derive_domain(&new.name);
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            kind: new.kind,
            status: BotStatus::Active,
            avatar: new.avatar,
            domain,
            average_tpu_consumption: new.average_tpu_consumption,
            execution_count: 0,
            last_executed: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch onto this bot and stamps `updated_at`.
    ///
    /// Renaming also re-derives the domain slug.
    pub fn apply_patch(&mut self, patch: BotPatch) {
        if let Some(name) = patch.name {
            self.domain = derive_domain(&name);
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(tpu) = patch.average_tpu_consumption {
            self.average_tpu_consumption = tpu;
        }
        self.updated_at = Utc::now();
    }

    /// Records one completed execution.
    pub fn mark_executed(&mut self, at: DateTime<Utc>) {
        self.execution_count += 1;
        self.last_executed = Some(at);
        self.updated_at = at.max(self.updated_at);
    }
}

/// Derives the domain slug for a bot name: lowercased, whitespace stripped.
pub fn derive_domain(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Terminal state of a bot execution.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Completed,
    Failed,
}

/// Result of a single bot execution.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ExecutionReceipt {
    /// Unique receipt identifier (UUID format)
    pub id: String,
    /// The bot that ran
    pub bot_id: String,
    pub status: ExecutionStatus,
    /// TPU-seconds debited from the ledger for this run
    pub tpu_used: u64,
    pub timestamp: DateTime<Utc>,
    /// Reply text produced by the response generator
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_fills_defaults() {
        let bot = Bot::create(NewBot {
            name: "Support Sam".to_string(),
            average_tpu_consumption: 270,
            ..Default::default()
        });

        assert_eq!(bot.status, BotStatus::Active);
        assert_eq!(bot.execution_count, 0);
        assert!(bot.last_executed.is_none());
        assert_eq!(bot.domain, "supportsam");
        assert!(Uuid::parse_str(&bot.id).is_ok());
    }

    #[test]
    fn test_domain_strips_all_whitespace() {
        assert_eq!(derive_domain("My  Sales\tBot"), "mysalesbot");
        assert_eq!(derive_domain("UPPER"), "upper");
    }

    #[test]
    fn test_apply_patch_merges_and_rederives_domain() {
        let mut bot = Bot::create(NewBot {
            name: "Old Name".to_string(),
            ..Default::default()
        });
        let before = bot.updated_at;

        bot.apply_patch(BotPatch {
            name: Some("New Name".to_string()),
            status: Some(BotStatus::Inactive),
            ..Default::default()
        });

        assert_eq!(bot.name, "New Name");
        assert_eq!(bot.domain, "newname");
        assert_eq!(bot.status, BotStatus::Inactive);
        // untouched fields survive
        assert_eq!(bot.execution_count, 0);
        assert!(bot.updated_at >= before);
    }

    #[test]
    fn test_mark_executed_increments_count() {
        let mut bot = Bot::create(NewBot {
            name: "Runner".to_string(),
            ..Default::default()
        });

        let at = Utc::now();
        bot.mark_executed(at);
        bot.mark_executed(at);

        assert_eq!(bot.execution_count, 2);
        assert_eq!(bot.last_executed, Some(at));
    }
}
