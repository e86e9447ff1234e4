//! Infrastructure layer for Agentdeck.
//!
//! JSON-file-backed persistence for the domain layer: the atomic file
//! primitive, the key-value store adapter, repository implementations
//! for bots, sessions, and the usage ledger, the preference service,
//! and configuration loading.

pub mod config;
pub mod json_bot_repository;
pub mod json_ledger_repository;
pub mod json_session_repository;
pub mod paths;
pub mod prefs_service;
pub mod storage;

pub use crate::config::{DEFAULT_CREDITS_TOTAL, DeckConfig};
pub use crate::json_bot_repository::JsonBotRepository;
pub use crate::json_ledger_repository::JsonLedgerRepository;
pub use crate::json_session_repository::JsonSessionRepository;
pub use crate::paths::DeckPaths;
pub use crate::prefs_service::PrefsService;
pub use crate::storage::{AtomicJsonFile, JsonKvStore};
