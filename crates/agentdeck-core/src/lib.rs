//! Core domain layer for Agentdeck.
//!
//! This crate holds the pure domain models and the traits the rest of
//! the workspace implements: the bot registry, chat sessions, the usage
//! ledger, user preferences, and the pluggable response generator. It
//! performs no I/O; persistence lives in `agentdeck-infrastructure` and
//! orchestration in `agentdeck-application`.

pub mod bot;
pub mod error;
pub mod ledger;
pub mod prefs;
pub mod responder;
pub mod session;

// Re-export common error type
pub use error::{DeckError, Result};
