//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving
/// sessions, decoupling the application's core logic from the specific
/// storage mechanism (e.g., JSON files, database, remote API).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Active session tracking
/// - Serializing concurrent writers within the process
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Saves a session to storage, replacing any previous version.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage.
    ///
    /// Deleting a session that does not exist is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions, sorted by `updated_at` descending
    /// (most recently touched first).
    async fn list_all(&self) -> Result<Vec<Session>>;

    /// Gets the ID of the currently active session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session_id))`: Active session ID
    /// - `Ok(None)`: No active session set
    /// - `Err(_)`: Error occurred during retrieval
    async fn get_active_session_id(&self) -> Result<Option<String>>;

    /// Sets the ID of the currently active session.
    async fn set_active_session_id(&self, session_id: &str) -> Result<()>;
}
