//! Bot repository trait.
//!
//! Defines the interface for bot persistence operations.

use super::model::Bot;
use crate::error::Result;

/// An abstract repository for managing bot persistence.
///
/// This trait defines the contract for persisting and retrieving bots,
/// decoupling the application's core logic from the specific storage
/// mechanism (e.g., JSON files, database, remote API).
///
/// The stored collection keeps insertion order; `get_all` must return
/// bots in that order so listings are stable across reloads.
#[async_trait::async_trait]
pub trait BotRepository: Send + Sync {
    /// Retrieves all bots from storage, in insertion order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Bot>)`: All stored bots
    /// - `Err(DeckError)`: Error if retrieval fails
    async fn get_all(&self) -> Result<Vec<Bot>>;

    /// Saves all bots to storage, replacing existing ones.
    ///
    /// # Arguments
    ///
    /// * `bots` - The bots to save
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Bots saved successfully
    /// - `Err(DeckError)`: Error if save fails
    async fn save_all(&self, bots: &[Bot]) -> Result<()>;
}
