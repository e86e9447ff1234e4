//! JSON-file-based BotRepository implementation.

use crate::paths::DeckPaths;
use crate::storage::AtomicJsonFile;
use agentdeck_core::bot::{Bot, BotRepository};
use agentdeck_core::error::Result;
use std::path::Path;

/// A repository implementation storing the bot collection in one JSON
/// file (`bots.json`) under the store directory.
///
/// The whole collection is loaded and rewritten on each save; the array
/// keeps insertion order, which is the stable listing order callers
/// rely on. Read-modify-write sequences over the collection are
/// serialized by the application layer; this type only guarantees that
/// each individual save lands atomically.
pub struct JsonBotRepository {
    file: AtomicJsonFile<Vec<Bot>>,
}

impl JsonBotRepository {
    /// Creates a repository storing `bots.json` under the given directory.
    pub fn new(store_dir: impl AsRef<Path>) -> Self {
        Self {
            file: AtomicJsonFile::new(store_dir.as_ref().join("bots.json")),
        }
    }

    /// Creates a repository at the default store location
    /// (`~/.config/agentdeck/store/`).
    pub fn default_location() -> Result<Self> {
        let store_dir = DeckPaths::store_dir()
            .map_err(|e| agentdeck_core::DeckError::config(e.to_string()))?;
        Ok(Self::new(store_dir))
    }
}

#[async_trait::async_trait]
impl BotRepository for JsonBotRepository {
    async fn get_all(&self) -> Result<Vec<Bot>> {
        let bots = self.file.load()?.unwrap_or_default();
        Ok(bots)
    }

    async fn save_all(&self, bots: &[Bot]) -> Result<()> {
        self.file.save(&bots.to_vec())?;
        Ok(())
    }
}
