//! JSON-directory-based SessionRepository implementation.

use crate::paths::DeckPaths;
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::session::{Session, SessionRepository};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-per-session repository.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── <session-id-1>.json
/// ├── <session-id-2>.json
/// └── active_session
/// ```
///
/// Session ids are UUIDs minted by the domain layer, so they are used
/// directly as file names. Saves go through a tmp file + rename so a
/// crash mid-write never leaves a truncated session on disk.
pub struct JsonSessionRepository {
    base_dir: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository at the default location
    /// (`~/.config/agentdeck/sessions/`).
    pub async fn default_location() -> Result<Self> {
        let base_dir =
            DeckPaths::sessions_dir().map_err(|e| DeckError::config(e.to_string()))?;
        Self::new(base_dir).await
    }

    /// Creates a new repository rooted at `base_dir`, creating the
    /// directory if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    /// Returns the directory session files are stored in.
    pub fn sessions_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", session_id))
    }

    fn active_marker_path(&self) -> PathBuf {
        self.base_dir.join("active_session")
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let path = self.session_path(session_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let path = self.session_path(&session.id);
        let content = serde_json::to_string_pretty(session)?;

        // tmp + rename keeps the previous version intact on failure
        let tmp_path = self.base_dir.join(format!(".{}.json.tmp", session.id));
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // Skip in-flight tmp files
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'))
            {
                continue;
            }

            match fs::read_to_string(&path).await {
                Ok(content) => match serde_json::from_str::<Session>(&content) {
                    Ok(session) => sessions.push(session),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable session file {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read session file {:?}: {}", path, e);
                }
            }
        }

        // Sort by updated_at descending (most recent first)
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(sessions)
    }

    async fn get_active_session_id(&self) -> Result<Option<String>> {
        let marker = self.active_marker_path();

        if !fs::try_exists(&marker).await? {
            return Ok(None);
        }

        let session_id = fs::read_to_string(&marker).await?;
        Ok(Some(session_id.trim().to_string()))
    }

    async fn set_active_session_id(&self, session_id: &str) -> Result<()> {
        fs::write(self.active_marker_path(), session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdeck_core::session::Message;
    use tempfile::TempDir;

    fn create_test_session(agent_id: &str) -> Session {
        let mut session = Session::create(Some(agent_id.to_string()));
        session.push_message(Message::user("Hello"));
        session.push_message(Message::agent("Hi there!"));
        session
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        let session = create_test_session("bot-1");
        repository.save(&session).await.unwrap();

        let loaded = repository.find_by_id(&session.id).await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        let result = repository.find_by_id("nonexistent-session").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_updated_at_desc() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        let oldest = Session::create(None);
        let mut middle = Session::create(None);
        let mut newest = Session::create(None);

        middle.push_message(Message::user("second"));
        newest.push_message(Message::user("third"));
        newest.push_message(Message::user("fourth"));

        repository.save(&newest).await.unwrap();
        repository.save(&oldest).await.unwrap();
        repository.save(&middle).await.unwrap();

        let sessions = repository.list_all().await.unwrap();
        assert_eq!(sessions.len(), 3);
        assert!(sessions[0].updated_at >= sessions[1].updated_at);
        assert!(sessions[1].updated_at >= sessions[2].updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        let session = create_test_session("bot-1");
        repository.save(&session).await.unwrap();

        repository.delete(&session.id).await.unwrap();
        assert!(repository.find_by_id(&session.id).await.unwrap().is_none());

        // Second delete of the same id is not an error
        repository.delete(&session.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_active_session_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        assert_eq!(repository.get_active_session_id().await.unwrap(), None);

        repository.set_active_session_id("session-42").await.unwrap();
        assert_eq!(
            repository.get_active_session_id().await.unwrap(),
            Some("session-42".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_all_skips_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).await.unwrap();

        repository.save(&create_test_session("bot-1")).await.unwrap();
        std::fs::write(temp_dir.path().join("garbage.json"), b"{broken").unwrap();

        let sessions = repository.list_all().await.unwrap();
        assert_eq!(sessions.len(), 1);
    }
}
