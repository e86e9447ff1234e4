//! Preference service implementation.
//!
//! This module provides a service for the per-installation scalar
//! state: sign-in flag, email, color scheme, and user mode. Values are
//! persisted under the `prefs` key of the key-value store and cached to
//! avoid repeated file I/O.

use crate::storage::JsonKvStore;
use agentdeck_core::error::{DeckError, Result};
use agentdeck_core::prefs::{UserMode, UserPrefs};
use std::sync::{Arc, RwLock};

const PREFS_KEY: &str = "prefs";

/// Service for reading and mutating user preferences.
///
/// # Example
///
/// ```ignore
/// let service = PrefsService::new(store);
/// service.sign_in("ada@example.com")?;
/// assert!(service.prefs().authenticated);
/// ```
#[derive(Clone)]
pub struct PrefsService {
    store: Arc<JsonKvStore>,
    /// Cached prefs loaded from storage.
    /// Uses RwLock for thread-safe lazy loading.
    cache: Arc<RwLock<Option<UserPrefs>>>,
}

impl PrefsService {
    /// Creates a new PrefsService over the given store.
    pub fn new(store: Arc<JsonKvStore>) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the current preferences, loading them on first access.
    pub fn prefs(&self) -> UserPrefs {
        {
            let read_lock = self.cache.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.store.get(PREFS_KEY, UserPrefs::default());

        {
            let mut write_lock = self.cache.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Marks the user signed in with the given email.
    pub fn sign_in(&self, email: impl Into<String>) -> Result<()> {
        let mut prefs = self.prefs();
        prefs.sign_in(email);
        self.save(prefs)
    }

    /// Clears the sign-in flag.
    pub fn sign_out(&self) -> Result<()> {
        let mut prefs = self.prefs();
        prefs.sign_out();
        self.save(prefs)
    }

    /// Sets the color scheme flag.
    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<()> {
        let mut prefs = self.prefs();
        prefs.dark_mode = dark_mode;
        self.save(prefs)
    }

    /// Switches between the user and creator sides of the product.
    pub fn set_user_mode(&self, mode: UserMode) -> Result<()> {
        let mut prefs = self.prefs();
        prefs.mode = mode;
        self.save(prefs)
    }

    /// Persists prefs and refreshes the cache.
    fn save(&self, prefs: UserPrefs) -> Result<()> {
        if !self.store.set(PREFS_KEY, &prefs) {
            return Err(DeckError::storage("failed to persist preferences"));
        }

        let mut write_lock = self.cache.write().unwrap();
        *write_lock = Some(prefs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> PrefsService {
        PrefsService::new(Arc::new(JsonKvStore::new(temp_dir.path())))
    }

    #[test]
    fn test_defaults_before_any_write() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = service(&temp_dir).prefs();

        assert!(!prefs.authenticated);
        assert_eq!(prefs.mode, UserMode::User);
    }

    #[test]
    fn test_sign_in_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(JsonKvStore::new(temp_dir.path()));

        let service = PrefsService::new(store.clone());
        service.sign_in("ada@example.com").unwrap();
        service.set_dark_mode(true).unwrap();

        // A fresh service over the same store sees the persisted state
        let reloaded = PrefsService::new(store).prefs();
        assert!(reloaded.authenticated);
        assert!(reloaded.dark_mode);
        assert_eq!(reloaded.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_sign_out_keeps_other_prefs() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        service.sign_in("ada@example.com").unwrap();
        service.set_user_mode(UserMode::Creator).unwrap();
        service.sign_out().unwrap();

        let prefs = service.prefs();
        assert!(!prefs.authenticated);
        assert_eq!(prefs.mode, UserMode::Creator);
    }
}
