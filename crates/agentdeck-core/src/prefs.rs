//! User preference and sign-in flags.
//!
//! The workbench keeps a handful of scalar flags per installation:
//! sign-in state, color scheme, and which side of the product the user
//! is on. There is no real authentication behind the flag.

use serde::{Deserialize, Serialize};

/// Which side of the product the user is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMode {
    /// Consuming agents built by others
    User,
    /// Building and managing agents
    Creator,
}

impl Default for UserMode {
    fn default() -> Self {
        UserMode::User
    }
}

/// Per-installation preference and sign-in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserPrefs {
    /// Email captured at sign-in, if any
    #[serde(default)]
    pub email: Option<String>,
    /// Sign-in flag; toggled by sign-in/out, nothing more
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub mode: UserMode,
}

impl UserPrefs {
    /// Marks the user signed in with the given email.
    pub fn sign_in(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
        self.authenticated = true;
    }

    /// Clears the sign-in flag, keeping preferences intact.
    pub fn sign_out(&mut self) {
        self.authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPrefs::default();
        assert!(!prefs.authenticated);
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.mode, UserMode::User);
        assert!(prefs.email.is_none());
    }

    #[test]
    fn test_sign_out_keeps_preferences() {
        let mut prefs = UserPrefs::default();
        prefs.sign_in("ada@example.com");
        prefs.dark_mode = true;
        prefs.sign_out();

        assert!(!prefs.authenticated);
        assert!(prefs.dark_mode);
        assert_eq!(prefs.email.as_deref(), Some("ada@example.com"));
    }
}
