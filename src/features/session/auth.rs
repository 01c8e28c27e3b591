//! Mocked authentication over the settings store. Any non-empty
//! credentials succeed; the interesting part is the identity lifecycle:
//! login persists the user, restore re-reads it on startup, logout clears
//! it. Login derives the username from the email local part; registration
//! takes the username directly. Either way the stored email is
//! synthesized from the username.

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::features::settings::SettingsStore;

/// The logged-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

pub struct SessionManager {
    settings: Arc<SettingsStore>,
}

impl SessionManager {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        SessionManager { settings }
    }

    /// Re-read a previously persisted identity, if any.
    pub async fn restore(&self) -> Option<User> {
        self.settings.user().await
    }

    pub async fn current(&self) -> Option<User> {
        self.settings.user().await
    }

    /// Sign in with email + password. Mock validation only: both fields
    /// must be non-empty, and the username is the email local part.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            anyhow::bail!("validation: please fill in all required fields");
        }
        let username = email
            .trim()
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        if username.is_empty() {
            anyhow::bail!("validation: please fill in all required fields");
        }
        self.complete_login(username).await
    }

    /// Register a new account. Same mock validation plus an explicit
    /// username.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            anyhow::bail!("validation: please fill in all required fields");
        }
        if username.trim().is_empty() {
            anyhow::bail!("validation: please choose a username");
        }
        self.complete_login(username.trim().to_string()).await
    }

    async fn complete_login(&self, username: String) -> Result<User> {
        let user = User {
            email: format!("{}@example.com", username.to_lowercase()),
            username,
        };
        self.settings.set_user(&user).await?;
        info!("User {} logged in", user.username);
        Ok(user)
    }

    /// Clear the persisted identity.
    pub async fn logout(&self) -> Result<()> {
        if let Some(user) = self.settings.user().await {
            info!("User {} logged out", user.username);
        }
        self.settings.clear_user().await
    }
}
