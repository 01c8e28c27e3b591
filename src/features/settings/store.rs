//! # Settings Store
//!
//! JSON-file-backed key-value persistence for the theme mode, background
//! image reference, and logged-in user. `init` loads the file or starts
//! from defaults; every `set_*`/`clear_*` persists immediately. Reads
//! never fail; an absent or unreadable file just means defaults.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::features::session::User;

/// Persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Process-wide settings with an explicit lifecycle, injected into
/// consumers rather than accessed ambiently.
pub struct SettingsStore {
    path: PathBuf,
    state: RwLock<PersistedSettings>,
}

impl SettingsStore {
    /// Load settings from `path`, or start from defaults when the file
    /// is missing or unreadable.
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    debug!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!(
                        "Settings file {} is malformed ({e}), starting from defaults",
                        path.display()
                    );
                    PersistedSettings::default()
                }
            },
            Err(_) => {
                info!("No settings file at {}, using defaults", path.display());
                PersistedSettings::default()
            }
        };

        SettingsStore {
            path,
            state: RwLock::new(state),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn theme(&self) -> Option<ThemeMode> {
        self.state.read().await.theme
    }

    /// Resolve the effective theme: the saved preference, or the system
    /// preference when nothing was saved.
    pub async fn effective_theme(&self, system_prefers_dark: bool) -> ThemeMode {
        match self.theme().await {
            Some(mode) => mode,
            None if system_prefers_dark => ThemeMode::Dark,
            None => ThemeMode::Light,
        }
    }

    pub async fn set_theme(&self, mode: ThemeMode) -> Result<()> {
        let mut state = self.state.write().await;
        state.theme = Some(mode);
        self.persist(&state)
    }

    pub async fn clear_theme(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.theme = None;
        self.persist(&state)
    }

    pub async fn background(&self) -> Option<String> {
        self.state.read().await.background.clone()
    }

    /// Set or clear the background image reference. An empty string
    /// clears, matching the form semantics of the settings dialog.
    pub async fn set_background(&self, reference: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.background = if reference.is_empty() {
            None
        } else {
            Some(reference.to_string())
        };
        self.persist(&state)
    }

    pub async fn clear_background(&self) -> Result<()> {
        self.set_background("").await
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn set_user(&self, user: &User) -> Result<()> {
        let mut state = self.state.write().await;
        state.user = Some(user.clone());
        self.persist(&state)
    }

    pub async fn clear_user(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.user = None;
        self.persist(&state)
    }

    fn persist(&self, state: &PersistedSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create settings directory {}", parent.display())
                })?;
            }
        }
        let contents = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        debug!("Persisted settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("settings.json")
    }

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::init(temp_path(&dir));

        assert_eq!(store.theme().await, None);
        assert_eq!(store.background().await, None);
        assert_eq!(store.user().await, None);
    }

    #[tokio::test]
    async fn test_effective_theme_falls_back_to_system() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::init(temp_path(&dir));

        assert_eq!(store.effective_theme(true).await, ThemeMode::Dark);
        assert_eq!(store.effective_theme(false).await, ThemeMode::Light);

        store.set_theme(ThemeMode::Dark).await.unwrap();
        assert_eq!(store.effective_theme(false).await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir);

        {
            let store = SettingsStore::init(&path);
            store.set_theme(ThemeMode::Dark).await.unwrap();
            store
                .set_background("https://example.com/bg.jpg")
                .await
                .unwrap();
            store
                .set_user(&User {
                    username: "ada".to_string(),
                    email: "ada@example.com".to_string(),
                })
                .await
                .unwrap();
        }

        let reopened = SettingsStore::init(&path);
        assert_eq!(reopened.theme().await, Some(ThemeMode::Dark));
        assert_eq!(
            reopened.background().await.as_deref(),
            Some("https://example.com/bg.jpg")
        );
        assert_eq!(reopened.user().await.unwrap().username, "ada");
    }

    #[tokio::test]
    async fn test_clear_operations() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir);

        let store = SettingsStore::init(&path);
        store.set_theme(ThemeMode::Light).await.unwrap();
        store.set_background("x").await.unwrap();
        store.clear_theme().await.unwrap();
        store.clear_background().await.unwrap();

        let reopened = SettingsStore::init(&path);
        assert_eq!(reopened.theme().await, None);
        assert_eq!(reopened.background().await, None);
    }

    #[tokio::test]
    async fn test_malformed_file_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir);
        std::fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::init(&path);
        assert_eq!(store.theme().await, None);
    }

    #[test]
    fn test_theme_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&ThemeMode::Dark).unwrap(),
            "\"dark\""
        );
        assert_eq!(
            serde_json::from_str::<ThemeMode>("\"light\"").unwrap(),
            ThemeMode::Light
        );
    }
}
