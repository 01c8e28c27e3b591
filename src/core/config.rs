//! # Configuration
//!
//! Environment-driven application configuration, loaded once at startup.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::features::reminders::DEFAULT_SCAN_INTERVAL;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DATA_DIR: &str = ".lifesync";
const DEFAULT_THEMES_PATH: &str = "themes.yaml";

#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the generative-AI endpoint.
    pub gemini_api_key: String,
    /// Model identifier used for extraction, transcription, and tips.
    pub gemini_model: String,
    /// Default log filter when RUST_LOG is not set.
    pub log_level: String,
    /// Directory holding the settings file.
    pub data_dir: PathBuf,
    /// Theme gallery YAML; the built-in presets apply when the file is
    /// absent.
    pub themes_path: PathBuf,
    /// Period between alarm sweeps.
    pub scan_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key =
            env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let log_level = env::var("LIFESYNC_LOG").unwrap_or_else(|_| "info".to_string());
        let data_dir = env::var("LIFESYNC_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let themes_path = env::var("LIFESYNC_THEMES")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_THEMES_PATH));

        let scan_interval = match env::var("LIFESYNC_SCAN_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("LIFESYNC_SCAN_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    anyhow::bail!("LIFESYNC_SCAN_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_SCAN_INTERVAL,
        };

        Ok(Config {
            gemini_api_key,
            gemini_model,
            log_level,
            data_dir,
            themes_path,
            scan_interval,
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}
