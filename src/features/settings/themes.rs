//! # Theme Gallery
//!
//! YAML-based theme preset catalog with schema validation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use log::info;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::features::settings::store::ThemeMode;

/// Image used when the random picker lands on a preset without one.
const FALLBACK_RANDOM_BACKGROUND: &str =
    "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=80&w=2940&auto=format&fit=crop";

/// One selectable theme: a mode plus an optional background image.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemePreset {
    pub name: String,
    pub mode: ThemeMode,
    /// Background image URL; empty means the default gradient.
    #[serde(default)]
    pub background: String,
}

/// Catalog of presets offered by the settings dialog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeGallery {
    pub presets: Vec<ThemePreset>,
}

impl ThemeGallery {
    /// Load the gallery from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let gallery: ThemeGallery = serde_yaml::from_str(&contents)?;
        gallery.validate()?;
        info!("Loaded {} theme presets from {path}", gallery.presets.len());
        Ok(gallery)
    }

    /// Built-in presets used when no gallery file is configured.
    pub fn builtin() -> Self {
        let presets = vec![
            ("Default Light", ThemeMode::Light, ""),
            ("Default Dark", ThemeMode::Dark, ""),
            (
                "Ocean Breeze",
                ThemeMode::Light,
                "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=2946&auto=format&fit=crop",
            ),
            (
                "Midnight Space",
                ThemeMode::Dark,
                "https://images.unsplash.com/photo-1451187580459-43490279c0fa?q=80&w=2944&auto=format&fit=crop",
            ),
            (
                "Forest Mist",
                ThemeMode::Light,
                "https://images.unsplash.com/photo-1519681393798-3828fb4090bb?q=80&w=2940&auto=format&fit=crop",
            ),
            (
                "Urban Sunset",
                ThemeMode::Dark,
                "https://images.unsplash.com/photo-1493246507139-91e8fad9978e?q=80&w=2940&auto=format&fit=crop",
            ),
        ];

        ThemeGallery {
            presets: presets
                .into_iter()
                .map(|(name, mode, background)| ThemePreset {
                    name: name.to_string(),
                    mode,
                    background: background.to_string(),
                })
                .collect(),
        }
    }

    /// Validate preset names are unique and non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.presets.is_empty() {
            anyhow::bail!("theme gallery has no presets");
        }
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if preset.name.trim().is_empty() {
                anyhow::bail!("theme preset has an empty name");
            }
            if !seen.insert(preset.name.as_str()) {
                anyhow::bail!("duplicate theme preset name: {}", preset.name);
            }
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&ThemePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Pick a random preset background; presets without an image fall
    /// back to a stock photo so the picker always changes something.
    pub fn random_background(&self) -> String {
        let mut rng = rand::rng();
        match self.presets.choose(&mut rng) {
            Some(preset) if !preset.background.is_empty() => preset.background.clone(),
            _ => FALLBACK_RANDOM_BACKGROUND.to_string(),
        }
    }
}
