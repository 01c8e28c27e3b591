//! # Settings Feature
//!
//! Persistent key-value settings (theme, background, identity) and the
//! YAML theme-preset gallery.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;
pub mod themes;

pub use store::{SettingsStore, ThemeMode};
pub use themes::{ThemeGallery, ThemePreset};
