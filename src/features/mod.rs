//! # Features
//!
//! All feature modules, each with its own README-style header.

pub mod dashboard;
pub mod intake;
pub mod reminders;
pub mod session;
pub mod settings;
pub mod sounds;

pub use dashboard::Dashboard;
pub use intake::{AudioClip, GeminiBackend, IntakeAdapter, IntakeBackend, RecordingSession};
pub use reminders::{
    AlarmScanner, Category, CategoryFilter, Priority, Reminder, ReminderDraft, ReminderInput,
    ReminderStore, ScannerHandle, StoreStats, DEFAULT_SCAN_INTERVAL,
};
pub use session::{SessionManager, User};
pub use settings::{SettingsStore, ThemeGallery, ThemeMode, ThemePreset};
pub use sounds::{LogPlayback, Playback, Sound, SoundPlayer};
