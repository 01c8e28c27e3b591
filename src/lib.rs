// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items for convenience
pub use features::{
    // Dashboard
    Dashboard,
    // Intake
    AudioClip, GeminiBackend, IntakeAdapter, IntakeBackend, RecordingSession,
    // Reminders
    AlarmScanner, Category, CategoryFilter, Priority, Reminder, ReminderDraft, ReminderInput,
    ReminderStore, ScannerHandle, StoreStats,
    // Session
    SessionManager, User,
    // Settings
    SettingsStore, ThemeGallery, ThemeMode, ThemePreset,
    // Sounds
    LogPlayback, Playback, Sound, SoundPlayer,
};
