//! # Reminders Feature
//!
//! Reminder lifecycle: the in-memory store, the domain model, and the
//! periodic alarm scanner with its one-ring-per-reminder guarantee.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod scanner;
pub mod store;

pub use model::{Category, CategoryFilter, Priority, Reminder, ReminderDraft, ReminderInput};
pub use scanner::{AlarmScanner, ScannerHandle, DEFAULT_SCAN_INTERVAL};
pub use store::{ReminderStore, StoreStats};
