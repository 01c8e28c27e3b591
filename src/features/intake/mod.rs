//! # Intake Feature
//!
//! AI-assisted reminder intake: natural-language extraction, audio
//! transcription, and the voice-recording buffer, all behind a narrow
//! backend interface with deterministic fallbacks.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod adapter;
pub mod backend;
pub mod recording;

pub use adapter::IntakeAdapter;
pub use backend::{GeminiBackend, IntakeBackend};
pub use recording::{AudioClip, RecordingSession};
