//! # Sounds Feature
//!
//! Fire-and-forget notification sound playback.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod player;

pub use player::{LogPlayback, Playback, Sound, SoundPlayer};

#[cfg(test)]
pub(crate) use player::test_support;
