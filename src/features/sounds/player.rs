//! # Sound Playback
//!
//! Fire-and-forget playback of notification sounds. Events are queued on
//! an unbounded channel and handed to a pluggable [`Playback`] backend by
//! a background task, so callers never block on audio and playback
//! failures never reach them.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::mpsc;

/// Notification sounds the app can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Bell ring when a reminder's due time has just elapsed.
    Alarm,
    /// Success chime when a task is marked complete.
    Complete,
}

impl Sound {
    /// Source asset for the sound.
    pub fn url(&self) -> &'static str {
        match self {
            Sound::Alarm => "https://assets.mixkit.co/active_storage/sfx/1862/1862-preview.mp3",
            Sound::Complete => "https://assets.mixkit.co/active_storage/sfx/2000/2000-preview.mp3",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Alarm => "alarm",
            Sound::Complete => "complete",
        }
    }
}

/// Backend that actually renders a sound. Implementations are expected to
/// be best-effort; errors are logged by the player and otherwise ignored.
#[async_trait]
pub trait Playback: Send + Sync + 'static {
    async fn play(&self, sound: Sound) -> anyhow::Result<()>;
}

/// Default backend: records the playback request in the log only. Real
/// deployments inject a backend wired to their audio output.
pub struct LogPlayback;

#[async_trait]
impl Playback for LogPlayback {
    async fn play(&self, sound: Sound) -> anyhow::Result<()> {
        debug!("Playing {} sound ({})", sound.as_str(), sound.url());
        Ok(())
    }
}

/// Handle for queueing sounds without blocking.
#[derive(Clone)]
pub struct SoundPlayer {
    sender: mpsc::UnboundedSender<Sound>,
}

impl SoundPlayer {
    /// Create a player backed by `playback`, spawning the drain task.
    pub fn new<P: Playback>(playback: P) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::drain(playback, receiver));
        SoundPlayer { sender }
    }

    /// Queue a sound. Never blocks and never fails the caller.
    pub fn play(&self, sound: Sound) {
        if let Err(e) = self.sender.send(sound) {
            warn!("Failed to queue {} sound: {e}", sound.as_str());
        }
    }

    async fn drain<P: Playback>(playback: P, mut receiver: mpsc::UnboundedReceiver<Sound>) {
        while let Some(sound) = receiver.recv().await {
            if let Err(e) = playback.play(sound).await {
                // Blocked audio is an accepted condition, not an error path.
                warn!("Audio play blocked or failed: {e}");
            }
        }
        debug!("Sound player channel closed, drain task exiting");
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingPlayback, RecordingPlayback};
    use super::*;

    #[tokio::test]
    async fn test_sounds_reach_backend_in_order() {
        let (playback, mut rx) = RecordingPlayback::channel();
        let player = SoundPlayer::new(playback);

        player.play(Sound::Alarm);
        player.play(Sound::Complete);

        assert_eq!(rx.recv().await, Some(Sound::Alarm));
        assert_eq!(rx.recv().await, Some(Sound::Complete));
    }

    #[tokio::test]
    async fn test_backend_failure_is_swallowed() {
        let player = SoundPlayer::new(FailingPlayback);
        // Must not panic or surface anything to the caller.
        player.play(Sound::Alarm);
        player.play(Sound::Complete);
        tokio::task::yield_now().await;
    }

    #[test]
    fn test_sound_assets() {
        assert!(Sound::Alarm.url().ends_with(".mp3"));
        assert!(Sound::Complete.url().ends_with(".mp3"));
        assert_ne!(Sound::Alarm.url(), Sound::Complete.url());
    }
}
