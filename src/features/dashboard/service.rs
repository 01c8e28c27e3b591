//! # Dashboard Service
//!
//! Composition root for the reminder workflows: manual and AI-assisted
//! creation (with a non-reentrant in-flight guard), completion toggles
//! with their sound side effect, category-scoped views, and the voice
//! recording lifecycle.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::features::intake::{AudioClip, IntakeAdapter, RecordingSession};
use crate::features::reminders::model::{CategoryFilter, Reminder, ReminderInput};
use crate::features::reminders::store::{ReminderStore, StoreStats};
use crate::features::sounds::{Sound, SoundPlayer};

/// RAII flag for the single-create-in-flight rule: acquired before a
/// creation awaits the backend, released on every exit path by drop.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            anyhow::bail!("busy: a task is already being created");
        }
        Ok(InFlightGuard { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct Dashboard {
    store: Arc<ReminderStore>,
    intake: IntakeAdapter,
    sounds: SoundPlayer,
    creating: Arc<AtomicBool>,
    recording: Mutex<Option<RecordingSession>>,
}

impl Dashboard {
    pub fn new(store: Arc<ReminderStore>, intake: IntakeAdapter, sounds: SoundPlayer) -> Self {
        Dashboard {
            store,
            intake,
            sounds,
            creating: Arc::new(AtomicBool::new(false)),
            recording: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<ReminderStore> {
        &self.store
    }

    /// Create a reminder from the manual form. Empty titles are a
    /// validation error; a creation already in flight is a busy error.
    pub async fn add_manual(&self, input: ReminderInput) -> Result<Reminder> {
        let _guard = InFlightGuard::acquire(&self.creating)?;
        self.store.create(input).await
    }

    /// Create a reminder from natural language, optionally with a voice
    /// clip. The clip's transcript is space-joined with the typed text
    /// before extraction; backend failures degrade to the fallback draft
    /// rather than failing the submission.
    pub async fn add_smart(&self, typed: &str, clip: Option<&AudioClip>) -> Result<Reminder> {
        let _guard = InFlightGuard::acquire(&self.creating)?;

        let combined = self.intake.compose_input(typed, clip).await;
        let now = Utc::now();
        let draft = self.intake.parse(&combined, now).await?;
        let category = draft.category;
        let reminder = self.store.create_from_draft(draft, now).await;

        // Tip is informational only; fetch it after the reminder exists.
        let tip = self.intake.tip(category).await;
        info!("Tip for {category}: {tip}");

        Ok(reminder)
    }

    /// Toggle completion. The completion chime plays on false->true only.
    pub async fn toggle(&self, id: Uuid) -> Option<bool> {
        let now_complete = self.store.toggle_complete(id).await?;
        if now_complete {
            self.sounds.play(Sound::Complete);
        }
        Some(now_complete)
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.store.delete(id).await
    }

    pub async fn view(&self, filter: CategoryFilter) -> Vec<Reminder> {
        self.store.list(filter).await
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }

    /// Begin buffering a voice recording. Only one at a time.
    pub async fn start_recording(&self, mime_type: &str) -> Result<()> {
        let mut recording = self.recording.lock().await;
        if recording.is_some() {
            anyhow::bail!("busy: already recording");
        }
        *recording = Some(RecordingSession::start(mime_type));
        Ok(())
    }

    /// Append captured audio to the active recording. Chunks arriving
    /// when nothing is recording are dropped.
    pub async fn record_chunk(&self, chunk: &[u8]) -> bool {
        let mut recording = self.recording.lock().await;
        match recording.as_mut() {
            Some(session) => session.push_chunk(chunk),
            None => false,
        }
    }

    /// Finish the recording and hand back whatever was buffered.
    pub async fn stop_recording(&self) -> Option<AudioClip> {
        let session = self.recording.lock().await.take()?;
        session.stop()
    }

    /// Abandon the recording entirely (form reset); the buffer is
    /// released without producing a clip.
    pub async fn cancel_recording(&self) {
        if self.recording.lock().await.take().is_some() {
            debug!("Recording cancelled, buffer discarded");
        }
    }

    pub async fn is_recording(&self) -> bool {
        self.recording.lock().await.is_some()
    }
}
