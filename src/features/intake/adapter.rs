//! # Intake Adapter
//!
//! Fallback policy around the remote backend. Extraction never fails the
//! caller (malformed or unreachable service degrades to a deterministic
//! draft), transcription errors yield an empty string, and tips fall back
//! to canned lines. Only empty input is an error here.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, warn};
use std::sync::Arc;

use crate::features::intake::backend::IntakeBackend;
use crate::features::intake::recording::AudioClip;
use crate::features::reminders::model::{Category, ReminderDraft};

/// Wraps an [`IntakeBackend`] with the recovery rules the rest of the app
/// relies on.
#[derive(Clone)]
pub struct IntakeAdapter {
    backend: Arc<dyn IntakeBackend>,
}

impl IntakeAdapter {
    pub fn new(backend: Arc<dyn IntakeBackend>) -> Self {
        IntakeAdapter { backend }
    }

    /// Parse free text into a reminder draft. Always succeeds for
    /// non-empty input: any backend failure or malformed response falls
    /// back to `{title: input, category: Other, priority: Medium}`.
    /// Partial structured data from a bad response is discarded wholesale.
    pub async fn parse(&self, free_text: &str, now: DateTime<Utc>) -> Result<ReminderDraft> {
        let input = free_text.trim();
        if input.is_empty() {
            anyhow::bail!("validation: input is empty");
        }

        match self.backend.extract(input, now).await {
            Ok(draft) => Ok(draft),
            Err(e) => {
                error!("Extraction failed, using fallback draft: {e}");
                Ok(ReminderDraft::fallback(input))
            }
        }
    }

    /// Transcribe an audio clip. Returns an empty string on any failure.
    pub async fn transcribe(&self, clip: &AudioClip) -> String {
        match self.backend.transcribe(&clip.data, &clip.mime_type).await {
            Ok(text) => text,
            Err(e) => {
                error!("Transcription failed: {e}");
                String::new()
            }
        }
    }

    /// Motivational one-liner for a category. Never fails.
    pub async fn tip(&self, category: Category) -> String {
        match self.backend.category_tip(category).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "Stay consistent!".to_string(),
            Err(e) => {
                warn!("Tip fetch failed for {category}: {e}");
                "You got this!".to_string()
            }
        }
    }

    /// Combine typed text with an optional voice clip: the transcript is
    /// space-joined after the typed text and the result trimmed.
    pub async fn compose_input(&self, typed: &str, clip: Option<&AudioClip>) -> String {
        let typed = typed.trim();
        let transcript = match clip {
            Some(clip) => self.transcribe(clip).await,
            None => String::new(),
        };
        let transcript = transcript.trim();

        if typed.is_empty() {
            transcript.to_string()
        } else if transcript.is_empty() {
            typed.to_string()
        } else {
            format!("{typed} {transcript}")
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{DownBackend, ScriptedBackend};
    use super::*;
    use crate::features::reminders::model::Priority;

    fn clip() -> AudioClip {
        AudioClip {
            data: vec![1, 2, 3],
            mime_type: "audio/webm".to_string(),
        }
    }

    #[tokio::test]
    async fn test_parse_falls_back_deterministically() {
        let adapter = IntakeAdapter::new(Arc::new(DownBackend));

        let draft = adapter.parse("buy milk", Utc::now()).await.unwrap();
        assert_eq!(draft.title, "buy milk");
        assert_eq!(draft.category, Category::Other);
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.description.is_none());
        assert!(draft.suggested_time.is_none());

        // Deterministic: a second call produces the identical draft.
        let again = adapter.parse("buy milk", Utc::now()).await.unwrap();
        assert_eq!(draft, again);
    }

    #[tokio::test]
    async fn test_parse_rejects_empty_input() {
        let adapter = IntakeAdapter::new(Arc::new(DownBackend));
        assert!(adapter.parse("", Utc::now()).await.is_err());
        assert!(adapter.parse("   ", Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_parse_uses_backend_when_healthy() {
        let adapter = IntakeAdapter::new(Arc::new(ScriptedBackend::new("Leg day", "")));
        let draft = adapter.parse("gym tonight", Utc::now()).await.unwrap();
        assert_eq!(draft.title, "Leg day");
        assert_eq!(draft.category, Category::Gym);
    }

    #[tokio::test]
    async fn test_transcribe_failure_yields_empty_string() {
        let adapter = IntakeAdapter::new(Arc::new(DownBackend));
        assert_eq!(adapter.transcribe(&clip()).await, "");
    }

    #[tokio::test]
    async fn test_tip_fallbacks() {
        let down = IntakeAdapter::new(Arc::new(DownBackend));
        assert_eq!(down.tip(Category::Gym).await, "You got this!");

        let scripted = IntakeAdapter::new(Arc::new(ScriptedBackend::new("x", "")));
        assert_eq!(
            scripted.tip(Category::Food).await,
            "Small steps beat big plans."
        );
    }

    #[tokio::test]
    async fn test_compose_joins_typed_and_transcript() {
        let adapter = IntakeAdapter::new(Arc::new(ScriptedBackend::new("x", "pick up eggs")));

        assert_eq!(
            adapter.compose_input("buy milk ", Some(&clip())).await,
            "buy milk pick up eggs"
        );
        assert_eq!(adapter.compose_input("", Some(&clip())).await, "pick up eggs");
        assert_eq!(adapter.compose_input("buy milk", None).await, "buy milk");
    }

    #[tokio::test]
    async fn test_compose_with_failed_transcription_keeps_typed_text() {
        let adapter = IntakeAdapter::new(Arc::new(DownBackend));
        assert_eq!(
            adapter.compose_input("buy milk", Some(&clip())).await,
            "buy milk"
        );
    }
}
