//! # Intake Backend
//!
//! Capability interface for the remote generative-AI endpoint plus the
//! Gemini-backed implementation. The backend is a narrow surface
//! (structured extraction, audio transcription, category tips) so tests
//! swap in a fake without touching the adapter's fallback policy.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with generateContent extraction and
//!   inline-data transcription

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::Deserialize;
use serde_json::json;

use crate::features::reminders::model::{Category, Priority, ReminderDraft};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Remote operations the intake adapter delegates to. All three are
/// best-effort: callers recover from errors with deterministic fallbacks.
#[async_trait]
pub trait IntakeBackend: Send + Sync {
    /// Extract a structured reminder draft from free text, resolving
    /// relative time expressions against `now`.
    async fn extract(&self, text: &str, now: DateTime<Utc>) -> Result<ReminderDraft>;

    /// Transcribe raw audio into plain text.
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String>;

    /// One-sentence motivational tip for a category.
    async fn category_tip(&self, category: Category) -> Result<String>;
}

/// Gemini `generateContent` client.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String) -> Self {
        GeminiBackend {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (integration tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn generate(&self, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let payload: serde_json::Value = response.json().await?;

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            error!("Gemini API error ({status}): {message}");
            anyhow::bail!("Gemini API error ({}): {}", status, message);
        }

        Ok(payload)
    }
}

#[async_trait]
impl IntakeBackend for GeminiBackend {
    async fn extract(&self, text: &str, now: DateTime<Utc>) -> Result<ReminderDraft> {
        let prompt = format!(
            "Extract structured reminder data from this user input: \"{text}\". \
             Infer the category (Food, Gym, Work, Health, Other) and priority \
             (Low, Medium, High) based on context. If a time/date is mentioned \
             (e.g. \"tomorrow at 5pm\"), convert it to an approximate ISO string \
             based on the current time: {}.",
            now.to_rfc3339()
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": draft_response_schema(),
            }
        });

        debug!("Requesting extraction for {} chars of input", text.len());
        let payload = self.generate(body).await?;
        let raw = response_text(&payload)
            .ok_or_else(|| anyhow::anyhow!("No response from AI"))?;
        let draft = parse_draft_text(&raw)?;
        info!(
            "Extraction produced \"{}\" ({}/{})",
            draft.title, draft.category, draft.priority
        );
        Ok(draft)
    }

    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(audio);
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": mime_type, "data": encoded } },
                    { "text": "Transcribe the spoken audio into clear, natural text." }
                ]
            }]
        });

        debug!("Requesting transcription of {} audio bytes", audio.len());
        let payload = self.generate(body).await?;
        let text = response_text(&payload).unwrap_or_default();
        info!("Transcription successful, length: {} characters", text.len());
        Ok(text)
    }

    async fn category_tip(&self, category: Category) -> Result<String> {
        let prompt = format!(
            "Give me a very short (1 sentence), witty, and motivating tip for a \
             task related to: {category}."
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let payload = self.generate(body).await?;
        Ok(response_text(&payload).unwrap_or_default())
    }
}

/// Fixed schema the extraction response must conform to.
fn draft_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A concise title for the reminder"
            },
            "category": {
                "type": "STRING",
                "enum": ["Food", "Gym", "Work", "Health", "Other"]
            },
            "priority": {
                "type": "STRING",
                "enum": ["Low", "Medium", "High"]
            },
            "description": {
                "type": "STRING",
                "description": "Any extra details mentioned"
            },
            "suggestedTime": {
                "type": "STRING",
                "description": "ISO 8601 date string if a time is mentioned, otherwise null"
            }
        },
        "required": ["title", "category", "priority"]
    })
}

/// Pull the first text part out of a `generateContent` response.
fn response_text(payload: &serde_json::Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    parts
        .iter()
        .find_map(|p| p.get("text").and_then(|t| t.as_str()))
        .map(|s| s.to_string())
}

/// Extraction JSON as the service returns it, before enum mapping.
#[derive(Debug, Deserialize)]
struct RawDraft {
    title: String,
    category: String,
    priority: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "suggestedTime")]
    suggested_time: Option<String>,
}

/// Map the service's JSON into a domain draft. Unknown category/priority
/// values degrade to their defaults; an unparseable suggested time is
/// dropped; an empty title is malformed output and fails the parse.
pub(crate) fn parse_draft_text(raw: &str) -> Result<ReminderDraft> {
    let parsed: RawDraft = serde_json::from_str(raw)?;

    let title = parsed.title.trim().to_string();
    if title.is_empty() {
        anyhow::bail!("extraction returned an empty title");
    }

    let suggested_time = parsed.suggested_time.as_deref().and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    });

    Ok(ReminderDraft {
        title,
        category: Category::parse_lenient(&parsed.category),
        priority: Priority::parse_lenient(&parsed.priority),
        description: parsed.description.filter(|d| !d.trim().is_empty()),
        suggested_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_draft_full() {
        let raw = r#"{
            "title": "Meal prep chicken salad",
            "category": "Food",
            "priority": "High",
            "description": "For lunch next Monday",
            "suggestedTime": "2025-06-02T09:00:00Z"
        }"#;

        let draft = parse_draft_text(raw).unwrap();
        assert_eq!(draft.title, "Meal prep chicken salad");
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.description.as_deref(), Some("For lunch next Monday"));
        assert!(draft.suggested_time.is_some());
    }

    #[test]
    fn test_parse_draft_minimal() {
        let raw = r#"{"title": "Call mom", "category": "Other", "priority": "Low"}"#;
        let draft = parse_draft_text(raw).unwrap();
        assert_eq!(draft.title, "Call mom");
        assert!(draft.description.is_none());
        assert!(draft.suggested_time.is_none());
    }

    #[test]
    fn test_parse_draft_degrades_unknown_enums() {
        let raw = r#"{"title": "x", "category": "Errands", "priority": "Critical"}"#;
        let draft = parse_draft_text(raw).unwrap();
        assert_eq!(draft.category, Category::Other);
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn test_parse_draft_drops_bad_time() {
        let raw = r#"{"title": "x", "category": "Work", "priority": "Low", "suggestedTime": "next tuesday"}"#;
        let draft = parse_draft_text(raw).unwrap();
        assert!(draft.suggested_time.is_none());
    }

    #[test]
    fn test_parse_draft_rejects_malformed() {
        assert!(parse_draft_text("not json at all").is_err());
        assert!(parse_draft_text(r#"{"category": "Work"}"#).is_err());
        assert!(parse_draft_text(r#"{"title": "  ", "category": "Work", "priority": "Low"}"#).is_err());
    }

    #[test]
    fn test_response_text_walks_candidates() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello" }] }
            }]
        });
        assert_eq!(response_text(&payload).as_deref(), Some("hello"));

        let empty = json!({ "candidates": [] });
        assert!(response_text(&empty).is_none());
    }
}
