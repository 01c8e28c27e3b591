//! # Reminder Store
//!
//! In-memory ordered collection of reminders, newest first. All mutations
//! go through this type; callers receive snapshots, never live references.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::reminders::model::{
    Category, CategoryFilter, Priority, Reminder, ReminderDraft, ReminderInput,
};

/// Aggregate counts for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Owning container for the reminder collection. Mutations take the write
/// lock briefly; reads clone a snapshot so a concurrent scan and a toggle
/// each see a consistent list.
pub struct ReminderStore {
    reminders: RwLock<Vec<Reminder>>,
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderStore {
    pub fn new() -> Self {
        ReminderStore {
            reminders: RwLock::new(Vec::new()),
        }
    }

    /// Create a reminder from manual form input. The title must be
    /// non-empty after trimming; everything else has defaults.
    pub async fn create(&self, input: ReminderInput) -> Result<Reminder> {
        let title = input.title.trim();
        if title.is_empty() {
            anyhow::bail!("validation: title must not be empty");
        }

        let now = Utc::now();
        let reminder = Reminder {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: input.description.filter(|d| !d.trim().is_empty()),
            category: input.category.unwrap_or(Category::Food),
            priority: input.priority.unwrap_or(Priority::Medium),
            due_at: input.due_at.unwrap_or(now),
            completed: false,
            created_at: now,
        };

        self.reminders.write().await.insert(0, reminder.clone());
        debug!("Created reminder {} ({})", reminder.id, reminder.title);
        Ok(reminder)
    }

    /// Create a reminder from an extraction draft. Draft titles come from
    /// the intake adapter, which guarantees they are non-empty.
    pub async fn create_from_draft(&self, draft: ReminderDraft, now: DateTime<Utc>) -> Reminder {
        let reminder = Reminder {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            due_at: draft.suggested_time.unwrap_or(now),
            completed: false,
            created_at: now,
        };

        self.reminders.write().await.insert(0, reminder.clone());
        debug!(
            "Created reminder {} from draft ({})",
            reminder.id, reminder.title
        );
        reminder
    }

    /// Flip the completion flag. Returns the new value, or `None` if the
    /// id is unknown (benign no-op).
    pub async fn toggle_complete(&self, id: Uuid) -> Option<bool> {
        let mut reminders = self.reminders.write().await;
        let reminder = reminders.iter_mut().find(|r| r.id == id)?;
        reminder.completed = !reminder.completed;
        Some(reminder.completed)
    }

    /// Remove the reminder if present. Returns whether anything changed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut reminders = self.reminders.write().await;
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        before != reminders.len()
    }

    /// Snapshot of reminders in store order, optionally scoped to one
    /// category.
    pub async fn list(&self, filter: CategoryFilter) -> Vec<Reminder> {
        self.reminders
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.reminders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reminders.read().await.is_empty()
    }

    pub async fn stats(&self) -> StoreStats {
        let reminders = self.reminders.read().await;
        let total = reminders.len();
        let completed = reminders.iter().filter(|r| r.completed).count();
        StoreStats {
            total,
            pending: total - completed,
            completed,
        }
    }
}
