//! Reminder domain types shared by the store, scanner, and intake adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of reminder categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Gym,
    Work,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Gym,
        Category::Work,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Gym => "Gym",
            Category::Work => "Work",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Parse a category name as produced by the extraction service.
    /// Unrecognized values map to `Other` rather than failing.
    pub fn parse_lenient(s: &str) -> Category {
        match s.trim() {
            "Food" => Category::Food,
            "Gym" => Category::Gym,
            "Work" => Category::Work,
            "Health" => Category::Health,
            _ => Category::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reminder priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Unrecognized values map to `Medium`.
    pub fn parse_lenient(s: &str) -> Priority {
        match s.trim() {
            "Low" => Priority::Low,
            "High" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task to be completed at or around a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identifier, assigned at creation, never reused.
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    /// May be in the past (overdue) or the future.
    pub due_at: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for manual reminder creation. `due_at` defaults to the creation
/// time when not supplied.
#[derive(Debug, Clone, Default)]
pub struct ReminderInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Structured result of natural-language extraction, not yet assigned an
/// id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub description: Option<String>,
    pub suggested_time: Option<DateTime<Utc>>,
}

impl ReminderDraft {
    /// Deterministic fallback used whenever extraction fails: the input
    /// text verbatim, filed under `Other` at medium priority.
    pub fn fallback(input: &str) -> Self {
        ReminderDraft {
            title: input.to_string(),
            category: Category::Other,
            priority: Priority::Medium,
            description: None,
            suggested_time: None,
        }
    }
}

/// Category scope for dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => reminder.category == *cat,
        }
    }
}
