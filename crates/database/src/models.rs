//! Database models.
//!
//! Row types derive [`FromRow`] for storage and serialize in camelCase so they
//! can be handed straight to the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account that owns tasks, alarms, categories, messages and settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

/// Fields for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A dated to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Free-form notes.
    pub description: Option<String>,
    /// When the task is due.
    pub date: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Weak reference to a category; may point at a deleted row.
    pub category_id: Option<i64>,
    /// Owning user.
    pub user_id: i64,
}

/// Fields for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Partial update for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub category_id: Option<i64>,
}

/// A timed alarm with a recurrence descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Label shown when the alarm fires.
    pub title: String,
    /// When the alarm fires.
    pub time: DateTime<Utc>,
    /// Recurrence token, e.g. "Daily", "Mon-Fri", "Once" or "mon,wed,fri".
    pub days: Option<String>,
    /// Whether the alarm is armed.
    pub is_active: bool,
    /// Owning user.
    pub user_id: i64,
}

/// Fields for creating an alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlarm {
    pub title: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial update for an alarm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmPatch {
    pub title: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub days: Option<String>,
    pub is_active: Option<bool>,
}

/// A user-defined task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Color token, e.g. "purple" or "blue".
    pub color: String,
    /// Owning user.
    pub user_id: i64,
}

/// Fields for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// A chat message, either from the user or from the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Auto-incrementing ID. Breaks ties between equal timestamps.
    pub id: i64,
    /// Message text.
    pub content: String,
    /// True when the user wrote the message.
    pub is_user: bool,
    /// Assigned by the store at insert time.
    pub timestamp: DateTime<Utc>,
    /// Owning user.
    pub user_id: i64,
}

/// Fields for creating a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub content: String,
    #[serde(default = "default_true")]
    pub is_user: bool,
}

impl NewMessage {
    /// A message written by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
        }
    }

    /// A message written by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
        }
    }
}

/// Per-user application settings. Exactly one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: i64,
    pub user_id: i64,
    pub dark_mode: bool,
    pub notifications: bool,
    pub ai_suggestions: bool,
    pub auto_task_creation: bool,
    pub calendar_sync: bool,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub dark_mode: Option<bool>,
    pub notifications: Option<bool>,
    pub ai_suggestions: Option<bool>,
    pub auto_task_creation: Option<bool>,
    pub calendar_sync: Option<bool>,
}

fn default_true() -> bool {
    true
}
