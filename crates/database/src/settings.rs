//! Per-user settings, created lazily with fixed defaults.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{SettingsPatch, UserSettings};
use crate::Result;

/// Get a user's settings, inserting the defaults on first access.
///
/// Defaults: dark mode, notifications, AI suggestions and automatic task
/// creation on; calendar sync off.
pub async fn get_or_create_settings(pool: &SqlitePool, user_id: i64) -> Result<UserSettings> {
    sqlx::query(
        r#"
        INSERT INTO user_settings
            (user_id, dark_mode, notifications, ai_suggestions, auto_task_creation, calendar_sync, updated_at)
        VALUES (?, 1, 1, 1, 1, 0, ?)
        ON CONFLICT(user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        SELECT id, user_id, dark_mode, notifications, ai_suggestions,
               auto_task_creation, calendar_sync, updated_at
        FROM user_settings
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(settings)
}

/// Apply a partial update to a user's settings.
pub async fn update_settings(
    pool: &SqlitePool,
    user_id: i64,
    patch: &SettingsPatch,
) -> Result<UserSettings> {
    let current = get_or_create_settings(pool, user_id).await?;
    let updated = UserSettings {
        dark_mode: patch.dark_mode.unwrap_or(current.dark_mode),
        notifications: patch.notifications.unwrap_or(current.notifications),
        ai_suggestions: patch.ai_suggestions.unwrap_or(current.ai_suggestions),
        auto_task_creation: patch.auto_task_creation.unwrap_or(current.auto_task_creation),
        calendar_sync: patch.calendar_sync.unwrap_or(current.calendar_sync),
        updated_at: Utc::now(),
        ..current
    };

    sqlx::query(
        r#"
        UPDATE user_settings
        SET dark_mode = ?, notifications = ?, ai_suggestions = ?,
            auto_task_creation = ?, calendar_sync = ?, updated_at = ?
        WHERE user_id = ?
        "#,
    )
    .bind(updated.dark_mode)
    .bind(updated.notifications)
    .bind(updated.ai_suggestions)
    .bind(updated.auto_task_creation)
    .bind(updated.calendar_sync)
    .bind(updated.updated_at)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(updated)
}
