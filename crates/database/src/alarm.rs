//! Alarm operations, always scoped to the owning user.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Alarm, AlarmPatch, NewAlarm};
use crate::validation::{validate_alarm_patch, validate_new_alarm};

/// List all alarms for a user in insertion order.
pub async fn list_alarms(pool: &SqlitePool, user_id: i64) -> Result<Vec<Alarm>> {
    let alarms = sqlx::query_as::<_, Alarm>(
        r#"
        SELECT id, title, time, days, is_active, user_id
        FROM alarms
        WHERE user_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(alarms)
}

/// Get a single alarm owned by the user.
pub async fn get_alarm(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Alarm> {
    sqlx::query_as::<_, Alarm>(
        r#"
        SELECT id, title, time, days, is_active, user_id
        FROM alarms
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Alarm", id))
}

/// Create an alarm for a user.
pub async fn create_alarm(pool: &SqlitePool, user_id: i64, alarm: &NewAlarm) -> Result<Alarm> {
    validate_new_alarm(alarm)?;

    let created = sqlx::query_as::<_, Alarm>(
        r#"
        INSERT INTO alarms (title, time, days, is_active, user_id)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, time, days, is_active, user_id
        "#,
    )
    .bind(alarm.title.trim())
    .bind(alarm.time)
    .bind(&alarm.days)
    .bind(alarm.is_active)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    tracing::debug!(alarm_id = created.id, user_id, "Created alarm");
    Ok(created)
}

/// Apply a partial update to an alarm owned by the user.
pub async fn update_alarm(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &AlarmPatch,
) -> Result<Alarm> {
    validate_alarm_patch(patch)?;

    let current = get_alarm(pool, user_id, id).await?;
    let updated = Alarm {
        title: patch
            .title
            .as_ref()
            .map(|t| t.trim().to_string())
            .unwrap_or(current.title),
        time: patch.time.unwrap_or(current.time),
        days: patch.days.clone().or(current.days),
        is_active: patch.is_active.unwrap_or(current.is_active),
        ..current
    };

    let result = sqlx::query(
        r#"
        UPDATE alarms
        SET title = ?, time = ?, days = ?, is_active = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&updated.title)
    .bind(updated.time)
    .bind(&updated.days)
    .bind(updated.is_active)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Alarm", id));
    }

    Ok(updated)
}

/// Delete an alarm owned by the user.
pub async fn delete_alarm(pool: &SqlitePool, user_id: i64, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM alarms
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Alarm", id));
    }

    Ok(())
}
