//! Task operations, always scoped to the owning user.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewTask, Task, TaskPatch};
use crate::validation::{validate_new_task, validate_task_patch};

/// List all tasks for a user, earliest first.
pub async fn list_tasks(pool: &SqlitePool, user_id: i64) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, date, completed, category_id, user_id
        FROM tasks
        WHERE user_id = ?
        ORDER BY date ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Get a single task owned by the user.
pub async fn get_task(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Task> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, date, completed, category_id, user_id
        FROM tasks
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Task", id))
}

/// Create a task for a user.
pub async fn create_task(pool: &SqlitePool, user_id: i64, task: &NewTask) -> Result<Task> {
    validate_new_task(task)?;

    let created = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (title, description, date, completed, category_id, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, title, description, date, completed, category_id, user_id
        "#,
    )
    .bind(task.title.trim())
    .bind(&task.description)
    .bind(task.date)
    .bind(task.completed)
    .bind(task.category_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    tracing::debug!(task_id = created.id, user_id, "Created task");
    Ok(created)
}

/// Apply a partial update to a task owned by the user.
pub async fn update_task(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &TaskPatch,
) -> Result<Task> {
    validate_task_patch(patch)?;

    let current = get_task(pool, user_id, id).await?;
    let updated = Task {
        title: patch
            .title
            .as_ref()
            .map(|t| t.trim().to_string())
            .unwrap_or(current.title),
        description: patch.description.clone().or(current.description),
        date: patch.date.unwrap_or(current.date),
        completed: patch.completed.unwrap_or(current.completed),
        category_id: patch.category_id.or(current.category_id),
        ..current
    };

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?, description = ?, date = ?, completed = ?, category_id = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&updated.title)
    .bind(&updated.description)
    .bind(updated.date)
    .bind(updated.completed)
    .bind(updated.category_id)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Task", id));
    }

    Ok(updated)
}

/// Delete a task owned by the user.
pub async fn delete_task(pool: &SqlitePool, user_id: i64, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Task", id));
    }

    Ok(())
}
