//! Category operations, always scoped to the owning user.
//!
//! Tasks reference categories weakly, so deleting a category never touches
//! the tasks that point at it.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::validation::{validate_category_patch, validate_new_category};

/// List a user's categories in creation order. The first entry is the
/// user's default category.
pub async fn list_categories(pool: &SqlitePool, user_id: i64) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, color, user_id
        FROM categories
        WHERE user_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Get a single category owned by the user.
pub async fn get_category(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, color, user_id
        FROM categories
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Category", id))
}

/// Create a category for a user.
pub async fn create_category(
    pool: &SqlitePool,
    user_id: i64,
    category: &NewCategory,
) -> Result<Category> {
    validate_new_category(category)?;

    let created = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name, color, user_id)
        VALUES (?, ?, ?)
        RETURNING id, name, color, user_id
        "#,
    )
    .bind(category.name.trim())
    .bind(category.color.trim())
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Rename or recolor a category owned by the user.
pub async fn update_category(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &CategoryPatch,
) -> Result<Category> {
    validate_category_patch(patch)?;

    let current = get_category(pool, user_id, id).await?;
    let updated = Category {
        name: patch
            .name
            .as_ref()
            .map(|n| n.trim().to_string())
            .unwrap_or(current.name),
        color: patch
            .color
            .as_ref()
            .map(|c| c.trim().to_string())
            .unwrap_or(current.color),
        ..current
    };

    sqlx::query(
        r#"
        UPDATE categories
        SET name = ?, color = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&updated.name)
    .bind(&updated.color)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(updated)
}

/// Delete a category owned by the user.
pub async fn delete_category(pool: &SqlitePool, user_id: i64, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("Category", id));
    }

    Ok(())
}
