//! User operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User};
use crate::validation::validate_new_user;

/// Create a new user.
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    validate_new_user(user)?;

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, name, email)
        VALUES (?, ?, ?)
        RETURNING id, username, name, email
        "#,
    )
    .bind(user.username.trim())
    .bind(&user.name)
    .bind(&user.email)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: user.username.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, email
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("User", id))
}

/// Get a user by username.
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, email
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: username.to_string(),
    })
}
