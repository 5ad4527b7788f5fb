//! SQLite persistence layer for Aura.
//!
//! This crate provides async database operations for users, tasks, alarms,
//! categories, chat messages and settings using SQLx with SQLite. Every
//! owned entity is scoped by user ID: a row that belongs to someone else is
//! reported as [`DatabaseError::NotFound`].
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, NewUser, user};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:aura.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a user
//!     let new_user = NewUser {
//!         username: "alex".to_string(),
//!         name: Some("Alex".to_string()),
//!         email: None,
//!     };
//!     let created = user::create_user(db.pool(), &new_user).await?;
//!     println!("created user {}", created.id);
//!
//!     Ok(())
//! }
//! ```

pub mod alarm;
pub mod category;
pub mod error;
pub mod message;
pub mod models;
pub mod seed;
pub mod settings;
pub mod task;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    Alarm, AlarmPatch, Category, CategoryPatch, Message, NewAlarm, NewCategory, NewMessage,
    NewTask, NewUser, SettingsPatch, Task, TaskPatch, User, UserSettings,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// let db = database::Database::connect("sqlite:data/aura.db?mode=rwc").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Open a migrated in-memory database (for tests and demos).
    ///
    /// Uses a single connection so every query sees the same memory database.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
