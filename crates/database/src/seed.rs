//! Demo data for local development.

use chrono::{DateTime, Local, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DatabaseError;
use crate::models::{NewAlarm, NewCategory, NewMessage, NewTask, NewUser, User};
use crate::{alarm, category, message, task, user, Result};

/// Username of the demo account.
pub const DEMO_USERNAME: &str = "demo";

/// Create the demo user with default categories, sample tasks, alarms and a
/// welcome message.
///
/// Returns the existing demo user untouched if it was already seeded.
pub async fn seed_demo(pool: &SqlitePool) -> Result<User> {
    match user::get_user_by_username(pool, DEMO_USERNAME).await {
        Ok(existing) => return Ok(existing),
        Err(DatabaseError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    let demo = user::create_user(
        pool,
        &NewUser {
            username: DEMO_USERNAME.to_string(),
            name: Some("Alex".to_string()),
            email: Some("alex@example.com".to_string()),
        },
    )
    .await?;

    let mut category_ids = Vec::new();
    for (name, color) in [("Daily", "purple"), ("Work", "blue"), ("Personal", "purple")] {
        let created = category::create_category(
            pool,
            demo.id,
            &NewCategory {
                name: name.to_string(),
                color: color.to_string(),
            },
        )
        .await?;
        category_ids.push(created.id);
    }

    let tasks = [
        ("Morning routine", "Complete morning meditation and exercise", (7, 0), false, 0),
        ("Team meeting", "Weekly sprint planning with design team", (10, 0), false, 1),
        ("Doctor's appointment", "Annual check-up", (14, 0), false, 2),
        ("Write daily report", "Include project updates", (16, 30), false, 1),
        ("Review presentation slides", "Check for errors and improve visuals", (9, 30), true, 1),
    ];
    for (title, description, (hour, minute), completed, category) in tasks {
        task::create_task(
            pool,
            demo.id,
            &NewTask {
                title: title.to_string(),
                description: Some(description.to_string()),
                date: today_at(hour, minute),
                completed,
                category_id: category_ids.get(category).copied(),
            },
        )
        .await?;
    }

    let alarms = [
        ("Morning Workout", (7, 0), "Daily", true),
        ("Meeting Reminder", (10, 45), "Mon-Fri", true),
        ("Evening Meditation", (21, 0), "Daily", true),
        ("Weekend Run", (8, 30), "Sat-Sun", false),
    ];
    for (title, (hour, minute), days, is_active) in alarms {
        alarm::create_alarm(
            pool,
            demo.id,
            &NewAlarm {
                title: title.to_string(),
                time: today_at(hour, minute),
                days: Some(days.to_string()),
                is_active,
            },
        )
        .await?;
    }

    message::create_message(
        pool,
        demo.id,
        &NewMessage::assistant(
            "Hi there! I'm Aura, your personal AI assistant. How can I help you today?",
        ),
    )
    .await?;

    info!(user_id = demo.id, "Seeded demo user");
    Ok(demo)
}

/// Today's date at the given local wall-clock time.
fn today_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Local::now()
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
