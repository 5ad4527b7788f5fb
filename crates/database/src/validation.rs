//! Input validation for entity payloads.
//!
//! Everything that creates or updates a row runs through these checks first,
//! so a malformed payload never produces a partial entity.

use std::fmt;

use crate::models::{
    AlarmPatch, CategoryPatch, NewAlarm, NewCategory, NewTask, NewUser, TaskPatch,
};

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Field present but not usable.
    Invalid { field: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for task and alarm titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for task descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;

/// Maximum allowed length for recurrence tokens.
pub const MAX_DAYS_LENGTH: usize = 64;

/// Maximum allowed length for names (usernames, categories, colors).
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum allowed length for chat messages.
pub const MAX_MESSAGE_LENGTH: usize = 8000;

fn require(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    limit(field, trimmed, max)
}

fn limit(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate a recurrence token such as "Daily", "Mon-Fri" or "mon,wed,fri".
///
/// The token is free-form; only emptiness, length and stray list separators
/// are rejected.
pub fn validate_days(days: &str) -> Result<(), ValidationError> {
    require("days", days, MAX_DAYS_LENGTH)?;

    if days.contains(',') && days.split(',').any(|part| part.trim().is_empty()) {
        return Err(ValidationError::Invalid {
            field: "days".to_string(),
            reason: "empty entry in day list".to_string(),
        });
    }

    Ok(())
}

/// Validate a user payload.
pub fn validate_new_user(user: &NewUser) -> Result<(), ValidationError> {
    require("username", &user.username, MAX_NAME_LENGTH)?;
    if user.username.chars().any(char::is_whitespace) {
        return Err(ValidationError::Invalid {
            field: "username".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }
    if let Some(ref name) = user.name {
        limit("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(ref email) = user.email {
        if !email.contains('@') {
            return Err(ValidationError::Invalid {
                field: "email".to_string(),
                reason: "must contain an @ symbol".to_string(),
            });
        }
    }
    Ok(())
}

/// Validate a task payload.
pub fn validate_new_task(task: &NewTask) -> Result<(), ValidationError> {
    require("title", &task.title, MAX_TITLE_LENGTH)?;
    if let Some(ref description) = task.description {
        limit("description", description, MAX_DESCRIPTION_LENGTH)?;
    }
    Ok(())
}

/// Validate a task update.
pub fn validate_task_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
    if let Some(ref title) = patch.title {
        require("title", title, MAX_TITLE_LENGTH)?;
    }
    if let Some(ref description) = patch.description {
        limit("description", description, MAX_DESCRIPTION_LENGTH)?;
    }
    Ok(())
}

/// Validate an alarm payload.
pub fn validate_new_alarm(alarm: &NewAlarm) -> Result<(), ValidationError> {
    require("title", &alarm.title, MAX_TITLE_LENGTH)?;
    if let Some(ref days) = alarm.days {
        validate_days(days)?;
    }
    Ok(())
}

/// Validate an alarm update.
pub fn validate_alarm_patch(patch: &AlarmPatch) -> Result<(), ValidationError> {
    if let Some(ref title) = patch.title {
        require("title", title, MAX_TITLE_LENGTH)?;
    }
    if let Some(ref days) = patch.days {
        validate_days(days)?;
    }
    Ok(())
}

/// Validate a category payload.
pub fn validate_new_category(category: &NewCategory) -> Result<(), ValidationError> {
    require("name", &category.name, MAX_NAME_LENGTH)?;
    require("color", &category.color, MAX_NAME_LENGTH)
}

/// Validate a category update.
pub fn validate_category_patch(patch: &CategoryPatch) -> Result<(), ValidationError> {
    if let Some(ref name) = patch.name {
        require("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(ref color) = patch.color {
        require("color", color, MAX_NAME_LENGTH)?;
    }
    Ok(())
}

/// Validate message content. Whitespace-only content is allowed; the chat
/// pipeline treats it as a message without intent.
pub fn validate_message_content(content: &str) -> Result<(), ValidationError> {
    limit("content", content, MAX_MESSAGE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            date: Utc::now(),
            completed: false,
            category_id: None,
        }
    }

    #[test]
    fn test_task_title_required() {
        assert!(validate_new_task(&task("Call mom")).is_ok());
        assert_eq!(
            validate_new_task(&task("   ")),
            Err(ValidationError::Empty("title".to_string()))
        );
    }

    #[test]
    fn test_task_title_too_long() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        let result = validate_new_task(&task(&long));
        assert!(matches!(result, Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn test_days_tokens() {
        assert!(validate_days("Once").is_ok());
        assert!(validate_days("Mon-Fri").is_ok());
        assert!(validate_days("mon,wed,fri").is_ok());
        assert!(validate_days("").is_err());
        assert!(validate_days("mon,,fri").is_err());
    }

    #[test]
    fn test_alarm_without_days_is_valid() {
        let alarm = NewAlarm {
            title: "Alarm".to_string(),
            time: Utc::now(),
            days: None,
            is_active: true,
        };
        assert!(validate_new_alarm(&alarm).is_ok());
    }

    #[test]
    fn test_user_validation() {
        let ok = NewUser {
            username: "demo".to_string(),
            name: Some("Alex".to_string()),
            email: Some("alex@example.com".to_string()),
        };
        assert!(validate_new_user(&ok).is_ok());

        let spaced = NewUser {
            username: "two words".to_string(),
            ..ok.clone()
        };
        assert!(validate_new_user(&spaced).is_err());

        let bad_email = NewUser {
            email: Some("nope".to_string()),
            ..ok
        };
        assert!(validate_new_user(&bad_email).is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(validate_task_patch(&TaskPatch::default()).is_ok());
        assert!(validate_alarm_patch(&AlarmPatch::default()).is_ok());
        assert!(validate_category_patch(&CategoryPatch::default()).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 5,
            actual: 9,
        };
        assert_eq!(err.to_string(), "title is too long (9 chars, max 5)");
    }
}
