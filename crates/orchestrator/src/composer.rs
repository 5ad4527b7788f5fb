//! Assistant reply composition.

use chrono::{DateTime, Local, Utc};

use crate::intent::{Extraction, Intent, Strategy};

/// Reply when nothing actionable was found.
pub const CLARIFICATION_PROMPT: &str = "I understand you need assistance. Could you please provide more details about what you'd like me to help you with?";

/// Reply when extraction itself failed.
pub const FAILSAFE_REPLY: &str = "Sorry, I couldn't process that just now. Could you try rephrasing your request?";

const FOLLOW_UP: &str = "Is there anything else you need?";

/// 12-hour clock in local time, e.g. "02:00 PM".
pub fn format_time(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%I:%M %p").to_string()
}

/// Produce the reply text for a turn. Never empty.
///
/// Non-empty model text wins. Otherwise the reply describes the created
/// entity, or asks for more detail.
pub fn compose_reply(extraction: &Extraction) -> String {
    if let Some(reply) = extraction.model_reply.as_deref().map(str::trim) {
        if !reply.is_empty() {
            return reply.to_string();
        }
    }

    match (&extraction.intent, extraction.strategy) {
        (Intent::CreateTask(task), _) => format!(
            "I've added a task for {} at {}. {}",
            task.title,
            format_time(task.date),
            FOLLOW_UP
        ),
        (Intent::CreateAlarm(alarm), _) => {
            format!("I've set an alarm for {}. {}", format_time(alarm.time), FOLLOW_UP)
        }
        (Intent::None, Strategy::Degraded) => FAILSAFE_REPLY.to_string(),
        (Intent::None, _) => CLARIFICATION_PROMPT.to_string(),
    }
}
