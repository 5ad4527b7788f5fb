//! Keyword and regex intent extraction, used when no language model is
//! configured or the model call fails.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use database::validation::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use database::{NewAlarm, NewTask};
use regex::Regex;

use crate::intent::Intent;

/// Substrings that mark a task request.
pub const TASK_KEYWORDS: &[&str] = &["schedule", "task", "appointment", "meeting", "remind me to"];

/// Substrings that mark an alarm request.
pub const ALARM_KEYWORDS: &[&str] = &["alarm", "reminder", "wake me", "alert"];

/// Title given to every lexically extracted alarm.
pub const ALARM_TITLE: &str = "Alarm";

/// Recurrence given to every lexically extracted alarm.
pub const DEFAULT_DAYS: &str = "Once";

const TITLE_WORDS: usize = 4;
const ELLIPSIS: &str = "...";

// First match wins: "at 7am", "9:30 pm", "14:05".
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?\s*(am|pm)?").expect("Invalid regex")
});

/// Keyword classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Task,
    Alarm,
    None,
}

/// Classify an utterance by keyword. Task keywords are checked first, so an
/// utterance matching both sets is a task.
pub fn classify(utterance: &str) -> Classification {
    let lower = utterance.to_lowercase();

    if TASK_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Classification::Task
    } else if ALARM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Classification::Alarm
    } else {
        Classification::None
    }
}

/// Find the first time token and convert it to a 24-hour time of day.
///
/// Returns None when there is no token or the token is not a valid time
/// (e.g. "45" or "9:75").
pub fn parse_time_of_day(utterance: &str) -> Option<NaiveTime> {
    let caps = TIME_PATTERN.captures(utterance)?;

    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// First four whitespace-separated words followed by an ellipsis, clipped
/// so the whole title fits the store's title limit.
pub fn derive_title(utterance: &str) -> String {
    let words: Vec<&str> = utterance.split_whitespace().take(TITLE_WORDS).collect();
    let words = words.join(" ");
    format!("{}{}", clip(&words, MAX_TITLE_LENGTH - ELLIPSIS.len()), ELLIPSIS)
}

/// Longest prefix of `text` with at most `max` chars.
fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Whether the utterance asks for the next day.
pub fn mentions_tomorrow(utterance: &str) -> bool {
    utterance.to_lowercase().contains("tomorrow")
}

/// Combine `now` with an optional time of day and a day offset.
///
/// Without a time the current wall-clock time is kept. A local time that
/// does not exist (DST gap) falls back to `now`.
pub fn resolve_instant(now: DateTime<Local>, time: Option<NaiveTime>, days: i64) -> DateTime<Utc> {
    let base = now.naive_local();
    let naive = match time {
        Some(t) => base.date().and_time(t),
        None => base,
    } + Duration::days(days);

    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc)
}

/// Extract an intent without a language model.
///
/// Empty or whitespace-only input has no intent. Task drafts carry no
/// category; the orchestrator assigns the owner's default.
pub fn extract(utterance: &str, now: DateTime<Local>) -> Intent {
    if utterance.trim().is_empty() {
        return Intent::None;
    }

    match classify(utterance) {
        Classification::Task => {
            let days = if mentions_tomorrow(utterance) { 1 } else { 0 };
            let date = resolve_instant(now, parse_time_of_day(utterance), days);

            Intent::CreateTask(NewTask {
                title: derive_title(utterance),
                description: Some(clip(utterance, MAX_DESCRIPTION_LENGTH).to_string()),
                date,
                completed: false,
                category_id: None,
            })
        }
        Classification::Alarm => Intent::CreateAlarm(NewAlarm {
            title: ALARM_TITLE.to_string(),
            time: resolve_instant(now, parse_time_of_day(utterance), 0),
            days: Some(DEFAULT_DAYS.to_string()),
            is_active: true,
        }),
        Classification::None => Intent::None,
    }
}
