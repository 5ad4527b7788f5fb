//! Parsing of the JSON object a model embeds in its free-text reply.
//!
//! The model answers in natural language and may append one object such as
//! `{"type": "task", "title": "Dentist", "date": "2025-03-11T14:00"}`. This
//! module finds that object, removes it from the text shown to the user and
//! turns it into an [`Intent`].

use std::ops::Range;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use database::{NewAlarm, NewTask, ValidationError};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::intent::Intent;
use crate::lexical::DEFAULT_DAYS;

/// The object a model may embed in its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub days: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i64>,
}

// Models write recurrence as "Mon-Fri" or ["Mon", "Wed"]; lists are joined
// with commas. Anything else counts as absent.
fn lenient_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Days {
        One(String),
        Many(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match Option::<Days>::deserialize(deserializer)? {
        Some(Days::One(days)) => Some(days),
        Some(Days::Many(list)) => Some(
            list.iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(Days::Other(_)) | None => None,
    })
}

// Accepts 2 or "2". Anything else counts as absent and the owner's default
// category applies.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Number(id)) => Some(id),
        Some(Id::Text(id)) => id.trim().parse().ok(),
        Some(Id::Other(_)) | None => None,
    })
}

/// A model reply split into display text and an optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// No object in the reply.
    Plain(String),
    /// An object was found and parsed; `text` has it removed.
    Payload { text: String, payload: ModelPayload },
    /// Something that looked like an object failed to parse. `text` is the
    /// raw reply, untouched.
    Malformed { text: String, error: String },
}

/// Split a raw model reply into display text and payload.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let Some(span) = find_object_span(raw) else {
        return ParsedReply::Plain(raw.trim().to_string());
    };

    match serde_json::from_str::<ModelPayload>(&raw[span.clone()]) {
        Ok(payload) => ParsedReply::Payload {
            text: strip_span(raw, span),
            payload,
        },
        Err(e) => ParsedReply::Malformed {
            text: raw.trim().to_string(),
            error: e.to_string(),
        },
    }
}

/// Byte range of the first `{...}` object in `text`.
///
/// Braces inside JSON strings are ignored. If the first object never closes,
/// the span runs to the last `}` in the text.
pub fn find_object_span(text: &str) -> Option<Range<usize>> {
    let start = text.find('{')?;
    let rest = &text[start..];

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in rest.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
            }
            '{' if !in_string => {
                depth += 1;
            }
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + i + 1);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| start..end + 1)
}

// Removes the object and any markdown fence left empty around it.
fn strip_span(raw: &str, span: Range<usize>) -> String {
    let mut before = raw[..span.start].trim_end();
    let mut after = raw[span.end..].trim_start();

    if after.starts_with("```") {
        if let Some(stripped) = before
            .strip_suffix("```json")
            .or_else(|| before.strip_suffix("```"))
        {
            before = stripped.trim_end();
            after = after[3..].trim_start();
        }
    }

    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{}\n{}", before, after),
    }
}

/// Parse an instant the way models tend to write them.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD HH:MM[:SS]` in
/// local time, a bare date (local midnight) and a bare time (today).
pub fn parse_instant(value: &str, now: DateTime<Local>) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return local_to_utc(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return local_to_utc(date.and_hms_opt(0, 0, 0)?);
    }

    const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p"];
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(value, format) {
            return local_to_utc(now.date_naive().and_time(time));
        }
    }

    None
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::Empty(field.to_string()))
}

fn instant(field: &str, value: &str, now: DateTime<Local>) -> Result<DateTime<Utc>, ValidationError> {
    parse_instant(value, now).ok_or_else(|| ValidationError::Invalid {
        field: field.to_string(),
        reason: format!("unrecognized date/time {:?}", value),
    })
}

impl ModelPayload {
    /// Convert to an intent. Unknown or missing `type` means no intent; a
    /// task or alarm missing its title or instant is a validation error.
    pub fn into_intent(self, now: DateTime<Local>) -> Result<Intent, ValidationError> {
        let kind = self.kind.as_deref().map(str::to_ascii_lowercase);

        match kind.as_deref() {
            Some("task") => {
                let title = required("title", self.title.as_deref())?;
                let when = required("date", self.date.as_deref().or(self.time.as_deref()))?;

                Ok(Intent::CreateTask(NewTask {
                    title: title.to_string(),
                    description: self.description.filter(|d| !d.trim().is_empty()),
                    date: instant("date", when, now)?,
                    completed: false,
                    category_id: self.category_id,
                }))
            }
            Some("alarm") => {
                let title = required("title", self.title.as_deref())?;
                let when = required("time", self.time.as_deref().or(self.date.as_deref()))?;
                let days = self
                    .days
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DAYS.to_string());

                Ok(Intent::CreateAlarm(NewAlarm {
                    title: title.to_string(),
                    time: instant("time", when, now)?,
                    days: Some(days),
                    is_active: true,
                }))
            }
            _ => Ok(Intent::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_object_span_clean() {
        let text = r#"{"type": "task"}"#;
        assert_eq!(find_object_span(text), Some(0..text.len()));
    }

    #[test]
    fn test_object_span_trailing_braces() {
        let text = r#"Sure! {"type": "alarm", "meta": {"a": 1}}} bye"#;
        let span = find_object_span(text).unwrap();
        assert_eq!(&text[span], r#"{"type": "alarm", "meta": {"a": 1}}"#);
    }

    #[test]
    fn test_object_span_braces_in_strings() {
        let text = r#"ok {"title": "fix } and {", "type": "task"}"#;
        let span = find_object_span(text).unwrap();
        assert_eq!(&text[span], r#"{"title": "fix } and {", "type": "task"}"#);
    }

    #[test]
    fn test_object_span_unbalanced_uses_last_brace() {
        let text = r#"x {"a": {"b": 1} y"#;
        let span = find_object_span(text).unwrap();
        assert_eq!(&text[span], r#"{"a": {"b": 1}"#);
    }

    #[test]
    fn test_object_span_absent() {
        assert_eq!(find_object_span("no json here"), None);
        assert_eq!(find_object_span("open { only"), None);
    }

    #[test]
    fn test_parse_reply_strips_object() {
        let raw = "I've added your dentist visit.\n{\"type\": \"task\", \"title\": \"Dentist\", \"date\": \"2025-03-11T14:00\"}";
        let ParsedReply::Payload { text, payload } = parse_reply(raw) else {
            panic!("expected payload");
        };
        assert_eq!(text, "I've added your dentist visit.");
        assert_eq!(payload.kind.as_deref(), Some("task"));
        assert_eq!(payload.title.as_deref(), Some("Dentist"));
    }

    #[test]
    fn test_parse_reply_strips_code_fence() {
        let raw = "Alarm set.\n```json\n{\"type\": \"alarm\", \"title\": \"Wake\", \"time\": \"07:00\"}\n```\nAnything else?";
        let ParsedReply::Payload { text, .. } = parse_reply(raw) else {
            panic!("expected payload");
        };
        assert_eq!(text, "Alarm set.\nAnything else?");
    }

    #[test]
    fn test_parse_reply_malformed_keeps_raw_text() {
        let raw = "Here you go {type: task, oops} ";
        match parse_reply(raw) {
            ParsedReply::Malformed { text, .. } => assert_eq!(text, "Here you go {type: task, oops}"),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reply_plain() {
        assert_eq!(
            parse_reply("  Hello there!  "),
            ParsedReply::Plain("Hello there!".to_string())
        );
    }

    #[test]
    fn test_parse_instant_formats() {
        let rfc = parse_instant("2025-03-11T14:00:00Z", now()).unwrap();
        assert_eq!(rfc, Utc.with_ymd_and_hms(2025, 3, 11, 14, 0, 0).unwrap());

        for value in ["2025-03-11T14:00", "2025-03-11 14:00:00", "2025-03-11 14:00"] {
            let local = parse_instant(value, now()).unwrap().with_timezone(&Local);
            assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
            assert_eq!((local.hour(), local.minute()), (14, 0), "{}", value);
        }

        let midnight = parse_instant("2025-03-12", now()).unwrap().with_timezone(&Local);
        assert_eq!((midnight.hour(), midnight.minute()), (0, 0));

        let today = parse_instant("07:30", now()).unwrap().with_timezone(&Local);
        assert_eq!(today.date_naive(), now().date_naive());
        assert_eq!((today.hour(), today.minute()), (7, 30));

        assert!(parse_instant("next tuesday", now()).is_none());
    }

    #[test]
    fn test_task_payload_into_intent() {
        let payload = ModelPayload {
            kind: Some("Task".to_string()),
            title: Some("Dentist".to_string()),
            date: Some("2025-03-11T14:00".to_string()),
            description: Some("".to_string()),
            category_id: Some(2),
            ..Default::default()
        };

        let Intent::CreateTask(task) = payload.into_intent(now()).unwrap() else {
            panic!("expected task");
        };
        assert_eq!(task.title, "Dentist");
        assert_eq!(task.description, None);
        assert_eq!(task.category_id, Some(2));
    }

    #[test]
    fn test_alarm_payload_defaults_days() {
        let payload: ModelPayload =
            serde_json::from_str(r#"{"type": "alarm", "title": "Wake up", "time": "06:45"}"#).unwrap();

        let Intent::CreateAlarm(alarm) = payload.into_intent(now()).unwrap() else {
            panic!("expected alarm");
        };
        assert_eq!(alarm.days.as_deref(), Some("Once"));
        assert!(alarm.is_active);
    }

    #[test]
    fn test_loose_days_and_category_still_parse() {
        let raw = r#"Set! {"type": "alarm", "title": "Gym", "time": "07:00", "days": ["Mon", " Wed", ""], "categoryId": "2"}"#;
        let ParsedReply::Payload { text, payload } = parse_reply(raw) else {
            panic!("expected a payload");
        };
        assert_eq!(text, "Set!");
        assert_eq!(payload.days.as_deref(), Some("Mon,Wed"));
        assert_eq!(payload.category_id, Some(2));

        let payload: ModelPayload = serde_json::from_str(
            r#"{"type": "alarm", "title": "Gym", "time": "07:00", "days": 5, "categoryId": "work"}"#,
        )
        .unwrap();
        assert_eq!(payload.days, None);
        assert_eq!(payload.category_id, None);

        let payload: ModelPayload =
            serde_json::from_str(r#"{"type": "task", "days": null, "categoryId": 3}"#).unwrap();
        assert_eq!(payload.days, None);
        assert_eq!(payload.category_id, Some(3));

        let Intent::CreateAlarm(alarm) = serde_json::from_str::<ModelPayload>(
            r#"{"type": "alarm", "title": "Gym", "time": "07:00", "days": []}"#,
        )
        .unwrap()
        .into_intent(now())
        .unwrap() else {
            panic!("expected alarm");
        };
        assert_eq!(alarm.days.as_deref(), Some("Once"));
    }

    #[test]
    fn test_payload_missing_fields_rejected() {
        let no_title: ModelPayload =
            serde_json::from_str(r#"{"type": "task", "date": "2025-03-11"}"#).unwrap();
        assert_eq!(
            no_title.into_intent(now()),
            Err(ValidationError::Empty("title".to_string()))
        );

        let no_time: ModelPayload =
            serde_json::from_str(r#"{"type": "alarm", "title": "Wake"}"#).unwrap();
        assert_eq!(
            no_time.into_intent(now()),
            Err(ValidationError::Empty("time".to_string()))
        );

        let bad_date: ModelPayload =
            serde_json::from_str(r#"{"type": "task", "title": "X", "date": "soon"}"#).unwrap();
        assert!(matches!(
            bad_date.into_intent(now()),
            Err(ValidationError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unknown_type_is_no_intent() {
        let payload: ModelPayload = serde_json::from_str(r#"{"type": "chat"}"#).unwrap();
        assert_eq!(payload.into_intent(now()), Ok(Intent::None));
        assert_eq!(ModelPayload::default().into_intent(now()), Ok(Intent::None));
    }
}
