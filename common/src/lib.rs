// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a task within the system.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging (e.g., `println!("{:?}", task)`).
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `Task` instance directly
///   from a database result row.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Task {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "text")]
    pub text: String,

    #[sqlx(rename = "completed")]
    pub completed: bool,

    #[sqlx(rename = "priority")]
    pub priority: Priority,

    // Local wall-clock time, without a timezone. All timestamps in the
    // system are compared against the same local clock.
    #[sqlx(rename = "created_at")]
    pub created_at: NaiveDateTime,

    // `None` means no alarm is scheduled for this task.
    #[sqlx(rename = "alarm_time")]
    pub alarm_time: Option<NaiveDateTime>,
}

/// Task priority. Stored as lowercase TEXT in the database and exchanged
/// as lowercase strings over the API; anything outside the three known
/// values is rejected at deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(()),
        }
    }
}

/// Completion filter for task list queries.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Sort key for task list queries. Completed tasks always sort after
/// active ones and creation time is the final tie-break, whichever key
/// is selected.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Priority,
    Name,
    Date,
}

/// Event published by the alarm scheduler when a task's alarm fires.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AlarmFired {
    pub task_id: i64,
    pub text: String,
}

/// Structure used to receive task creation data from the API.
/// It's a good practice to separate database models (`Task`)
/// from API models (`CreateTaskPayload`), as they may have different fields.
#[derive(Deserialize, Debug)]
pub struct CreateTaskPayload {
    pub text: String,
    // Optional. If not provided, the task is created with normal priority.
    pub priority: Option<Priority>,
    // Optional. If not provided, the task has no alarm.
    pub alarm_time: Option<NaiveDateTime>,
}

/// Body for `PATCH /api/tasks/{id}/completed`.
#[derive(Deserialize, Debug)]
pub struct SetCompletedPayload {
    pub completed: bool,
}

/// Body for `PATCH /api/tasks/{id}/text`.
#[derive(Deserialize, Debug)]
pub struct UpdateTextPayload {
    pub text: String,
}

/// Body for `PATCH /api/tasks/{id}/priority`.
#[derive(Deserialize, Debug)]
pub struct UpdatePriorityPayload {
    pub priority: Priority,
}

/// Body for `PUT /api/tasks/{id}/alarm`.
#[derive(Deserialize, Debug)]
pub struct SetAlarmPayload {
    pub alarm_time: NaiveDateTime,
}

/// One record of a bulk import file.
///
/// Unlike the interactive payloads, the import path is lenient: only the
/// text is required, and an unknown priority string falls back to normal
/// instead of rejecting the whole file.
#[derive(Deserialize, Debug)]
pub struct ImportTaskRecord {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub alarm_time: Option<NaiveDateTime>,
}

impl ImportTaskRecord {
    /// Resolve the record's priority, falling back to normal for missing
    /// or unknown values.
    pub fn resolved_priority(&self) -> Priority {
        self.priority
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_roundtrip_strings() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("normal".parse::<Priority>(), Ok(Priority::Normal));
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(Priority::High.to_string(), "high");
        assert!("urgent".parse::<Priority>().is_err());
        assert!("High".parse::<Priority>().is_err()); // strict, lowercase only
    }

    #[test]
    fn test_import_record_lenient_priority() {
        let record: ImportTaskRecord =
            serde_json::from_str(r#"{ "text": "imported", "priority": "urgent" }"#).unwrap();
        assert_eq!(record.resolved_priority(), Priority::Normal);

        let record: ImportTaskRecord =
            serde_json::from_str(r#"{ "text": "imported", "priority": "high" }"#).unwrap();
        assert_eq!(record.resolved_priority(), Priority::High);

        let record: ImportTaskRecord = serde_json::from_str(r#"{ "text": "imported" }"#).unwrap();
        assert_eq!(record.resolved_priority(), Priority::Normal);
        assert!(!record.completed);
        assert!(record.alarm_time.is_none());
    }

    #[test]
    fn test_strict_payload_rejects_unknown_priority() {
        let result: Result<UpdatePriorityPayload, _> =
            serde_json::from_str(r#"{ "priority": "urgent" }"#);
        assert!(result.is_err());
    }
}
