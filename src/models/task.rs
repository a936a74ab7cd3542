use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Delayed,
}

/// A todo item on a student's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "id")]
    pub task_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub due_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub course_code: Option<String>,
}

/// A task assigned by faculty to every student of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<OffsetDateTime>,
    pub course_code: String,
    pub section_number: i32,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn status_defaults_to_pending() {
        let task: Task = serde_json::from_str(r#"{"id":1,"title":"Read ch. 3"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn odd_due_dates_do_not_fail_the_list() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[
                {"id":1,"title":"A","due_date":"2026-11-01"},
                {"id":2,"title":"B","due_date":"2026-11-01 09:30:00"},
                {"id":3,"title":"C","due_date":"someday"},
                {"id":4,"title":"D","due_date":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(tasks[0].due_date, Some(datetime!(2026-11-01 0:00 UTC)));
        assert_eq!(tasks[1].due_date, Some(datetime!(2026-11-01 9:30 UTC)));
        assert_eq!(tasks[2].due_date, None);
        assert_eq!(tasks[3].due_date, None);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::Delayed).unwrap(), "\"delayed\"");
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
    }
}
