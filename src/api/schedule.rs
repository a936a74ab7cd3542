use std::collections::BTreeMap;

use reqwest::Method;
use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::models::{Day, ScheduleEntry};
use crate::views::{WeeklySchedule, group_by_day};

/// A meeting inside a day-keyed payload, where the day is the key.
#[derive(Deserialize)]
struct Slot {
    start_time: String,
    end_time: String,
    course_code: String,
    #[serde(default)]
    section_number: Option<i32>,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default)]
    room: Option<String>,
}

/// The backend sends either a flat list or a map keyed by day.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchedulePayload {
    Flat(Vec<ScheduleEntry>),
    ByDay(BTreeMap<Day, Vec<Slot>>),
}

impl SchedulePayload {
    fn into_entries(self) -> Vec<ScheduleEntry> {
        match self {
            Self::Flat(entries) => entries,
            Self::ByDay(days) => days
                .into_iter()
                .flat_map(|(day, slots)| {
                    slots.into_iter().map(move |slot| ScheduleEntry {
                        day,
                        start_time: slot.start_time,
                        end_time: slot.end_time,
                        course_code: slot.course_code,
                        section_number: slot.section_number,
                        course_name: slot.course_name,
                        room: slot.room,
                    })
                })
                .collect(),
        }
    }
}

impl ApiClient {
    /// The signed-in user's weekly timetable. No schedule yet is an empty
    /// week.
    pub async fn schedule(&self) -> Result<WeeklySchedule, ApiError> {
        let me = self.require_session()?;
        let path = format!("/schedule/{}", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        match self.send::<SchedulePayload>(request, "schedule").await {
            Ok(payload) => Ok(group_by_day(payload.into_entries())),
            Err(ApiError::NotFound(_)) => Ok(WeeklySchedule::default()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_and_grouped_payloads_agree() {
        let flat: SchedulePayload = serde_json::from_str(
            r#"[
                {"day":"Tuesday","start_time":"10:00","end_time":"11:00","course_code":"CS101"},
                {"day":"Monday","start_time":"09:00","end_time":"10:00","course_code":"MA101"}
            ]"#,
        )
        .unwrap();
        let grouped: SchedulePayload = serde_json::from_str(
            r#"{
                "Monday":[{"start_time":"09:00","end_time":"10:00","course_code":"MA101"}],
                "Tuesday":[{"start_time":"10:00","end_time":"11:00","course_code":"CS101"}]
            }"#,
        )
        .unwrap();

        let flat = group_by_day(flat.into_entries());
        let grouped = group_by_day(grouped.into_entries());
        assert_eq!(flat, grouped);
        assert_eq!(flat.day(Day::Monday)[0].course_code, "MA101");
    }
}
