use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Day, ScheduleEntry};

/// Weekly timetable, Monday to Sunday. Days without classes are present
/// and empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, Vec<ScheduleEntry>>,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            days: Day::WEEK.into_iter().map(|day| (day, Vec::new())).collect(),
        }
    }
}

impl WeeklySchedule {
    #[must_use]
    pub fn day(&self, day: Day) -> &[ScheduleEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Days in week order, with their entries sorted by start time.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &[ScheduleEntry])> {
        self.days.iter().map(|(day, entries)| (*day, entries.as_slice()))
    }

    /// Total number of meetings in the week.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `HH:MM` (or `HH:MM:SS`) as minutes after midnight.
fn minutes(time: &str) -> Option<u32> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let mins: u32 = parts.next().unwrap_or("0").parse().ok()?;
    (hours < 24 && mins < 60).then_some(hours * 60 + mins)
}

/// Bucket entries by day, each day sorted by start time. Unparseable start
/// times sort after every valid one.
#[must_use]
pub fn group_by_day(entries: impl IntoIterator<Item = ScheduleEntry>) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();
    for entry in entries {
        schedule.days.entry(entry.day).or_default().push(entry);
    }
    for day in schedule.days.values_mut() {
        day.sort_by_key(|e| (minutes(&e.start_time).unwrap_or(u32::MAX), e.course_code.clone()));
    }
    schedule
}
