use serde::{Deserialize, Serialize};

/// Day of the teaching week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(alias = "monday", alias = "Mon")]
    Monday,
    #[serde(alias = "tuesday", alias = "Tue")]
    Tuesday,
    #[serde(alias = "wednesday", alias = "Wed")]
    Wednesday,
    #[serde(alias = "thursday", alias = "Thu")]
    Thursday,
    #[serde(alias = "friday", alias = "Fri")]
    Friday,
    #[serde(alias = "saturday", alias = "Sat")]
    Saturday,
    #[serde(alias = "sunday", alias = "Sun")]
    Sunday,
}

impl Day {
    pub const WEEK: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];
}

/// One weekly meeting of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: Day,
    /// `HH:MM`, 24-hour.
    pub start_time: String,
    pub end_time: String,
    pub course_code: String,
    #[serde(default)]
    pub section_number: Option<i32>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}
