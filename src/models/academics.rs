use serde::{Deserialize, Serialize};

use super::{Announcement, Task};
use crate::types::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One offering of a course, identified by `(course_code, section_number)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub course_code: String,
    pub section_number: i32,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub faculty_id: Option<UserId>,
    #[serde(default)]
    pub faculty_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSection {
    pub course_code: String,
    pub section_number: i32,
    pub faculty_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// A student's grade as seen by the section's faculty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub student_id: UserId,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGrade {
    pub student_id: UserId,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One graded item of the signed-in student's own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyGrade {
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDashboard {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacultyDashboard {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_tolerates_missing_collections() {
        let dashboard: StudentDashboard = serde_json::from_str("{}").unwrap();
        assert_eq!(dashboard, StudentDashboard::default());
    }

    #[test]
    fn section_parses_minimal_payload() {
        let section: Section =
            serde_json::from_str(r#"{"course_code":"CS101","section_number":2}"#).unwrap();
        assert_eq!(section.course_code, "CS101");
        assert_eq!(section.section_number, 2);
        assert_eq!(section.faculty_id, None);
    }

    #[test]
    fn new_course_omits_empty_optionals() {
        let course = NewCourse {
            course_code: "CS101".into(),
            course_name: "Intro".into(),
            credits: None,
            description: None,
        };
        assert_eq!(
            serde_json::to_string(&course).unwrap(),
            r#"{"course_code":"CS101","course_name":"Intro"}"#
        );
    }
}
