use reqwest::Method;

use super::{ApiClient, ApiError, segment};
use crate::models::{GradeEntry, MyGrade, NewGrade};

impl ApiClient {
    /// Grade sheet of a section, as seen by its faculty.
    pub async fn section_grades(
        &self,
        course_code: &str,
        section_number: i32,
    ) -> Result<Vec<GradeEntry>, ApiError> {
        let me = self.require_session()?;
        let path = format!("/sections/{}/{section_number}/grades", segment(course_code));
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "section grades").await
    }

    /// Submit grades for a section in one batch.
    pub async fn submit_grades(
        &self,
        course_code: &str,
        section_number: i32,
        grades: &[NewGrade],
    ) -> Result<(), ApiError> {
        let me = self.require_session()?;
        if grades.is_empty() {
            return Err(ApiError::Validation("No grades to submit".into()));
        }
        if grades.iter().any(|g| g.grade.trim().is_empty()) {
            return Err(ApiError::Validation("Every student needs a grade".into()));
        }
        let path = format!("/sections/{}/{section_number}/grades", segment(course_code));
        let request = self.request_as(&me, Method::POST, &path)?.json(grades);
        self.send_empty(request, "submit grades").await?;
        tracing::info!(course_code, section_number, count = grades.len(), "Grades submitted");
        Ok(())
    }

    /// The signed-in student's own grades in a section.
    pub async fn my_grades(
        &self,
        course_code: &str,
        section_number: i32,
    ) -> Result<Vec<MyGrade>, ApiError> {
        let me = self.require_session()?;
        let path = format!("/my-grades/{}/{section_number}", segment(course_code));
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "my grades").await
    }
}
