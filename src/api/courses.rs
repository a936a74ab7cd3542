use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{Course, NewCourse, NewSection, Section};
use crate::types::Role;

impl ApiClient {
    pub async fn all_courses(&self) -> Result<Vec<Course>, ApiError> {
        let request = self.request(Method::GET, "/all-courses")?;
        self.send_list(request, "all courses").await
    }

    pub async fn all_sections(&self) -> Result<Vec<Section>, ApiError> {
        let request = self.request(Method::GET, "/all-sections")?;
        self.send_list(request, "all sections").await
    }

    /// Admin only; other roles fail with [`ApiError::Forbidden`] without
    /// a request.
    pub async fn create_course(&self, course: &NewCourse) -> Result<(), ApiError> {
        let me = self.require_role(Role::Admin)?;
        if course.course_code.trim().is_empty() || course.course_name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Course code and name are required".into(),
            ));
        }
        let request = self
            .request_as(&me, Method::POST, "/create-course")?
            .json(course);
        self.send_empty(request, "create course").await?;
        tracing::info!(course_code = %course.course_code, "Course created");
        Ok(())
    }

    /// Admin only.
    pub async fn create_section(&self, section: &NewSection) -> Result<(), ApiError> {
        let me = self.require_role(Role::Admin)?;
        if section.course_code.trim().is_empty() || section.section_number < 1 {
            return Err(ApiError::Validation(
                "A course code and a positive section number are required".into(),
            ));
        }
        let request = self
            .request_as(&me, Method::POST, "/create-section")?
            .json(section);
        self.send_empty(request, "create section").await?;
        tracing::info!(
            course_code = %section.course_code,
            section_number = section.section_number,
            "Section created"
        );
        Ok(())
    }
}
