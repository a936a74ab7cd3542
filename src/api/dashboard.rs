use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{FacultyDashboard, StudentDashboard};

impl ApiClient {
    /// Aggregated home page of the signed-in student.
    pub async fn student_dashboard(&self) -> Result<StudentDashboard, ApiError> {
        let me = self.require_session()?;
        let path = format!("/students/{}/dashboard", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send(request, "student dashboard").await
    }

    /// Aggregated home page of the signed-in faculty member.
    pub async fn faculty_dashboard(&self) -> Result<FacultyDashboard, ApiError> {
        let me = self.require_session()?;
        let path = format!("/faculty/{}/dashboard", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send(request, "faculty dashboard").await
    }
}
