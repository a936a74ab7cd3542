use reqwest::Method;

use super::{ApiClient, ApiError, segment};
use crate::models::{Announcement, AnnouncementUpdate, NewAnnouncement};

impl ApiClient {
    /// Announcements posted to one section. None yet is an empty list.
    pub async fn section_announcements(
        &self,
        course_code: &str,
        section_number: i32,
    ) -> Result<Vec<Announcement>, ApiError> {
        let me = self.require_session()?;
        let path = format!(
            "/sections/{}/{section_number}/announcements",
            segment(course_code)
        );
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "section announcements").await
    }

    /// Announcements across every section the signed-in student attends.
    pub async fn student_announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        let me = self.require_session()?;
        let path = format!("/students/{}/announcements", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "student announcements").await
    }

    /// Post to a section. The form is validated first: assignments,
    /// quizzes and exams need a deadline.
    pub async fn create_announcement(
        &self,
        course_code: &str,
        section_number: i32,
        announcement: &NewAnnouncement,
    ) -> Result<(), ApiError> {
        let me = self.require_session()?;
        announcement.validate()?;
        let path = format!(
            "/sections/{}/{section_number}/announcements",
            segment(course_code)
        );
        let request = self.request_as(&me, Method::POST, &path)?.json(announcement);
        self.send_empty(request, "create announcement").await?;
        tracing::info!(course_code, section_number, kind = announcement.kind.as_str(), "Announcement posted");
        Ok(())
    }

    pub async fn update_announcement(
        &self,
        announcement_id: i64,
        update: &AnnouncementUpdate,
    ) -> Result<(), ApiError> {
        let me = self.require_session()?;
        update.validate()?;
        let path = format!("/announcements/{announcement_id}");
        let request = self.request_as(&me, Method::PATCH, &path)?.json(update);
        self.send_empty(request, "update announcement").await
    }
}
