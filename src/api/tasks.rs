use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::{NewTask, Task, TaskStatus};
use crate::types::Role;

#[derive(Serialize)]
struct StatusChange {
    status: TaskStatus,
}

impl ApiClient {
    /// The signed-in student's todo list.
    pub async fn student_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let me = self.require_session()?;
        let path = format!("/students/{}/tasks", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "student tasks").await
    }

    /// Tasks the signed-in faculty member has assigned.
    pub async fn faculty_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let me = self.require_session()?;
        let path = format!("/faculty/{}/tasks", me.user_id);
        let request = self.request_as(&me, Method::GET, &path)?;
        self.send_list(request, "faculty tasks").await
    }

    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<(), ApiError> {
        let me = self.require_session()?;
        let path = format!("/tasks/{task_id}");
        let request = self
            .request_as(&me, Method::PATCH, &path)?
            .json(&StatusChange { status });
        self.send_empty(request, "update task status").await
    }

    /// Assign a task to a section. Faculty only.
    pub async fn create_task(&self, task: &NewTask) -> Result<(), ApiError> {
        let me = self.require_role(Role::Faculty)?;
        if task.title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".into()));
        }
        let path = format!("/faculty/{}/tasks", me.user_id);
        let request = self.request_as(&me, Method::POST, &path)?.json(task);
        self.send_empty(request, "create task").await?;
        tracing::info!(
            course_code = %task.course_code,
            section_number = task.section_number,
            "Task assigned"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionRecord;

    #[test]
    fn status_change_body() {
        let body = serde_json::to_string(&StatusChange {
            status: TaskStatus::Completed,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"completed"}"#);
    }

    #[tokio::test]
    async fn students_cannot_assign_tasks() {
        let api = ApiClient::new("http://127.0.0.1:9".parse().unwrap())
            .with_session(SessionRecord::new(3, "S", "s@x.com", Role::Student));
        let task = NewTask {
            title: "Lab 1".into(),
            description: None,
            due_date: None,
            course_code: "CS101".into(),
            section_number: 1,
        };
        assert!(matches!(api.create_task(&task).await, Err(ApiError::Forbidden(_))));
    }
}
