//! Role pages: each composes backend calls into one JSON view model.
//!
//! Handlers run as the user in the `user` cookie. Role checks are the route
//! guard's job; by the time a handler runs the path already matches the
//! user's role.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use time::OffsetDateTime;

use super::error::WebError;
use super::extractor::CurrentUser;
use super::state::AppState;
use crate::api::ApiError;
use crate::models::{Course, FacultyDashboard, Section, StudentDashboard, Task, TaskStatus};
use crate::views::tasks::{newly_delayed, partition, toggle};
use crate::views::{Leaderboard, TaskBoard, WeeklySchedule};

pub(super) fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/student", get(student_dashboard))
        .route("/student/todo", get(student_todo))
        .route("/student/todo/{task_id}", post(toggle_task))
        .route("/student/schedule", get(schedule))
        .route("/student/leaderboard", get(leaderboard))
        .route("/faculty", get(faculty_dashboard))
        .route("/faculty/tasks", get(faculty_tasks))
        .route("/faculty/schedule", get(schedule))
        .route("/admin/dashboard", get(admin_dashboard))
}

type Page<T> = Result<Json<T>, WebError>;

// ── Student ────────────────────────────────────────────────────────

async fn student_dashboard(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<StudentDashboard> {
    Ok(Json(state.api_as(&me).student_dashboard().await?))
}

/// Todo list bucketed by effective status. Tasks that went overdue since
/// the last visit are marked delayed on the backend; a failed update only
/// costs a warning since the board shows them delayed anyway.
async fn student_todo(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<TaskBoard> {
    let api = state.api_as(&me);
    let tasks = api.student_tasks().await?;
    let now = OffsetDateTime::now_utc();

    for task_id in newly_delayed(&tasks, now) {
        if let Err(e) = api.update_task_status(task_id, TaskStatus::Delayed).await {
            tracing::warn!(task_id, error = %e, "Failed to mark task delayed");
        }
    }

    Ok(Json(partition(tasks, now)))
}

/// Tick or untick one task and return the updated board.
async fn toggle_task(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    Path(task_id): Path<i64>,
) -> Page<TaskBoard> {
    let api = state.api_as(&me);
    let mut tasks = api.student_tasks().await?;
    let now = OffsetDateTime::now_utc();

    let task = tasks
        .iter_mut()
        .find(|t| t.task_id == task_id)
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;
    let status = toggle(task, now);
    api.update_task_status(task_id, status).await?;
    task.status = status;

    Ok(Json(partition(tasks, now)))
}

async fn leaderboard(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<Leaderboard> {
    Ok(Json(state.api_as(&me).leaderboard().await?))
}

// ── Faculty ────────────────────────────────────────────────────────

async fn faculty_dashboard(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<FacultyDashboard> {
    Ok(Json(state.api_as(&me).faculty_dashboard().await?))
}

async fn faculty_tasks(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<Vec<Task>> {
    Ok(Json(state.api_as(&me).faculty_tasks().await?))
}

// ── Shared ─────────────────────────────────────────────────────────

async fn schedule(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<WeeklySchedule> {
    Ok(Json(state.api_as(&me).schedule().await?))
}

// ── Admin ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AdminOverview {
    courses: Vec<Course>,
    sections: Vec<Section>,
}

async fn admin_dashboard(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
) -> Page<AdminOverview> {
    let api = state.api_as(&me);
    let (courses, sections) = tokio::join!(api.all_courses(), api.all_sections());
    Ok(Json(AdminOverview {
        courses: courses?,
        sections: sections?,
    }))
}
