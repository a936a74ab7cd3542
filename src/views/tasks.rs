//! Todo-list status as the user sees it.
//!
//! The backend stores `pending`, `completed` or `delayed`. A pending task
//! whose due date has passed is shown as delayed even before the backend
//! is told.

use serde::Serialize;
use time::OffsetDateTime;

use crate::models::{Task, TaskStatus};

fn is_overdue(task: &Task, now: OffsetDateTime) -> bool {
    task.due_date.is_some_and(|due| due < now)
}

#[must_use]
pub fn effective_status(task: &Task, now: OffsetDateTime) -> TaskStatus {
    match task.status {
        TaskStatus::Pending if is_overdue(task, now) => TaskStatus::Delayed,
        status => status,
    }
}

/// Status after the user ticks or unticks the task.
///
/// Unticking an overdue task puts it back to delayed, not pending.
#[must_use]
pub fn toggle(task: &Task, now: OffsetDateTime) -> TaskStatus {
    match effective_status(task, now) {
        TaskStatus::Pending | TaskStatus::Delayed => TaskStatus::Completed,
        TaskStatus::Completed if is_overdue(task, now) => TaskStatus::Delayed,
        TaskStatus::Completed => TaskStatus::Pending,
    }
}

/// Tasks stored as pending that are now past due.
#[must_use]
pub fn newly_delayed(tasks: &[Task], now: OffsetDateTime) -> Vec<i64> {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending && is_overdue(t, now))
        .map(|t| t.task_id)
        .collect()
}

/// Tasks bucketed by effective status, each bucket ordered by due date
/// with undated tasks last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskBoard {
    pub pending: Vec<Task>,
    pub delayed: Vec<Task>,
    pub completed: Vec<Task>,
}

impl TaskBoard {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.delayed.len() + self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[must_use]
pub fn partition(tasks: Vec<Task>, now: OffsetDateTime) -> TaskBoard {
    let mut board = TaskBoard::default();
    for mut task in tasks {
        task.status = effective_status(&task, now);
        match task.status {
            TaskStatus::Pending => board.pending.push(task),
            TaskStatus::Delayed => board.delayed.push(task),
            TaskStatus::Completed => board.completed.push(task),
        }
    }
    for bucket in [&mut board.pending, &mut board.delayed, &mut board.completed] {
        bucket.sort_by_key(|t| (t.due_date.is_none(), t.due_date, t.task_id));
    }
    board
}
