//! Backend resource shapes.
//!
//! Fetched on each page visit and held only in transient view state; none
//! of these are persisted by the client.

mod academics;
mod announcement;
mod leaderboard;
mod schedule;
mod task;
mod timestamp;

pub use academics::{
    Course, FacultyDashboard, GradeEntry, MyGrade, NewCourse, NewGrade, NewSection, Section,
    StudentDashboard,
};
pub use announcement::{Announcement, AnnouncementKind, AnnouncementUpdate, NewAnnouncement};
pub use leaderboard::LeaderboardEntry;
pub use schedule::{Day, ScheduleEntry};
pub use task::{NewTask, Task, TaskStatus};
