//! Views derived on the client from wholesale backend payloads.

pub mod leaderboard;
pub mod schedule;
pub mod tasks;

pub use leaderboard::{Leaderboard, POINT_RULES, PointRule, RankedEntry};
pub use schedule::{WeeklySchedule, group_by_day};
pub use tasks::TaskBoard;
