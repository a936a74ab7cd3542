use serde::Serialize;

use crate::models::LeaderboardEntry;
use crate::types::UserId;

/// How points are earned, as displayed next to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointRule {
    pub action: &'static str,
    pub points: i64,
}

pub const POINT_RULES: &[PointRule] = &[
    PointRule {
        action: "Complete a task before its deadline",
        points: 10,
    },
    PointRule {
        action: "Complete a task after its deadline",
        points: 5,
    },
    PointRule {
        action: "Let a task pass its deadline",
        points: -2,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub rules: &'static [PointRule],
    pub entries: Vec<RankedEntry>,
}

/// Order by points (highest first), then name; tied scores share a rank
/// and the next rank skips (1, 1, 3).
#[must_use]
pub fn rank(mut entries: Vec<LeaderboardEntry>, current_user: Option<UserId>) -> Leaderboard {
    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.entry.points == entry.points => prev.rank,
            _ => index + 1,
        };
        ranked.push(RankedEntry {
            rank,
            is_current_user: current_user == Some(entry.user_id),
            entry,
        });
    }

    Leaderboard {
        rules: POINT_RULES,
        entries: ranked,
    }
}
