use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::LeaderboardEntry;
use crate::views::Leaderboard;
use crate::views::leaderboard::rank;

impl ApiClient {
    /// Ranked leaderboard, with the signed-in user marked when present.
    pub async fn leaderboard(&self) -> Result<Leaderboard, ApiError> {
        let me = self.session();
        let request = match &me {
            Some(me) => self.request_as(me, Method::GET, "/leaderboard")?,
            None => self.request(Method::GET, "/leaderboard")?,
        };
        let entries: Vec<LeaderboardEntry> = self.send_list(request, "leaderboard").await?;
        Ok(rank(entries, me.map(|m| m.user_id)))
    }
}
