//! Rating leaderboard endpoint.

use linkd_core::LeaderboardEntry;
use serde::Deserialize;

use crate::client::LinkdClient;
use crate::error::ClientError;

/// Largest page the server will return.
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    leaderboard: Vec<LeaderboardEntry>,
}

impl LinkdClient {
    /// Fetches leaderboard entries ordered by rating, highest first.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn leaderboard(
        &self,
        limit: u32,
        skip: u32,
    ) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT).to_string();
        let skip = skip.to_string();
        let url = self.endpoint("api/leaderboard", &[("limit", &limit), ("skip", &skip)]);
        let response: LeaderboardResponse = self.get_json(url, "leaderboard").await?;
        Ok(response.leaderboard)
    }
}
