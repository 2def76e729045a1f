//! Pairwise comparison endpoints.

use linkd_core::{EloPair, Profile, VoteOutcome, VoteRequest, VoteResult};
use serde::Deserialize;

use crate::client::LinkdClient;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct PairResponse {
    profiles: Vec<Profile>,
}

impl LinkdClient {
    /// Fetches a random pair of profiles to compare.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    /// - [`ClientError::Deserialize`] if the body does not hold exactly two profiles.
    pub async fn elo_pair(&self) -> Result<EloPair, ClientError> {
        let url = self.endpoint("api/elo/pair", &[]);
        let response: PairResponse = self.get_json(url, "elo pair").await?;

        let count = response.profiles.len();
        let mut profiles = response.profiles.into_iter();
        match (profiles.next(), profiles.next(), profiles.next()) {
            (Some(left), Some(right), None) => Ok(EloPair { left, right }),
            _ => Err(ClientError::Deserialize {
                context: "elo pair".to_owned(),
                source: <serde_json::Error as serde::de::Error>::invalid_length(
                    count,
                    &"exactly two profiles",
                ),
            }),
        }
    }

    /// Records a vote between two profiles and returns the updated ratings.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if both ids are the same or blank.
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn elo_vote(
        &self,
        profile_id_a: &str,
        profile_id_b: &str,
        result: VoteOutcome,
    ) -> Result<VoteResult, ClientError> {
        if profile_id_a.trim().is_empty() || profile_id_b.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "both profile ids are required".to_owned(),
            ));
        }
        if profile_id_a == profile_id_b {
            return Err(ClientError::InvalidRequest(format!(
                "cannot compare profile '{profile_id_a}' with itself"
            )));
        }

        let url = self.endpoint("api/elo/vote", &[]);
        tracing::debug!(%url, profile_id_a, profile_id_b, %result, "POST vote");
        let body = VoteRequest {
            profile_id_a: profile_id_a.to_owned(),
            profile_id_b: profile_id_b.to_owned(),
            result,
        };
        let request = self.client.post(url).json(&body);
        self.send_json(
            request,
            &format!("elo vote({profile_id_a} vs {profile_id_b})"),
        )
        .await
    }
}
