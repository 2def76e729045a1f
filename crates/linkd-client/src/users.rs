//! Signed-in user's profile endpoints, keyed by email.

use linkd_core::{Profile, ProfileUpdate};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::client::{ensure_success, LinkdClient};
use crate::error::ClientError;

/// The users router answers with `{ profile }`; some deployments return the
/// profile object itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Wrapped { profile: Profile },
    Bare(Profile),
}

impl ProfileResponse {
    fn into_profile(self) -> Profile {
        match self {
            ProfileResponse::Wrapped { profile } | ProfileResponse::Bare(profile) => profile,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExistsResponse {
    exists: bool,
}

fn require_email(email: &str) -> Result<&str, ClientError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::InvalidRequest(format!(
            "'{email}' is not an email address"
        )));
    }
    Ok(email)
}

impl LinkdClient {
    /// Fetches the profile registered under `email`. `None` on 404.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if `email` is not an address.
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on any other request failure.
    /// - [`ClientError::Deserialize`] if the body is not a profile.
    pub async fn user_profile(&self, email: &str) -> Result<Option<Profile>, ClientError> {
        let email = require_email(email)?;
        let url = self.endpoint("api/users/profile", &[("email", email)]);
        tracing::debug!(%url, "GET profile");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.request_timeout)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        let body = response.text().await?;
        let parsed: ProfileResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: "user profile".to_owned(),
                source: e,
            })?;
        Ok(Some(parsed.into_profile()))
    }

    /// Applies a partial update to the profile registered under `email`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if `email` is not an address or the
    ///   update changes nothing.
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    /// - [`ClientError::Deserialize`] if the body is not a profile.
    pub async fn update_user_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError> {
        let email = require_email(email)?;
        if update.is_empty() {
            return Err(ClientError::InvalidRequest(
                "profile update has no fields to change".to_owned(),
            ));
        }

        let url = self.endpoint("api/users/profile", &[("email", email)]);
        tracing::debug!(%url, "PUT profile");
        let request = self.client.put(url).json(update);
        let response: ProfileResponse = self.send_json(request, "user profile update").await?;
        Ok(response.into_profile())
    }

    /// Deletes the account registered under `email`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if `email` is not an address.
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    pub async fn delete_user_profile(&self, email: &str) -> Result<(), ClientError> {
        let email = require_email(email)?;
        let url = self.endpoint("api/users/profile", &[("email", email)]);
        tracing::debug!(%url, "DELETE profile");
        let response = self
            .client
            .delete(url)
            .timeout(self.request_timeout)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Whether an account exists for `email`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if `email` is not an address.
    /// - [`ClientError::Status`] / [`ClientError::RateLimited`] / [`ClientError::Http`]
    ///   on request failure.
    /// - [`ClientError::Deserialize`] if the body is not `{ exists }`.
    pub async fn user_exists(&self, email: &str) -> Result<bool, ClientError> {
        let email = require_email(email)?;
        let url = self.endpoint("api/users/check", &[("email", email)]);
        let response: ExistsResponse = self.get_json(url, "user check").await?;
        Ok(response.exists)
    }
}
