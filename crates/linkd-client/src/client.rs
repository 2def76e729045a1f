//! HTTP client for the alumni API.
//!
//! Wraps `reqwest` with base-URL handling, uniform non-2xx error extraction
//! and typed JSON decoding. Endpoint groups (search, generation, Elo,
//! leaderboard, user profiles) are implemented in sibling modules as further
//! `impl LinkdClient` blocks.

use std::time::Duration;

use linkd_core::{normalize_api_url, AppConfig};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Client for the alumni API.
///
/// JSON requests carry a per-request timeout. Generation streams do not,
/// since a healthy stream can outlive any fixed budget; only the connect
/// phase is bounded for them.
pub struct LinkdClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) request_timeout: Duration,
}

impl LinkdClient {
    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured URL is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client pointed at `base_url` (for testing with wiremock).
    ///
    /// The URL is normalised the same way configuration is: trailing slashes
    /// are dropped and `http://` is upgraded to `https://` for non-local hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = normalize_api_url(base_url).ok_or_else(|| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: "expected an http(s) URL".to_owned(),
        })?;

        // A trailing slash makes `Url::join` append endpoint paths instead of
        // replacing the last segment of a path-prefixed base.
        let base_url =
            Url::parse(&format!("{normalised}/")).map_err(|e| ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The normalised base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL with percent-encoded query parameters.
    ///
    /// `path` is relative to the base URL, e.g. `"api/search"`.
    pub(crate) fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{}", self.base_url.path(), path));
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request and decodes a 2xx JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let request = self.client.get(url).header(reqwest::header::ACCEPT, "application/json");
        self.send_json(request, context).await
    }

    /// Sends a prepared request with the JSON timeout and decodes the body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request.timeout(self.request_timeout).send().await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Passes 2xx responses through and converts everything else into a typed
/// error.
///
/// 429 becomes [`ClientError::RateLimited`] without touching the body. Any
/// other failure status reads the body for a message.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        tracing::warn!(url = %response.url(), ?retry_after_secs, "rate limited");
        return Err(ClientError::RateLimited { retry_after_secs });
    }

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status);
    tracing::debug!(status = status.as_u16(), %message, "request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Extracts a user-facing message from an error body.
///
/// Prefers the JSON `detail` field, then the raw text, then the status
/// reason phrase.
pub(crate) fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                return detail.trim().to_owned();
            }
            Some(serde_json::Value::Null | serde_json::Value::String(_)) | None => {}
            Some(other) => return other.to_string(),
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_owned();
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
