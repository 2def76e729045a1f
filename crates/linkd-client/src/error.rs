use thiserror::Error;

/// Errors returned by the alumni API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    ///
    /// `message` is the JSON `detail` field when present, otherwise the raw
    /// body text.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP 429. The body is never read.
    #[error("rate limit exceeded, please try again later")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The generation stream signalled a failure in-band.
    #[error("{message}")]
    Stream { message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Rejected before sending; the request could never succeed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

