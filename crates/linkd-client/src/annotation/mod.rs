//! Streamed per-result explanations from the generation endpoint.
//!
//! [`LinkdClient::stream_annotation`] posts a query and a profile summary to
//! `/api/generate` and accumulates the decoded body into an [`Annotation`],
//! invoking a callback after every chunk. Each annotation runs a one-way
//! state machine:
//!
//! ```text
//! Idle -> Streaming -> Completed | Errored | Cancelled
//! ```
//!
//! Terminal states are final; a new request always starts a fresh
//! [`Annotation`]. Cancellation is cooperative: a [`CancelToken`] is checked
//! after every chunk read and stops all further updates, but the underlying
//! request is left to finish on its own.

mod decode;
mod frames;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::{Stream, StreamExt};
use linkd_core::ProfileSummary;
use serde::Serialize;

use crate::client::{ensure_success, LinkdClient};
use crate::error::ClientError;

use decode::Utf8Decoder;
use frames::{Frame, FrameDecoder};

pub use frames::StreamProtocol;

/// Shared cancellation flag for one or more annotation streams.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of one annotation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationState {
    Idle,
    Streaming,
    Completed,
    /// The stream reported a failure; the message is user-facing.
    Errored(String),
    Cancelled,
}

impl AnnotationState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnnotationState::Completed | AnnotationState::Errored(_) | AnnotationState::Cancelled
        )
    }
}

/// Text accumulated for one (query, profile) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    state: AnnotationState,
    text: String,
}

impl Default for Annotation {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AnnotationState::Idle,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    /// Text accumulated so far. Always empty once errored.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Completed text, or the reason there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Stream`] for errored, cancelled or unfinished
    /// annotations.
    pub fn into_result(self) -> Result<String, ClientError> {
        match self.state {
            AnnotationState::Completed => Ok(self.text),
            AnnotationState::Errored(message) => Err(ClientError::Stream { message }),
            AnnotationState::Cancelled => Err(ClientError::Stream {
                message: "annotation cancelled".to_owned(),
            }),
            AnnotationState::Idle | AnnotationState::Streaming => Err(ClientError::Stream {
                message: "annotation did not finish".to_owned(),
            }),
        }
    }

    fn begin(&mut self) {
        if self.state == AnnotationState::Idle {
            self.state = AnnotationState::Streaming;
        }
    }

    fn append(&mut self, chunk: &str) -> bool {
        if self.state != AnnotationState::Streaming {
            return false;
        }
        self.text.push_str(chunk);
        true
    }

    fn complete(&mut self) {
        if self.state == AnnotationState::Streaming {
            self.state = AnnotationState::Completed;
        }
    }

    fn fail(&mut self, message: String) {
        if !self.state.is_terminal() {
            self.text.clear();
            self.state = AnnotationState::Errored(message);
        }
    }

    fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = AnnotationState::Cancelled;
        }
    }
}

/// Passed to the update callback after every text chunk.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationUpdate<'a> {
    /// Text added by this chunk.
    pub chunk: &'a str,
    /// Everything accumulated so far, including `chunk`.
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    query: &'a str,
    profile: &'a ProfileSummary,
}

impl LinkdClient {
    /// Streams an explanation of why `profile` matches `query`.
    ///
    /// `on_update` runs after every chunk that adds text. In-band failures,
    /// transport errors after the body started and cancellation are reported
    /// through the returned annotation's state, not as `Err`.
    ///
    /// # Errors
    ///
    /// Failures before the body is opened:
    /// - [`ClientError::RateLimited`] on HTTP 429, without reading the body.
    /// - [`ClientError::Status`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    pub async fn stream_annotation<F>(
        &self,
        query: &str,
        profile: &ProfileSummary,
        cancel: &CancelToken,
        on_update: F,
    ) -> Result<Annotation, ClientError>
    where
        F: FnMut(AnnotationUpdate<'_>),
    {
        let url = self.endpoint("api/generate", &[]);
        tracing::debug!(%url, query, profile = %profile.name, "POST generate");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "text/plain, text/event-stream")
            .json(&GenerateRequest { query, profile })
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let protocol = StreamProtocol::from_content_type(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        Ok(consume_stream(response.bytes_stream(), protocol, cancel, on_update).await)
    }
}

/// Drives an annotation over a stream of body chunks.
///
/// The stream is read until it ends, a terminal frame arrives, a chunk
/// fails, or `cancel` is observed. Nothing is read after a terminal frame.
pub async fn consume_stream<S, B, E, F>(
    stream: S,
    protocol: StreamProtocol,
    cancel: &CancelToken,
    mut on_update: F,
) -> Annotation
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    F: FnMut(AnnotationUpdate<'_>),
{
    let mut stream = std::pin::pin!(stream);
    let mut annotation = Annotation::new();
    let mut utf8 = Utf8Decoder::default();
    let mut frames = FrameDecoder::new(protocol);

    annotation.begin();
    if cancel.is_cancelled() {
        annotation.cancel();
        return annotation;
    }

    while let Some(item) = stream.next().await {
        if cancel.is_cancelled() {
            tracing::debug!("annotation cancelled");
            annotation.cancel();
            return annotation;
        }

        let bytes = match item {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "annotation stream interrupted");
                annotation.fail(format!("stream interrupted: {err}"));
                return annotation;
            }
        };

        let text = utf8.decode(bytes.as_ref());
        if apply_frames(&mut annotation, frames.push(&text), &mut on_update) {
            return annotation;
        }
    }

    // A cancel that lands during the final read still wins over completion.
    if cancel.is_cancelled() {
        tracing::debug!("annotation cancelled at end of stream");
        annotation.cancel();
        return annotation;
    }

    let tail = utf8.finish();
    if apply_frames(&mut annotation, frames.push(&tail), &mut on_update) {
        return annotation;
    }

    annotation.complete();
    annotation
}

/// Applies frames in order. Returns `true` once the annotation is terminal.
fn apply_frames<F>(annotation: &mut Annotation, frames: Vec<Frame>, on_update: &mut F) -> bool
where
    F: FnMut(AnnotationUpdate<'_>),
{
    for frame in frames {
        match frame {
            Frame::Text(chunk) => {
                if annotation.append(&chunk) {
                    on_update(AnnotationUpdate {
                        chunk: &chunk,
                        text: annotation.text(),
                    });
                }
            }
            Frame::Error(message) => {
                tracing::warn!(%message, "generation stream reported an error");
                annotation.fail(message);
                return true;
            }
            Frame::Done => {
                annotation.complete();
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "annotation_test.rs"]
mod tests;
