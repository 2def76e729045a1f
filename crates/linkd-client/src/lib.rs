//! Async client for the linkd alumni API.
//!
//! Covers paginated profile search, streamed per-result explanations, the
//! pairwise comparison (Elo) endpoints, the rating leaderboard and the
//! signed-in user's profile. Non-2xx responses surface as
//! [`ClientError::Status`] with the server's message; nothing is retried
//! automatically.

pub mod annotation;
pub mod client;
pub mod error;
pub mod leaderboard;
pub mod search;

mod elo;
mod users;

pub use annotation::{
    consume_stream, Annotation, AnnotationState, AnnotationUpdate, CancelToken, StreamProtocol,
};
pub use client::LinkdClient;
pub use error::ClientError;
pub use leaderboard::MAX_LEADERBOARD_LIMIT;
pub use search::{PageOutcome, SearchPager};
