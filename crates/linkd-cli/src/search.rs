//! Search and explanation command handlers.
//!
//! Results are printed as they load. The trailing annotation window gets a
//! live explanation streamed from the generation endpoint; older results
//! fall back to the explanation stored with the profile.

use std::fmt::Display;
use std::io::Write;

use linkd_client::{
    AnnotationState, CancelToken, ClientError, LinkdClient, PageOutcome, SearchPager,
};
use linkd_core::{Profile, ProfileSummary};

const INDENT: &str = "     ";

/// Trimmed query, or an error for blank input.
pub(crate) fn validate_query(query: &str) -> anyhow::Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("search query cannot be empty");
    }
    Ok(query)
}

fn search_failed(err: impl Display) -> anyhow::Error {
    anyhow::anyhow!("{err}; try another search")
}

/// One-line role/company/location summary, or `None` if all are missing.
pub(crate) fn headline(profile: &Profile) -> Option<String> {
    let role = profile.role.as_deref().filter(|s| !s.trim().is_empty());
    let company = profile.company.as_deref().filter(|s| !s.trim().is_empty());
    let mut line = match (role, company) {
        (Some(role), Some(company)) => format!("{role} at {company}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    };
    if let Some(location) = profile.location.as_deref().filter(|s| !s.trim().is_empty()) {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(location);
    }
    (!line.is_empty()).then_some(line)
}

fn write_profile<W: Write>(
    out: &mut W,
    position: usize,
    profile: &Profile,
) -> std::io::Result<()> {
    writeln!(out, "{position:>3}. {}", profile.display_name())?;
    if let Some(line) = headline(profile) {
        writeln!(out, "{INDENT}{line}")?;
    }
    for line in profile.experience_lines(2) {
        writeln!(out, "{INDENT}- {line}")?;
    }
    if let Some(url) = profile.linkedin_url.as_deref() {
        writeln!(out, "{INDENT}{url}")?;
    }
    Ok(())
}

/// Run a search, loading up to `pages` pages, and explain the last `window`
/// results live.
///
/// A failure on the first page aborts the command. A failure on a later page
/// is reported and the results loaded so far are still shown.
///
/// # Errors
///
/// Returns an error if the query is blank, the first page cannot be loaded,
/// or `out` stops accepting writes.
pub(crate) async fn run_search<W: Write>(
    client: &LinkdClient,
    query: &str,
    pages: u32,
    window: usize,
    cancel: &CancelToken,
    out: &mut W,
) -> anyhow::Result<()> {
    let query = validate_query(query)?;
    let mut pager = SearchPager::new(query);

    for page in 0..pages.max(1) {
        match pager.load(client, page > 0).await {
            Ok(PageOutcome::Loaded(count)) => {
                tracing::debug!(page, count, offset = pager.offset(), "page loaded");
            }
            Ok(PageOutcome::Exhausted) => break,
            Err(err) if pager.results().is_empty() => return Err(search_failed(&err)),
            Err(err) => {
                writeln!(out, "could not load more results: {err}")?;
                break;
            }
        }
    }

    if pager.results().is_empty() {
        writeln!(out, "no profiles matched \"{query}\"; try another search")?;
        return Ok(());
    }

    let live_start = pager.live_window_start(window);
    for (index, profile) in pager.results().iter().enumerate() {
        write_profile(out, index + 1, profile)?;
        if index < live_start || cancel.is_cancelled() {
            if let Some(explanation) = profile.explanation.as_deref() {
                writeln!(out, "{INDENT}{explanation}")?;
            }
        } else {
            let summary = profile.summary_fields();
            match stream_explanation(client, query, &summary, cancel, out).await {
                Ok(()) => {}
                Err(StreamFailure::Client(err)) => {
                    writeln!(out, "{INDENT}explanation unavailable: {err}")?;
                }
                Err(StreamFailure::Output(err)) => return Err(err.into()),
            }
        }
        writeln!(out)?;
    }

    if pager.has_more() {
        writeln!(
            out,
            "showing {} results; rerun with --pages {} for more",
            pager.results().len(),
            pages.max(1).saturating_add(1)
        )?;
    }
    Ok(())
}

/// Stream a single explanation for an ad-hoc profile.
///
/// # Errors
///
/// Returns an error if the query is blank, the request fails, the stream
/// ends in an error frame, or `out` stops accepting writes.
pub(crate) async fn run_explain<W: Write>(
    client: &LinkdClient,
    query: &str,
    profile: &ProfileSummary,
    cancel: &CancelToken,
    out: &mut W,
) -> anyhow::Result<()> {
    let query = validate_query(query)?;
    match stream_explanation(client, query, profile, cancel, out).await {
        Ok(()) => Ok(()),
        Err(StreamFailure::Client(err)) => Err(search_failed(err)),
        Err(StreamFailure::Output(err)) => Err(err.into()),
    }
}

/// Why a live explanation did not finish.
#[derive(Debug)]
pub(crate) enum StreamFailure {
    /// The request failed or the stream ended in an error frame.
    Client(ClientError),
    /// `out` rejected a write; remaining explanations are cancelled.
    Output(std::io::Error),
}

/// Writes chunks to `out` as they arrive and reports how the stream ended.
///
/// The first failed write cancels `cancel`, so no further chunks or
/// explanations are produced. Cancellation itself is not an error.
pub(crate) async fn stream_explanation<W: Write>(
    client: &LinkdClient,
    query: &str,
    profile: &ProfileSummary,
    cancel: &CancelToken,
    out: &mut W,
) -> Result<(), StreamFailure> {
    let mut started = false;
    let mut write_error: Option<std::io::Error> = None;
    let annotation = client
        .stream_annotation(query, profile, cancel, |update| {
            if write_error.is_some() {
                return;
            }
            let prefix = if started { "" } else { INDENT };
            started = true;
            if let Err(err) = write!(out, "{prefix}{}", update.chunk).and_then(|()| out.flush()) {
                tracing::warn!(error = %err, "output closed; cancelling explanations");
                cancel.cancel();
                write_error = Some(err);
            }
        })
        .await
        .map_err(StreamFailure::Client)?;

    if let Some(err) = write_error {
        return Err(StreamFailure::Output(err));
    }
    if started {
        writeln!(out).map_err(StreamFailure::Output)?;
    }
    match annotation.state() {
        AnnotationState::Cancelled => {
            writeln!(out, "{INDENT}(cancelled)").map_err(StreamFailure::Output)?;
            Ok(())
        }
        AnnotationState::Errored(message) => Err(StreamFailure::Client(ClientError::Stream {
            message: message.clone(),
        })),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
