//! Offset-paginated profile search.
//!
//! [`LinkdClient::search_page`] fetches one page; [`SearchPager`] drives a
//! "load more" flow over it. The cursor is a plain result offset: after each
//! non-empty page it advances by the number of results returned, and the
//! first empty page ends pagination for that query until the pager is reset.

use linkd_core::Profile;
use serde::Deserialize;

use crate::client::LinkdClient;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Profile>,
}

impl LinkdClient {
    /// Fetches one page of search results starting at `offset`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] on a non-2xx response, carrying the body text.
    /// - [`ClientError::RateLimited`] on HTTP 429.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not `{ results: [...] }`.
    pub async fn search_page(
        &self,
        query: &str,
        offset: usize,
    ) -> Result<Vec<Profile>, ClientError> {
        let offset_str = offset.to_string();
        let url = self.endpoint("api/search", &[("query", query), ("offset", &offset_str)]);
        let response: SearchResponse = self
            .get_json(url, &format!("search(query={query}, offset={offset})"))
            .await?;
        tracing::debug!(query, offset, count = response.results.len(), "search page");
        Ok(response.results)
    }
}

/// What a successful [`SearchPager::load`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page of `n` results was added and the offset advanced by `n`.
    Loaded(usize),
    /// The page was empty; there are no more results for this query.
    Exhausted,
}

/// Accumulates search result pages for one query.
///
/// Loads take `&mut self`, so overlapping "load more" requests for one pager
/// cannot be issued.
#[derive(Debug, Clone)]
pub struct SearchPager {
    query: String,
    results: Vec<Profile>,
    offset: usize,
    exhausted: bool,
    error: Option<String>,
}

impl SearchPager {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            offset: 0,
            exhausted: false,
            error: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// All results loaded so far, in arrival order.
    #[must_use]
    pub fn results(&self) -> &[Profile] {
        &self.results
    }

    /// Offset the next page will be requested at.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The message of the failure that halted this pager, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a "load more" control should be offered.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.exhausted && self.error.is_none()
    }

    /// Starts over with a new query: no results, offset 0, not exhausted.
    pub fn reset(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clear();
    }

    /// Loads the next page for the current query.
    ///
    /// With `append = false` the accumulated state is cleared first and the
    /// first page is fetched. With `append = true` the page at the current
    /// offset is appended; once the pager is exhausted this returns
    /// [`PageOutcome::Exhausted`] without a request.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the page fetch. The error message is also
    /// recorded in [`SearchPager::error`] and halts the pager until
    /// [`SearchPager::reset`] or a non-append load. Appending to a halted
    /// pager returns [`ClientError::InvalidRequest`].
    pub async fn load(
        &mut self,
        client: &LinkdClient,
        append: bool,
    ) -> Result<PageOutcome, ClientError> {
        if append {
            if let Some(message) = &self.error {
                return Err(ClientError::InvalidRequest(format!(
                    "search halted after an earlier failure ({message}); start a new search"
                )));
            }
            if self.exhausted {
                return Ok(PageOutcome::Exhausted);
            }
        } else {
            self.clear();
        }

        match client.search_page(&self.query, self.offset).await {
            Ok(page) => Ok(self.apply_page(page, append)),
            Err(err) => {
                tracing::warn!(query = %self.query, offset = self.offset, error = %err, "search failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Appends the next page at the current offset.
    ///
    /// # Errors
    ///
    /// See [`SearchPager::load`].
    pub async fn load_more(&mut self, client: &LinkdClient) -> Result<PageOutcome, ClientError> {
        self.load(client, true).await
    }

    /// Index of the first result that gets a live annotation stream when the
    /// trailing `window` results are streamed.
    #[must_use]
    pub fn live_window_start(&self, window: usize) -> usize {
        self.results.len().saturating_sub(window)
    }

    /// The trailing `window` results, i.e. the most recently loaded ones.
    #[must_use]
    pub fn annotation_targets(&self, window: usize) -> &[Profile] {
        &self.results[self.live_window_start(window)..]
    }

    fn clear(&mut self) {
        self.results.clear();
        self.offset = 0;
        self.exhausted = false;
        self.error = None;
    }

    fn apply_page(&mut self, page: Vec<Profile>, append: bool) -> PageOutcome {
        if page.is_empty() {
            self.exhausted = true;
            return PageOutcome::Exhausted;
        }

        let count = page.len();
        if append {
            self.results.extend(page);
        } else {
            self.results = page;
        }
        self.offset += count;
        PageOutcome::Loaded(count)
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
