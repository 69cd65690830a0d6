//! Paginated search / incremental-load controller.
//!
//! The controller is a synchronous state machine. Every remote call it wants
//! made is handed out as a [`PageRequest`] ticket; the caller performs the
//! call however it likes (inline, or on a spawned task) and feeds the outcome
//! back through [`SearchController::apply`]. Tickets carry the session number
//! and page they were issued for, so results from a superseded search are
//! recognised and dropped.
#![allow(clippy::future_not_send)]

use cineseek_api::tmdb::{
    CatalogError, LocalTmdbApi, SearchMovieParams, TmdbMovieSummary, TmdbSearchMovieResponse,
};
use thiserror::Error;
use tracing::instrument;

/// Notice shown when a search or page load fails.
pub const SEARCH_FAILED_NOTICE: &str = "Could not fetch movies. Try again.";

/// Rejection of a query before any remote call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The query is empty or whitespace only.
    #[error("type a movie title to search")]
    EmptyQuery,
}

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query submitted yet.
    Idle,
    /// Waiting for page 1 of a fresh search.
    LoadingFirstPage,
    /// Results shown, more pages available.
    Ready,
    /// Waiting for the next page of the current search.
    LoadingNextPage,
    /// Every page of the current search has been loaded.
    Exhausted,
    /// The last request failed.
    Failed,
}

/// Whether a request starts a search or continues one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Page 1 of a new session.
    FirstPage,
    /// `current_page + 1` of the current session.
    NextPage,
}

/// Ticket for one remote search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    session: u64,
    kind: RequestKind,
    params: SearchMovieParams,
}

impl PageRequest {
    /// Parameters to send to `search/movie`.
    #[must_use]
    pub const fn params(&self) -> &SearchMovieParams {
        &self.params
    }

    /// Requested page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.params.page
    }

    /// Request kind.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Session this request belongs to.
    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }
}

/// Result of feeding an outcome back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The outcome updated the search state.
    Applied,
    /// The outcome belonged to a superseded request and was dropped.
    Stale,
}

/// Which message to show when the result list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyListMessage {
    /// Nothing searched yet.
    Placeholder,
    /// A search ran and returned nothing.
    NoResults,
}

impl EmptyListMessage {
    /// Display text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Placeholder => "Search for your favorite movies!",
            Self::NoResults => "No movies found. Try another search.",
        }
    }
}

/// Request options applied to every page of every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Include adult titles.
    pub include_adult: bool,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Release year filter.
    pub year: Option<u32>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            include_adult: false,
            region: None,
            year: None,
        }
    }
}

/// A failed request, kept for display and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    kind: RequestKind,
    message: String,
}

/// Search state owned by a [`SearchController`].
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    query: Option<String>,
    items: Vec<TmdbMovieSummary>,
    current_page: u32,
    total_pages: u32,
    total_results: u32,
    phase: SearchPhase,
    failure: Option<Failure>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: None,
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            total_results: 0,
            phase: SearchPhase::Idle,
            failure: None,
        }
    }
}

impl SearchState {
    /// Trimmed query of the current session.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Accumulated results, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[TmdbMovieSummary] {
        &self.items
    }

    /// Last page merged into `items` (0 before the first page arrives).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count reported by the latest response.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Result count reported by the latest response.
    #[must_use]
    pub const fn total_results(&self) -> u32 {
        self.total_results
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// `true` while a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::LoadingFirstPage | SearchPhase::LoadingNextPage
        )
    }

    /// `true` if `load_next_page` would issue a request.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        matches!(self.phase, SearchPhase::Ready)
    }

    /// Reason for the last failure, if the controller is in `Failed`.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// Message for an empty result list, or `None` when it should not show.
    #[must_use]
    pub fn empty_message(&self) -> Option<EmptyListMessage> {
        if !self.items.is_empty() || self.is_loading() {
            return None;
        }
        if self.query.is_none() {
            Some(EmptyListMessage::Placeholder)
        } else {
            Some(EmptyListMessage::NoResults)
        }
    }

    /// Phase after a successful page merge.
    const fn settled_phase(&self) -> SearchPhase {
        if self.current_page < self.total_pages {
            SearchPhase::Ready
        } else {
            SearchPhase::Exhausted
        }
    }
}

/// Paginated search controller.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController {
    /// Options copied into every request.
    options: SearchOptions,
    /// Current search state.
    state: SearchState,
    /// Session counter, bumped by every accepted `submit_query`.
    session: u64,
    /// Page awaited in the current session.
    awaiting: Option<u32>,
}

impl SearchController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current search state.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Request options.
    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Starts a fresh search for `text`.
    ///
    /// Resets accumulated results and returns the page-1 ticket. Any request
    /// still outstanding from an earlier session becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] for blank input; the state is
    /// left untouched.
    pub fn submit_query(&mut self, text: &str) -> Result<PageRequest, ValidationError> {
        let query = text.trim();
        if query.is_empty() {
            tracing::debug!("empty query rejected");
            return Err(ValidationError::EmptyQuery);
        }

        self.session = self.session.wrapping_add(1);
        self.state = SearchState {
            query: Some(String::from(query)),
            phase: SearchPhase::LoadingFirstPage,
            ..SearchState::default()
        };
        tracing::debug!(session = self.session, query, "search submitted");

        Ok(self.issue(RequestKind::FirstPage, 1, String::from(query)))
    }

    /// Requests the next page of the current search.
    ///
    /// Only acts in [`SearchPhase::Ready`]; in every other phase it returns
    /// `None` without side effects, so it may be called on every scroll event.
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if self.state.phase != SearchPhase::Ready {
            return None;
        }
        let next = self.state.current_page.checked_add(1)?;
        let query = self.state.query.clone()?;

        self.state.phase = SearchPhase::LoadingNextPage;
        tracing::debug!(session = self.session, page = next, "next page requested");
        Some(self.issue(RequestKind::NextPage, next, query))
    }

    /// Re-issues the request that put the controller into `Failed`.
    ///
    /// A failed first page restarts the search; a failed next page asks for
    /// the same page again and keeps the accumulated results.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.state.phase != SearchPhase::Failed {
            return None;
        }
        let kind = self.state.failure.as_ref()?.kind;
        let query = self.state.query.clone()?;

        match kind {
            RequestKind::FirstPage => self.submit_query(&query).ok(),
            RequestKind::NextPage => {
                let next = self.state.current_page.checked_add(1)?;
                self.state.failure = None;
                self.state.phase = SearchPhase::LoadingNextPage;
                Some(self.issue(RequestKind::NextPage, next, query))
            }
        }
    }

    /// Merges the outcome of `request` into the state.
    ///
    /// Outcomes for a superseded session, or for a page that is no longer
    /// awaited, are dropped and reported as [`ApplyOutcome::Stale`].
    pub fn apply(
        &mut self,
        request: &PageRequest,
        outcome: Result<TmdbSearchMovieResponse, CatalogError>,
    ) -> ApplyOutcome {
        if request.session != self.session || self.awaiting != Some(request.page()) {
            tracing::debug!(
                session = request.session,
                current_session = self.session,
                page = request.page(),
                "discarding stale search result"
            );
            return ApplyOutcome::Stale;
        }
        self.awaiting = None;

        match outcome {
            Ok(response) => self.merge(request, response),
            Err(err) => {
                tracing::warn!(
                    page = request.page(),
                    rate_limited = err.is_rate_limited(),
                    error = %err,
                    "search request failed"
                );
                if request.kind == RequestKind::FirstPage {
                    self.state.items.clear();
                }
                self.state.phase = SearchPhase::Failed;
                self.state.failure = Some(Failure {
                    kind: request.kind,
                    message: err.to_string(),
                });
            }
        }
        ApplyOutcome::Applied
    }

    /// Submits `text` and waits for page 1.
    ///
    /// Remote failures end up in the state as [`SearchPhase::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] for blank input.
    #[instrument(skip_all)]
    pub async fn search(
        &mut self,
        api: &(impl LocalTmdbApi + Sync),
        text: &str,
    ) -> Result<SearchPhase, ValidationError> {
        let request = self.submit_query(text)?;
        let outcome = api.search_movie(request.params()).await;
        self.apply(&request, outcome);
        Ok(self.state.phase)
    }

    /// Loads the next page and waits for it.
    ///
    /// Returns `None` when no request was issued (see [`Self::load_next_page`]).
    #[instrument(skip_all)]
    pub async fn fetch_next_page(
        &mut self,
        api: &(impl LocalTmdbApi + Sync),
    ) -> Option<SearchPhase> {
        let request = self.load_next_page()?;
        let outcome = api.search_movie(request.params()).await;
        self.apply(&request, outcome);
        Some(self.state.phase)
    }

    /// Builds a ticket and marks its page as awaited.
    fn issue(&mut self, kind: RequestKind, page: u32, query: String) -> PageRequest {
        let mut params = SearchMovieParams::new(query)
            .language(self.options.language.as_str())
            .page(page)
            .include_adult(self.options.include_adult);
        params.region.clone_from(&self.options.region);
        params.year = self.options.year;

        self.awaiting = Some(page);
        PageRequest {
            session: self.session,
            kind,
            params,
        }
    }

    /// Applies a successful response.
    fn merge(&mut self, request: &PageRequest, response: TmdbSearchMovieResponse) {
        if response.page != request.page() {
            tracing::warn!(
                requested = request.page(),
                received = response.page,
                "TMDB returned a different page than requested"
            );
        }
        let fetched = response.results.len();

        match request.kind {
            RequestKind::FirstPage => self.state.items = response.results,
            RequestKind::NextPage => self.state.items.extend(response.results),
        }
        self.state.current_page = request.page();
        self.state.total_pages = response.total_pages;
        self.state.total_results = response.total_results;
        self.state.failure = None;
        self.state.phase = self.state.settled_phase();

        tracing::debug!(
            page = self.state.current_page,
            total_pages = self.state.total_pages,
            fetched,
            accumulated = self.state.items.len(),
            "search page merged"
        );
    }
}
