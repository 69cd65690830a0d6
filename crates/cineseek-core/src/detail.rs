//! Single-movie detail loading.
//!
//! A [`DetailLoader`] fetches details once per view. Triggering it again
//! while a load is running or after it finished does nothing; a failed load
//! can be retried.
#![allow(clippy::future_not_send)]

use cineseek_api::tmdb::{CatalogError, LocalTmdbApi, TmdbMovieDetails};
use tracing::instrument;

/// Notice shown when details cannot be loaded.
pub const DETAIL_FAILED_NOTICE: &str = "Could not load movie details.";

/// Detail loading state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the API.
    Loading,
    /// Details available.
    Loaded(Box<TmdbMovieDetails>),
    /// The request failed; carries the user-facing notice.
    Failed(String),
}

/// Loads details for one movie.
#[derive(Debug)]
pub struct DetailLoader {
    movie_id: u64,
    language: String,
    state: DetailState,
}

impl DetailLoader {
    /// Creates an idle loader for `movie_id`.
    #[must_use]
    pub fn new(movie_id: u64, language: impl Into<String>) -> Self {
        Self {
            movie_id,
            language: language.into(),
            state: DetailState::Idle,
        }
    }

    /// Movie this loader is for.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }

    /// Response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Loaded details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&TmdbMovieDetails> {
        match &self.state {
            DetailState::Loaded(details) => Some(details),
            _ => None,
        }
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    /// Marks a load as started.
    ///
    /// Returns `false` (and changes nothing) unless the loader is idle or
    /// failed; the caller only issues a request on `true`.
    pub fn begin(&mut self) -> bool {
        match self.state {
            DetailState::Idle | DetailState::Failed(_) => {
                self.state = DetailState::Loading;
                true
            }
            DetailState::Loading | DetailState::Loaded(_) => {
                tracing::debug!(movie_id = self.movie_id, "detail load already started");
                false
            }
        }
    }

    /// Records the outcome of a request started by [`Self::begin`].
    ///
    /// Outcomes for another movie, or arriving when no load is running, are
    /// discarded and `false` is returned.
    pub fn complete(
        &mut self,
        movie_id: u64,
        outcome: Result<TmdbMovieDetails, CatalogError>,
    ) -> bool {
        if movie_id != self.movie_id || !self.is_loading() {
            tracing::debug!(
                movie_id,
                expected = self.movie_id,
                "discarding stale detail result"
            );
            return false;
        }
        self.state = match outcome {
            Ok(details) => DetailState::Loaded(Box::new(details)),
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "movie details failed");
                DetailState::Failed(String::from(DETAIL_FAILED_NOTICE))
            }
        };
        true
    }

    /// Begins, fetches and completes in one step.
    ///
    /// A no-op when [`Self::begin`] refuses.
    #[instrument(skip_all, fields(movie_id = self.movie_id))]
    pub async fn load(&mut self, api: &(impl LocalTmdbApi + Sync)) -> &DetailState {
        if self.begin() {
            let outcome = api.movie_details(self.movie_id, &self.language).await;
            self.complete(self.movie_id, outcome);
        }
        &self.state
    }
}
