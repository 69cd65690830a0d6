//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::CatalogError;
use super::types::{SearchMovieParams, TmdbMovieDetails, TmdbSearchMovieResponse};

/// TMDB movie catalog trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies by title, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] if no response was received, or
    /// [`CatalogError::Upstream`] for non-2xx statuses and undecodable bodies.
    async fn search_movie(
        &self,
        params: &SearchMovieParams,
    ) -> Result<TmdbSearchMovieResponse, CatalogError>;

    /// Fetches full details for a single movie.
    ///
    /// # Errors
    ///
    /// Same failure kinds as [`LocalTmdbApi::search_movie`].
    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbMovieDetails, CatalogError>;
}
