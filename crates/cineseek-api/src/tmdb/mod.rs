//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and builds image URLs for the paths they return.

mod api;
mod client;
mod error;
/// Poster and backdrop URL helpers.
pub mod images;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::CatalogError;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMovieParams, TmdbGenre, TmdbMovieDetails, TmdbMovieSummary, TmdbProductionCompany,
    TmdbSearchMovieResponse,
};
