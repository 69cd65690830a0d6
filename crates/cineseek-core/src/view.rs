//! View models for the result card and the details view.
//!
//! Each one holds ready-to-render strings so that the terminal UI and the
//! plain command line output present a movie the same way.

use cineseek_api::tmdb::images::{self, PosterContext};
use cineseek_api::tmdb::{TmdbMovieDetails, TmdbMovieSummary};

use crate::format;

/// One row of the search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// TMDB movie ID, used to open the details view.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Release year or fallback text.
    pub year: String,
    /// Rating, e.g. `"8.2/10"`.
    pub rating: String,
    /// Overview or fallback text.
    pub overview: String,
    /// Poster URL or placeholder.
    pub poster_url: String,
}

impl From<&TmdbMovieSummary> for MovieCard {
    fn from(movie: &TmdbMovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: format::release_year(movie.release_date),
            rating: format::rating(movie.vote_average),
            overview: String::from(format::overview(movie.overview.as_deref())),
            poster_url: images::poster_url(movie.poster_path.as_deref(), PosterContext::Card),
        }
    }
}

/// Everything shown on the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Quoted tagline, if any.
    pub tagline: Option<String>,
    /// Release date or fallback text.
    pub release_date: String,
    /// Runtime or fallback text.
    pub runtime: String,
    /// Rating, e.g. `"8.2/10"`.
    pub rating: String,
    /// Vote count, e.g. `"(26361 votes)"`.
    pub votes: String,
    /// Genre names, in TMDB order.
    pub genres: Vec<String>,
    /// Overview or fallback text.
    pub overview: String,
    /// Production companies joined with `", "`, if any.
    pub companies: Option<String>,
    /// Poster URL or placeholder.
    pub poster_url: String,
    /// Backdrop URL, if the movie has one.
    pub backdrop_url: Option<String>,
    /// TMDB website page.
    pub page_url: String,
}

impl From<&TmdbMovieDetails> for DetailView {
    fn from(movie: &TmdbMovieDetails) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: format::tagline(movie.tagline.as_deref()),
            release_date: format::release_date(movie.release_date),
            runtime: format::runtime(movie.runtime),
            rating: format::rating(movie.vote_average),
            votes: format::vote_count(movie.vote_count),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
            overview: String::from(format::overview(movie.overview.as_deref())),
            companies: format::joined(movie.production_companies.iter().map(|c| c.name.as_str())),
            poster_url: images::poster_url(movie.poster_path.as_deref(), PosterContext::Detail),
            backdrop_url: images::backdrop_url(movie.backdrop_path.as_deref()),
            page_url: images::movie_page_url(movie.id),
        }
    }
}
