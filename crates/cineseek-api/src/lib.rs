//! Movie catalog client library for cineseek.
//!
//! Wraps the TMDB v3 API: title search, movie details and image URLs.

/// TMDB API client.
pub mod tmdb;
