//! TMDB API response types and search parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Date format used by TMDB for release dates.
const TMDB_DATE_FORMAT: &str = "%Y-%m-%d";

/// Deserializes a TMDB date that may be `null`, `""` or malformed.
///
/// TMDB sends `""` for unknown release dates, so anything that is not a
/// valid `YYYY-MM-DD` becomes `None` instead of failing the whole payload.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, TMDB_DATE_FORMAT).ok()))
}

// --- Search Movie ---

/// Response from `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbSearchMovieResponse {
    /// Current page number.
    pub page: u32,
    /// Search results.
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A single movie search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Release date (absent when TMDB has none).
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date.
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production companies, in TMDB order.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Official homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// IMDb ID.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbProductionCompany {
    /// TMDB company ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Company name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by year.
    pub year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            year: None,
            region: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets whether adult titles are included.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_empty_release_date_is_none() {
        // Arrange
        let json = r#"{"id":1,"title":"Untitled","release_date":""}"#;

        // Act
        let movie: TmdbMovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.release_date.is_none());
    }

    #[test]
    fn test_malformed_release_date_is_none() {
        // Arrange
        let json = r#"{"id":1,"title":"Untitled","release_date":"1999"}"#;

        // Act
        let movie: TmdbMovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.release_date.is_none());
    }

    #[test]
    fn test_valid_release_date_is_parsed() {
        // Arrange
        let json = r#"{"id":603,"title":"The Matrix","release_date":"1999-03-30"}"#;

        // Act
        let movie: TmdbMovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1999, 3, 30));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Arrange
        let json = r#"{"id":7,"title":"Bare"}"#;

        // Act
        let movie: TmdbMovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.poster_path.is_none());
        assert!(movie.overview.is_none());
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_count, 0);
    }

    #[test]
    fn test_search_params_builder() {
        // Arrange & Act
        let params = SearchMovieParams::new("Matrix")
            .language("pt-BR")
            .page(3)
            .region("BR")
            .year(1999);

        // Assert
        assert_eq!(params.query, "Matrix");
        assert_eq!(params.language, "pt-BR");
        assert_eq!(params.page, 3);
        assert_eq!(params.region.as_deref(), Some("BR"));
        assert_eq!(params.year, Some(1999));
        assert!(!params.include_adult);
    }
}
