//! TMDB image and page URLs.
//!
//! TMDB returns image paths such as `/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg`; the
//! full URL is the image base, a size segment and that path.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Base URL of movie pages on the TMDB website.
pub const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";

/// Placeholder shown in result lists when a movie has no poster.
pub const CARD_PLACEHOLDER_URL: &str = "https://via.placeholder.com/150x225?text=No+Image";

/// Placeholder shown on the details view when a movie has no poster.
pub const DETAIL_PLACEHOLDER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Where a poster is rendered; selects the placeholder size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterContext {
    /// Compact result card.
    Card,
    /// Full details view.
    Detail,
}

impl PosterContext {
    /// Placeholder URL for this context.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Card => CARD_PLACEHOLDER_URL,
            Self::Detail => DETAIL_PLACEHOLDER_URL,
        }
    }
}

/// Joins a size segment and an API path into a CDN URL.
///
/// Returns `None` for absent or blank paths.
fn image_url(size: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{IMAGE_BASE_URL}/{size}{separator}{path}"))
}

/// Poster URL (`w500`), falling back to the context placeholder.
#[must_use]
pub fn poster_url(path: Option<&str>, context: PosterContext) -> String {
    image_url("w500", path).unwrap_or_else(|| String::from(context.placeholder()))
}

/// Backdrop URL (`original`); `None` when the movie has no backdrop.
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    image_url("original", path)
}

/// TMDB website page for a movie.
#[must_use]
pub fn movie_page_url(movie_id: u64) -> String {
    format!("{MOVIE_PAGE_BASE_URL}/{movie_id}")
}
