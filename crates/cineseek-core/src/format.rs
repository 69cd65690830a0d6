//! Display formatting shared by the search list and the details view.

use chrono::{Datelike, NaiveDate};

/// Shown when a movie has no runtime.
pub const UNKNOWN_RUNTIME: &str = "Unknown runtime";
/// Shown on the details view when a movie has no release date.
pub const UNKNOWN_RELEASE_DATE: &str = "Unknown release date";
/// Shown on result cards when a movie has no release date.
pub const UNKNOWN_YEAR: &str = "Unknown date";
/// Shown when a movie has no overview.
pub const NO_OVERVIEW: &str = "No overview available.";

/// Formats a runtime in minutes as `"2h 16min"`.
///
/// Zero is treated like an absent runtime; TMDB uses it for unknown values.
#[must_use]
pub fn runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}min", m / 60, m % 60),
        _ => String::from(UNKNOWN_RUNTIME),
    }
}

/// Formats a full release date as `YYYY-MM-DD`.
#[must_use]
pub fn release_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || String::from(UNKNOWN_RELEASE_DATE),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}

/// Formats the release year for a result card.
#[must_use]
pub fn release_year(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| String::from(UNKNOWN_YEAR), |d| d.year().to_string())
}

/// Formats a vote average as `"8.2/10"`.
#[must_use]
pub fn rating(vote_average: f64) -> String {
    format!("{vote_average:.1}/10")
}

/// Formats a vote count as `"(26361 votes)"`.
#[must_use]
pub fn vote_count(count: u32) -> String {
    if count == 1 {
        String::from("(1 vote)")
    } else {
        format!("({count} votes)")
    }
}

/// Returns the overview, or a fallback when it is absent or blank.
#[must_use]
pub fn overview(text: Option<&str>) -> &str {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_OVERVIEW)
}

/// Returns the tagline wrapped in quotes, or `None` when absent or blank.
#[must_use]
pub fn tagline(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
}

/// Joins names with `", "`; `None` for an empty list.
#[must_use]
pub fn joined<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let joined = names.into_iter().collect::<Vec<_>>().join(", ");
    (!joined.is_empty()).then_some(joined)
}
