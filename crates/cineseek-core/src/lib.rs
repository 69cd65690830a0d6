//! Core logic for cineseek.
//!
//! UI-agnostic state machines for the search and details screens, plus the
//! formatting rules both screens share.

/// Paginated search controller.
pub mod controller;
/// One-shot movie details loader.
pub mod detail;
/// Derived-value formatting (runtime, dates, ratings).
pub mod format;
/// Presentational view models.
pub mod view;

pub use controller::{
    ApplyOutcome, EmptyListMessage, PageRequest, RequestKind, SearchController, SearchOptions,
    SearchPhase, SearchState, ValidationError,
};
pub use detail::{DETAIL_FAILED_NOTICE, DetailLoader, DetailState};
pub use view::{DetailView, MovieCard};
