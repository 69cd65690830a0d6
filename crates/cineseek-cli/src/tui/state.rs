//! Browser TUI state management.
//!
//! Key handling is pure: it mutates state and returns a [`Command`] for the
//! event loop to carry out, so the screens can be tested without a terminal.

use cineseek_api::tmdb::images::movie_page_url;
use cineseek_api::tmdb::{CatalogError, TmdbMovieDetails, TmdbMovieSummary, TmdbSearchMovieResponse};
use cineseek_core::{ApplyOutcome, DetailLoader, PageRequest, SearchController, SearchOptions};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::TableState;

/// Rows from the end of the list at which the next page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 3;

/// Work the event loop must perform after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do.
    None,
    /// Leave the TUI.
    Quit,
    /// Run a search request.
    Search(PageRequest),
    /// Fetch details for a movie.
    LoadDetails {
        /// TMDB movie ID.
        movie_id: u64,
        /// Response language.
        language: String,
    },
    /// Open a URL in the browser.
    OpenUrl(String),
}

/// Input mode on the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// List navigation.
    Normal,
    /// Typing a query.
    Editing,
}

/// Active screen.
#[derive(Debug)]
pub enum Screen {
    /// Search box and result list.
    Search,
    /// Details of one movie.
    Details(DetailLoader),
}

/// State for the browser TUI.
#[derive(Debug)]
pub struct BrowserState {
    /// Pagination controller.
    pub controller: SearchController,
    /// Active screen.
    pub screen: Screen,
    /// Query being typed.
    pub input: String,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Table state for the result list.
    pub table_state: TableState,
    /// Validation message for the last submission.
    pub notice: Option<String>,
}

impl BrowserState {
    /// Creates a state in editing mode with an empty list.
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            controller: SearchController::new(options),
            screen: Screen::Search,
            input: String::new(),
            input_mode: InputMode::Editing,
            table_state: TableState::default(),
            notice: None,
        }
    }

    /// Loaded results.
    #[must_use]
    pub fn items(&self) -> &[TmdbMovieSummary] {
        self.controller.state().items()
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the selected movie (if any).
    #[must_use]
    pub fn selected(&self) -> Option<&TmdbMovieSummary> {
        self.items().get(self.table_state.selected()?)
    }

    /// Sets the query text and submits it.
    pub fn submit(&mut self) -> Command {
        match self.controller.submit_query(&self.input) {
            Ok(request) => {
                self.notice = None;
                self.input_mode = InputMode::Normal;
                self.table_state.select(None);
                Command::Search(request)
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Command::None
            }
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Command {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Quit;
        }
        if matches!(self.screen, Screen::Details(_)) {
            return self.handle_details_key(key);
        }
        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_list_key(key),
        }
    }

    /// Feeds a search outcome into the controller.
    pub fn apply_search(
        &mut self,
        request: &PageRequest,
        outcome: Result<TmdbSearchMovieResponse, CatalogError>,
    ) -> ApplyOutcome {
        let applied = self.controller.apply(request, outcome);
        if applied == ApplyOutcome::Applied
            && self.table_state.selected().is_none()
            && !self.items().is_empty()
        {
            self.table_state.select(Some(0));
        }
        applied
    }

    /// Feeds a details outcome into the open details screen.
    pub fn apply_details(
        &mut self,
        movie_id: u64,
        outcome: Result<TmdbMovieDetails, CatalogError>,
    ) -> bool {
        match &mut self.screen {
            Screen::Details(loader) => loader.complete(movie_id, outcome),
            Screen::Search => {
                tracing::debug!(movie_id, "details arrived after leaving the screen");
                false
            }
        }
    }

    fn handle_editing_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        Command::None
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('/' | 'i') => {
                self.input_mode = InputMode::Editing;
                Command::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                Command::None
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char('r') => self
                .controller
                .retry()
                .map_or(Command::None, Command::Search),
            KeyCode::Enter => self.open_details(),
            KeyCode::Char('o') => self
                .selected()
                .map_or(Command::None, |m| Command::OpenUrl(movie_page_url(m.id))),
            _ => Command::None,
        }
    }

    fn handle_details_key(&mut self, key: KeyCode) -> Command {
        let Screen::Details(loader) = &mut self.screen else {
            return Command::None;
        };
        match key {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.screen = Screen::Search;
                Command::None
            }
            KeyCode::Char('o') => Command::OpenUrl(movie_page_url(loader.movie_id())),
            KeyCode::Char('r') if loader.begin() => Command::LoadDetails {
                movie_id: loader.movie_id(),
                language: String::from(loader.language()),
            },
            _ => Command::None,
        }
    }

    /// Opens the details screen for the selected movie.
    fn open_details(&mut self) -> Command {
        let Some(movie_id) = self.selected().map(|m| m.id) else {
            return Command::None;
        };
        let language = self.controller.options().language.clone();
        let mut loader = DetailLoader::new(movie_id, language.as_str());
        let started = loader.begin();
        self.screen = Screen::Details(loader);
        if started {
            Command::LoadDetails { movie_id, language }
        } else {
            Command::None
        }
    }

    /// Moves cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves cursor down, requesting the next page near the end of the list.
    #[allow(clippy::arithmetic_side_effects)]
    fn move_down(&mut self) -> Command {
        let len = self.items().len();
        let current = self.cursor();
        if current + 1 < len {
            self.table_state.select(Some(current + 1));
        }
        if self.cursor() + LOAD_MORE_THRESHOLD >= len && self.controller.state().can_load_more() {
            return self
                .controller
                .load_next_page()
                .map_or(Command::None, Command::Search);
        }
        Command::None
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use cineseek_core::{DetailState, SearchPhase};

    use super::*;

    fn movie(id: u64) -> TmdbMovieSummary {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("Movie {id}") }))
            .unwrap()
    }

    fn response(page: u32, total_pages: u32, ids: &[u64]) -> TmdbSearchMovieResponse {
        TmdbSearchMovieResponse {
            page,
            results: ids.iter().copied().map(movie).collect(),
            total_pages,
            total_results: 0,
        }
    }

    fn type_query(state: &mut BrowserState, text: &str) -> Command {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        state.handle_key(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn press(state: &mut BrowserState, key: KeyCode) -> Command {
        state.handle_key(key, KeyModifiers::NONE)
    }

    fn searched(ids: &[u64], total_pages: u32) -> BrowserState {
        let mut state = BrowserState::new(SearchOptions::default());
        let Command::Search(request) = type_query(&mut state, "matrix") else {
            panic!("expected a search command");
        };
        state.apply_search(&request, Ok(response(1, total_pages, ids)));
        state
    }

    #[test]
    fn test_blank_submit_sets_notice() {
        // Arrange
        let mut state = BrowserState::new(SearchOptions::default());

        // Act
        let command = type_query(&mut state, "   ");

        // Assert
        assert_eq!(command, Command::None);
        assert_eq!(state.notice.as_deref(), Some("type a movie title to search"));
        assert_eq!(state.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_submit_issues_first_page() {
        // Arrange
        let mut state = BrowserState::new(SearchOptions::default());

        // Act
        let command = type_query(&mut state, "Matrix");

        // Assert
        let Command::Search(request) = command else {
            panic!("expected a search command");
        };
        assert_eq!(request.page(), 1);
        assert_eq!(request.params().query, "Matrix");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.controller.state().is_loading());
    }

    #[test]
    fn test_first_results_select_first_row() {
        // Arrange & Act
        let state = searched(&[1, 2], 1);

        // Assert
        assert_eq!(state.table_state.selected(), Some(0));
        assert_eq!(state.controller.state().phase(), SearchPhase::Exhausted);
    }

    #[test]
    fn test_scroll_near_end_requests_next_page_once() {
        // Arrange
        let mut state = searched(&[1, 2, 3, 4, 5], 2);

        // Act
        let first = press(&mut state, KeyCode::Down);
        let second = press(&mut state, KeyCode::Down);
        let third = press(&mut state, KeyCode::Down);

        // Assert
        assert_eq!(first, Command::None);
        let Command::Search(request) = second else {
            panic!("expected a next-page command");
        };
        assert_eq!(request.page(), 2);
        assert_eq!(third, Command::None);
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn test_scroll_far_from_end_does_not_load() {
        // Arrange
        let ids: Vec<u64> = (1..=20).collect();
        let mut state = searched(&ids, 3);

        // Act
        let command = press(&mut state, KeyCode::Char('j'));

        // Assert
        assert_eq!(command, Command::None);
        assert_eq!(state.controller.state().phase(), SearchPhase::Ready);
    }

    #[test]
    fn test_enter_opens_details_and_back_returns() {
        // Arrange
        let mut state = searched(&[603], 1);

        // Act
        let command = press(&mut state, KeyCode::Enter);

        // Assert
        assert_eq!(
            command,
            Command::LoadDetails {
                movie_id: 603,
                language: String::from("en-US"),
            }
        );
        assert!(matches!(state.screen, Screen::Details(ref l) if l.is_loading()));

        // Act
        press(&mut state, KeyCode::Esc);

        // Assert
        assert!(matches!(state.screen, Screen::Search));
        assert_eq!(state.table_state.selected(), Some(0));
    }

    #[test]
    fn test_details_failure_and_retry() {
        // Arrange
        let mut state = searched(&[603], 1);
        press(&mut state, KeyCode::Enter);

        // Act
        let accepted = state.apply_details(603, Err(CatalogError::Network(String::from("down"))));
        let retry = press(&mut state, KeyCode::Char('r'));

        // Assert
        assert!(accepted);
        assert!(matches!(retry, Command::LoadDetails { movie_id: 603, .. }));
        let Screen::Details(loader) = &state.screen else {
            panic!("expected details screen");
        };
        assert_eq!(loader.state(), &DetailState::Loading);
    }

    #[test]
    fn test_details_after_leaving_are_dropped() {
        // Arrange
        let mut state = searched(&[603], 1);
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('b'));
        let details: TmdbMovieDetails =
            serde_json::from_value(serde_json::json!({ "id": 603, "title": "The Matrix" }))
                .unwrap();

        // Act
        let accepted = state.apply_details(603, Ok(details));

        // Assert
        assert!(!accepted);
    }

    #[test]
    fn test_open_url_for_selected_movie() {
        // Arrange
        let mut state = searched(&[603], 1);

        // Act
        let command = press(&mut state, KeyCode::Char('o'));

        // Assert
        assert_eq!(
            command,
            Command::OpenUrl(String::from("https://www.themoviedb.org/movie/603"))
        );
    }

    #[test]
    fn test_retry_after_failed_search() {
        // Arrange
        let mut state = BrowserState::new(SearchOptions::default());
        let Command::Search(request) = type_query(&mut state, "matrix") else {
            panic!("expected a search command");
        };
        state.apply_search(&request, Err(CatalogError::Network(String::from("offline"))));

        // Act
        let command = press(&mut state, KeyCode::Char('r'));

        // Assert
        assert!(matches!(command, Command::Search(ref r) if r.page() == 1));
    }

    #[test]
    fn test_quit_keys() {
        let mut state = BrowserState::new(SearchOptions::default());
        assert_eq!(
            state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit
        );
        press(&mut state, KeyCode::Esc);
        assert_eq!(press(&mut state, KeyCode::Char('q')), Command::Quit);
    }
}
