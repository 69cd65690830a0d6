//! Interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Remote calls run as tokio
//! tasks and report back to the UI loop over an unbounded channel, so the
//! screen keeps redrawing while a request is in flight.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cineseek_api::tmdb::{
    CatalogError, LocalTmdbApi, TmdbClient, TmdbMovieDetails, TmdbSearchMovieResponse,
};
use cineseek_core::{ApplyOutcome, PageRequest, SearchOptions};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use self::state::{BrowserState, Command};

/// Completed remote call, delivered back to the UI loop.
#[derive(Debug)]
enum FetchResult {
    /// A search page.
    Search {
        request: PageRequest,
        outcome: Result<TmdbSearchMovieResponse, CatalogError>,
    },
    /// Movie details.
    Details {
        movie_id: u64,
        outcome: Result<TmdbMovieDetails, CatalogError>,
    },
}

/// Spawns remote calls on the runtime.
struct Fetcher {
    runtime: Handle,
    client: Arc<TmdbClient>,
    tx: UnboundedSender<FetchResult>,
}

impl Fetcher {
    fn search(&self, request: PageRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = client.search_movie(request.params()).await;
            // The receiver is gone only after the UI has exited.
            let _ = tx.send(FetchResult::Search { request, outcome });
        });
    }

    fn details(&self, movie_id: u64, language: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = client.movie_details(movie_id, &language).await;
            let _ = tx.send(FetchResult::Details { movie_id, outcome });
        });
    }
}

/// Runs the browser TUI until the user quits.
///
/// Must be called from inside a multi-thread tokio runtime; the calling
/// thread blocks on terminal input.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub fn run_browser(
    client: TmdbClient,
    options: SearchOptions,
    initial_query: Option<String>,
) -> Result<()> {
    let runtime = Handle::try_current().context("browser requires a tokio runtime")?;
    let (tx, mut rx) = unbounded_channel();
    let fetcher = Fetcher {
        runtime,
        client: Arc::new(client),
        tx,
    };

    let mut state = BrowserState::new(options);
    if let Some(query) = initial_query {
        state.input = query;
        let command = state.submit();
        execute(&fetcher, command);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = enter_alternate_screen()
        .and_then(|mut terminal| run_event_loop(&mut terminal, &mut state, &fetcher, &mut rx));

    // Cleanup (always attempt even if setup or the event loop failed)
    combine(result, restore_terminal())
}

/// Switches to the alternate screen and wraps stdout in a terminal.
fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

/// Leaves raw mode and the alternate screen; both steps always run.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("failed to disable raw mode");
    let screen = crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen");
    combine(raw, screen)
}

/// Merges two independent step results, keeping both errors when both fail.
fn combine(first: Result<()>, second: Result<()>) -> Result<()> {
    match (first, second) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(first), Err(second)) => Err(first.context(format!("{second:#}"))),
    }
}

/// Main event loop.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    fetcher: &Fetcher,
    rx: &mut UnboundedReceiver<FetchResult>,
) -> Result<()> {
    loop {
        while let Ok(result) = rx.try_recv() {
            apply_result(state, result);
        }

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if event::poll(Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let command = state.handle_key(key.code, key.modifiers);
            if command == Command::Quit {
                return Ok(());
            }
            execute(fetcher, command);
        }
    }
}

/// Carries out a command returned by key handling.
fn execute(fetcher: &Fetcher, command: Command) {
    match command {
        Command::None | Command::Quit => {}
        Command::Search(request) => fetcher.search(request),
        Command::LoadDetails { movie_id, language } => fetcher.details(movie_id, language),
        Command::OpenUrl(url) => {
            if let Err(e) = open::that(&url) {
                tracing::warn!(url, error = %e, "failed to open browser");
            }
        }
    }
}

/// Routes a completed fetch into the state.
fn apply_result(state: &mut BrowserState, result: FetchResult) {
    match result {
        FetchResult::Search { request, outcome } => {
            if state.apply_search(&request, outcome) == ApplyOutcome::Stale {
                tracing::debug!(
                    session = request.session(),
                    page = request.page(),
                    "ignored superseded page"
                );
            }
        }
        FetchResult::Details { movie_id, outcome } => {
            state.apply_details(movie_id, outcome);
        }
    }
}
