//! TUI rendering logic for the browser.

use cineseek_core::controller::SEARCH_FAILED_NOTICE;
use cineseek_core::{DetailLoader, DetailState, DetailView, MovieCard, SearchPhase};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::{BrowserState, InputMode, Screen};

/// Shown while page 1 of a search loads.
const SEARCHING_TEXT: &str = "Searching movies...";
/// Shown while a further page loads.
const LOADING_MORE_TEXT: &str = "Loading more movies...";
/// Shown while details load.
const LOADING_DETAILS_TEXT: &str = "Loading movie details...";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_search_box(frame, chunks[0], state);
    if let Screen::Details(loader) = &state.screen {
        draw_details(frame, chunks[1], loader);
    } else {
        draw_results(frame, chunks[1], state);
    }
    draw_footer(frame, chunks[2], state);
}

/// Draws the query input with the result count.
fn draw_search_box(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let editing = state.input_mode == InputMode::Editing && matches!(state.screen, Screen::Search);
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search = state.controller.state();
    let title = if search.total_results() > 0 {
        format!(
            " Search: /  ({} of {} movies) ",
            search.items().len(),
            search.total_results()
        )
    } else {
        String::from(" Search: / ")
    };

    let input = Paragraph::new(state.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

/// Draws the result list, or the empty/loading message in its place.
fn draw_results(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let search = state.controller.state();

    if search.items().is_empty() {
        let text = match search.phase() {
            SearchPhase::LoadingFirstPage => String::from(SEARCHING_TEXT),
            SearchPhase::Failed => failure_text(search.failure_message()),
            _ => search
                .empty_message()
                .map(|m| String::from(m.text()))
                .unwrap_or_default(),
        };
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Movies "));
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(vec!["Year", "Rating", "Title"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = search
        .items()
        .iter()
        .map(|m| {
            let card = MovieCard::from(m);
            Row::new(vec![card.year, card.rating, card.title])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Movies "))
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the details screen.
fn draw_details(frame: &mut Frame, area: Rect, loader: &DetailLoader) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Movie {} ", loader.movie_id()))
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match loader.state() {
        DetailState::Idle | DetailState::Loading => vec![Line::from(LOADING_DETAILS_TEXT)],
        DetailState::Failed(notice) => vec![
            Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from("r: retry  Esc: back"),
        ],
        DetailState::Loaded(details) => detail_lines(&DetailView::from(details.as_ref())),
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Lays out a detail view as text lines.
fn detail_lines(view: &DetailView) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![Line::from(Span::styled(
        view.title.clone(),
        bold.fg(Color::Yellow),
    ))];
    if let Some(tagline) = &view.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "{}  \u{2022}  {}  \u{2022}  {} {}",
        view.release_date, view.runtime, view.rating, view.votes
    )));
    if !view.genres.is_empty() {
        let badges: Vec<Span> = view
            .genres
            .iter()
            .flat_map(|g| {
                [
                    Span::styled(format!("[{g}]"), Style::default().fg(Color::Green)),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(badges));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Overview", bold)));
    lines.push(Line::from(view.overview.clone()));
    if let Some(companies) = &view.companies {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Production", bold)));
        lines.push(Line::from(companies.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("Poster:   {}", view.poster_url), dim)));
    if let Some(backdrop) = &view.backdrop_url {
        lines.push(Line::from(Span::styled(format!("Backdrop: {backdrop}"), dim)));
    }
    lines.push(Line::from(Span::styled(format!("TMDB:     {}", view.page_url), dim)));
    lines
}

/// Failure notice with the underlying reason.
fn failure_text(reason: Option<&str>) -> String {
    reason.map_or_else(
        || String::from(SEARCH_FAILED_NOTICE),
        |r| format!("{SEARCH_FAILED_NOTICE} ({r})"),
    )
}

/// Draws the footer with status and key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let search = state.controller.state();
    let status = match (&state.screen, search.phase()) {
        (Screen::Search, _) if state.notice.is_some() => Some(Span::styled(
            state.notice.clone().unwrap_or_default(),
            Style::default().fg(Color::Red),
        )),
        (Screen::Search, SearchPhase::LoadingNextPage) => Some(Span::styled(
            LOADING_MORE_TEXT,
            Style::default().fg(Color::Yellow),
        )),
        (Screen::Search, SearchPhase::Failed) if !search.items().is_empty() => Some(Span::styled(
            failure_text(search.failure_message()),
            Style::default().fg(Color::Red),
        )),
        _ => None,
    };

    let hints = match (&state.screen, state.input_mode) {
        (Screen::Details(_), _) => "Esc/b: back  o: open in browser  r: retry  q: quit",
        (Screen::Search, InputMode::Editing) => "Type a title | Enter: search | Esc: list",
        (Screen::Search, InputMode::Normal) => {
            "\u{2191}\u{2193}/j/k: move  Enter: details  /: search  o: open  r: retry  q: quit"
        }
    };

    let mut spans = Vec::new();
    if let Some(status) = status {
        spans.push(status);
        spans.push(Span::raw("  |  "));
    }
    spans.push(Span::raw(hints));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
