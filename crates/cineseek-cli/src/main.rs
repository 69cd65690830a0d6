//! cineseek - search TMDB for movies from the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cineseek_api::tmdb::{LocalTmdbApi, TmdbClient};
use cineseek_core::controller::SEARCH_FAILED_NOTICE;
use cineseek_core::{
    DETAIL_FAILED_NOTICE, DetailLoader, DetailView, MovieCard, SearchController,
    SearchOptions, SearchPhase,
};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title.
    Search(SearchArgs),
    /// Show details for one movie.
    Details(DetailsArgs),
    /// Browse search results interactively.
    Browse(BrowseArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Movie title to search for.
    #[arg(long)]
    query: String,

    /// Number of result pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,

    /// Only movies released in this year.
    #[arg(long)]
    year: Option<u32>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: u64,

    /// Response language (overrides config).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Query to search for on startup.
    #[arg(long)]
    query: Option<String>,
}

/// Loads the config file and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = AppConfig::path(dir.map(PathBuf::as_path)).context("failed to resolve config path")?;
    let config = AppConfig::load(&path).context("failed to load config")?;
    Ok(config.with_env_overrides())
}

/// Builds search options from the `[tmdb]` table.
fn search_options(config: &TmdbConfig, language: Option<String>) -> SearchOptions {
    SearchOptions {
        language: language.unwrap_or_else(|| config.language.clone()),
        include_adult: config.include_adult,
        region: config.region.clone(),
        year: None,
    }
}

/// Builds a `TmdbClient` from the `[tmdb]` table.
///
/// # Errors
///
/// Returns an error if no credential is configured, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    if !config.has_credential() {
        bail!(
            "TMDB credentials are required: set TMDB_API_TOKEN or TMDB_API_KEY, \
             or api_token / api_key under [tmdb] in config.toml"
        );
    }

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(key) = &config.api_key {
        builder = builder.api_key(key);
    }
    if let Some(token) = &config.api_token {
        builder = builder.api_token(token);
    }
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error for a blank query, missing credentials, or a failed request.
#[instrument(skip_all)]
async fn run_search(args: SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let mut options = search_options(&config.tmdb, args.language);
    options.year = args.year;
    let mut controller = SearchController::new(options);

    // Validate before touching credentials.
    let request = controller.submit_query(&args.query)?;
    let client = build_tmdb_client(&config.tmdb)?;

    let outcome = client.search_movie(request.params()).await;
    controller.apply(&request, outcome);
    while controller.state().current_page() < args.pages
        && controller.fetch_next_page(&client).await.is_some()
    {}

    let state = controller.state();
    let failure = (state.phase() == SearchPhase::Failed).then(|| {
        format!(
            "{SEARCH_FAILED_NOTICE} {}",
            state.failure_message().unwrap_or_default()
        )
    });
    if let Some(failure) = &failure
        && state.items().is_empty()
    {
        bail!("{failure}");
    }
    if let Some(empty) = state.empty_message() {
        tracing::info!("{}", empty.text());
        return Ok(());
    }

    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in state.items() {
        let card = MovieCard::from(movie);
        tracing::info!("{}\t{}\t{}\t{}", card.id, card.year, card.rating, card.title);
    }
    tracing::info!(
        "Loaded {} of {} movies (page {}/{})",
        state.items().len(),
        state.total_results(),
        state.current_page(),
        state.total_pages()
    );

    // Pages loaded before a next-page failure are kept and printed above.
    match failure {
        Some(failure) => bail!("{failure}"),
        None => Ok(()),
    }
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error for missing credentials or a failed request.
#[instrument(skip_all)]
async fn run_details(args: DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let language = args
        .language
        .unwrap_or_else(|| config.tmdb.language.clone());
    let client = build_tmdb_client(&config.tmdb)?;

    let mut loader = DetailLoader::new(args.id, language);
    loader.load(&client).await;
    let Some(details) = loader.details().map(DetailView::from) else {
        bail!("{DETAIL_FAILED_NOTICE} (movie {})", args.id);
    };

    tracing::info!("{}", details.title);
    if let Some(tagline) = &details.tagline {
        tracing::info!("{tagline}");
    }
    tracing::info!("Release date: {}", details.release_date);
    tracing::info!("Runtime:      {}", details.runtime);
    tracing::info!("Rating:       {} {}", details.rating, details.votes);
    if !details.genres.is_empty() {
        tracing::info!("Genres:       {}", details.genres.join(" | "));
    }
    if let Some(companies) = &details.companies {
        tracing::info!("Production:   {companies}");
    }
    tracing::info!("Overview:     {}", details.overview);
    tracing::info!("Poster:       {}", details.poster_url);
    if let Some(backdrop) = &details.backdrop_url {
        tracing::info!("Backdrop:     {backdrop}");
    }
    tracing::info!("TMDB:         {}", details.page_url);

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error for missing credentials or a TUI failure.
fn run_browse(args: BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;
    let options = search_options(&config.tmdb, None);

    tokio::task::block_in_place(|| tui::run_browser(client, options, args.query))
        .context("movie browser TUI failed")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => run_search(args, cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(args, cli.dir.as_ref()).await,
        Commands::Browse(args) => run_browse(args, cli.dir.as_ref()),
    }
}
