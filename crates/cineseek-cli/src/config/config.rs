//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable holding a TMDB v3 API key.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Environment variable holding a TMDB v4 bearer token.
pub const ENV_API_TOKEN: &str = "TMDB_API_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access and request defaults.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// `[tmdb]` table.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// v4 bearer token.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,
    /// Include adult titles in searches.
    #[serde(default)]
    pub include_adult: bool,
    /// Region filter for searches.
    #[serde(default)]
    pub region: Option<String>,
    /// API base URL; defaults to `https://api.themoviedb.org/3/`.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_language() -> String {
    String::from("en-US")
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_token: None,
            language: default_language(),
            include_adult: false,
            region: None,
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Config file location: `{dir}/config.toml` when a directory is given,
    /// `$HOME/.config/cineseek/config.toml` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is `None` and `HOME` is unset.
    pub fn path(dir: Option<&Path>) -> Result<PathBuf> {
        let base = match dir {
            Some(d) => d.to_path_buf(),
            None => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config").join("cineseek"))
                .context("HOME environment variable is not set")?,
        };
        Ok(base.join("config.toml"))
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Applies `TMDB_API_KEY` / `TMDB_API_TOKEN` from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies credential overrides from `lookup`. Blank values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_blank(ENV_API_KEY) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = non_blank(ENV_API_TOKEN) {
            self.tmdb.api_token = Some(token);
        }
        self
    }
}

impl TmdbConfig {
    /// Whether any credential is configured.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        [&self.api_key, &self.api_token]
            .into_iter()
            .flatten()
            .any(|v| !v.trim().is_empty())
    }
}
