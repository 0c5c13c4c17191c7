//! Run configuration.
//!
//! Values come from CLI flags, falling back to the process environment,
//! which may itself be seeded from a `.env` file via [`load_dotenv`].

use crate::error::{AtlasError, Result};
use crate::location::DEFAULT_RADIUS_M;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Where the branch list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSource {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub source: BranchSource,
    pub cache_path: PathBuf,
    pub out_dir: PathBuf,
    pub radius_m: u32,
    /// Pause after each pair of external calls.
    pub delay: Duration,
    /// Only use the cache; misses get an empty analysis and are not stored.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            source: BranchSource::Url(crate::branch::DEFAULT_SOURCE_URL.into()),
            cache_path: PathBuf::from(crate::location::cache::DEFAULT_CACHE_FILE),
            out_dir: PathBuf::from("."),
            radius_m: DEFAULT_RADIUS_M,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            offline: false,
        }
    }
}

impl Config {
    /// Fail fast, before any branch is processed.
    pub fn validate(&self) -> Result<()> {
        if !self.offline && self.api_key().is_none() {
            return Err(AtlasError::MissingApiKey);
        }
        if self.radius_m == 0 || self.radius_m > 50_000 {
            return Err(AtlasError::Config(format!(
                "radius must be between 1 and 50000 m, got {}",
                self.radius_m
            )));
        }
        Ok(())
    }

    /// The API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Load `.env` from the working directory or its ancestors. Returns the
/// file that was loaded, `None` when there is none.
///
/// Runs before the logger exists, so errors are returned for the caller to
/// report.
pub fn load_dotenv() -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a specific env file. `Ok(false)` when it does not exist.
pub fn load_dotenv_from(path: &Path) -> std::result::Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
