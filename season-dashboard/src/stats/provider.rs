// Season data providers: the seam between the dashboard and wherever the
// batting statistics actually come from.

use async_trait::async_trait;

use super::csv_source::CsvSeasonProvider;
use super::fangraphs::FanGraphsProvider;
use super::model::SeasonTable;
use crate::config::{DataConfig, DataSource};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("unexpected response format: {0}")]
    Decode(String),

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("season {year} is outside {earliest}..={latest}")]
    InvalidYear {
        year: i32,
        earliest: i32,
        latest: i32,
    },

    #[error("{0}")]
    Provider(String),
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// A source of per-season batting tables.
#[async_trait]
pub trait SeasonProvider: Send + Sync {
    /// Fetch every player with at least `min_qualified` plate appearances in
    /// `year`.
    async fn fetch_season(&self, year: i32, min_qualified: u32)
        -> Result<SeasonTable, FetchError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// The configured provider.
pub enum AnyProvider {
    FanGraphs(FanGraphsProvider),
    Csv(CsvSeasonProvider),
}

impl AnyProvider {
    /// Build the provider selected by `[data] source`.
    pub fn from_config(data: &DataConfig) -> Result<Self, FetchError> {
        match data.source {
            DataSource::FanGraphs => Ok(AnyProvider::FanGraphs(FanGraphsProvider::new(
                data.base_url.clone(),
                data.request_timeout_secs,
                data.page_items,
            )?)),
            DataSource::Csv => Ok(AnyProvider::Csv(CsvSeasonProvider::new(&data.csv_dir))),
        }
    }
}

#[async_trait]
impl SeasonProvider for AnyProvider {
    async fn fetch_season(
        &self,
        year: i32,
        min_qualified: u32,
    ) -> Result<SeasonTable, FetchError> {
        match self {
            AnyProvider::FanGraphs(p) => p.fetch_season(year, min_qualified).await,
            AnyProvider::Csv(p) => p.fetch_season(year, min_qualified).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyProvider::FanGraphs(p) => p.name(),
            AnyProvider::Csv(p) => p.name(),
        }
    }
}
