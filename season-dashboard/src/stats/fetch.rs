// Season data fetcher: validation, caching, and failure downgrade around a
// `SeasonProvider`.
//
// `fetch` never returns an error. Any failure is logged, turned into a
// user-facing message, and replaced by an empty table so the rest of the
// pipeline can carry on.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::cache::{Clock, SeasonCache, SeasonKey, TokioClock};
use super::model::SeasonTable;
use super::provider::{FetchError, SeasonProvider};

/// Result of one fetch: the table (empty on failure) and, on failure, the
/// message to show the user.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub table: Arc<SeasonTable>,
    pub error: Option<String>,
    /// Whether the table came from the cache.
    pub cached: bool,
}

impl FetchOutcome {
    fn failed(year: i32, err: &FetchError) -> Self {
        FetchOutcome {
            table: Arc::new(SeasonTable::empty(year)),
            error: Some(format!("Error fetching data for {year}: {err}")),
            cached: false,
        }
    }
}

/// Inclusive range of seasons the fetcher accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub earliest: i32,
    pub latest: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.earliest..=self.latest).contains(&year)
    }
}

pub struct SeasonFetcher<P: SeasonProvider, C: Clock = TokioClock> {
    provider: P,
    cache: SeasonCache<C>,
    years: YearRange,
}

impl<P: SeasonProvider, C: Clock> SeasonFetcher<P, C> {
    pub fn new(provider: P, cache: SeasonCache<C>, years: YearRange) -> Self {
        Self {
            provider,
            cache,
            years,
        }
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Fetch the batting table for `year`, from cache when fresh.
    pub async fn fetch(&mut self, year: i32, min_qualified: u32) -> FetchOutcome {
        if !self.years.contains(year) {
            let err = FetchError::InvalidYear {
                year,
                earliest: self.years.earliest,
                latest: self.years.latest,
            };
            error!("Rejected season request: {}", err);
            return FetchOutcome::failed(year, &err);
        }

        let key = SeasonKey {
            year,
            min_qualified,
        };
        if let Some(table) = self.cache.get(&key) {
            debug!(year, min_qualified, "season cache hit");
            return FetchOutcome {
                table,
                error: None,
                cached: true,
            };
        }

        match self.provider.fetch_season(year, min_qualified).await {
            Ok(table) => {
                info!(
                    "Fetched {} players for {} from {}",
                    table.len(),
                    year,
                    self.provider.name()
                );
                let table = Arc::new(table);
                self.cache.insert(key, Arc::clone(&table));
                FetchOutcome {
                    table,
                    error: None,
                    cached: false,
                }
            }
            Err(e) => {
                error!(
                    "Failed to fetch {} from {}: {}",
                    year,
                    self.provider.name(),
                    e
                );
                FetchOutcome::failed(year, &e)
            }
        }
    }

    /// Forget cached tables for `year` so the next fetch hits the provider.
    pub fn invalidate(&mut self, year: i32) -> usize {
        let removed = self.cache.invalidate_year(year);
        if removed > 0 {
            info!("Invalidated {} cached table(s) for {}", removed, year);
        }
        removed
    }

    pub fn cache(&self) -> &SeasonCache<C> {
        &self.cache
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
