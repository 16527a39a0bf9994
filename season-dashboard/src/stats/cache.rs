// Time-bounded cache of fetched season tables.
//
// Entries expire `ttl` after insertion. Time comes from an injected `Clock`
// so tests can drive expiry deterministically (tokio's paused clock, or a
// hand-advanced one).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::model::SeasonTable;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock. Follows tokio's virtual time when paused in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cache key: one fetch per season and qualifying threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    pub year: i32,
    pub min_qualified: u32,
}

struct CacheEntry {
    table: Arc<SeasonTable>,
    inserted_at: Instant,
}

pub struct SeasonCache<C: Clock = TokioClock> {
    entries: HashMap<SeasonKey, CacheEntry>,
    ttl: Duration,
    clock: C,
}

impl SeasonCache<TokioClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, TokioClock)
    }
}

impl<C: Clock> SeasonCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached table for `key` if it has not expired. Expired
    /// entries are evicted on lookup.
    pub fn get(&mut self, key: &SeasonKey) -> Option<Arc<SeasonTable>> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => now.duration_since(entry.inserted_at) >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| Arc::clone(&e.table))
    }

    pub fn insert(&mut self, key: SeasonKey, table: Arc<SeasonTable>) {
        let inserted_at = self.clock.now();
        self.entries.insert(key, CacheEntry { table, inserted_at });
    }

    /// Drop every entry for `year`, whatever its qualifying threshold.
    /// Returns the number of entries removed.
    pub fn invalidate_year(&mut self, year: i32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.year != year);
        before - self.entries.len()
    }

    /// Evict all expired entries. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, e| now.duration_since(e.inserted_at) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
