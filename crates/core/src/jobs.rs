//! Short-lived in-memory job cache.
//!
//! Maps a slug's hash suffix to a full job record so detail pages can be
//! resolved without re-querying the remote API. Entries carry an absolute
//! expiration and are evicted lazily, on read or during a snapshot scan;
//! there is no background eviction.
//!
//! Keying by the hash suffix (not the full slug) means a later insert
//! sharing the same suffix silently overwrites the earlier entry; last
//! write wins.

use crate::job::Job;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct Entry {
    job: Job,
    expires_at: DateTime<Utc>,
}

/// Process-wide cache of recently seen job records.
///
/// Shared across concurrent requests; each entry is a single map slot, so
/// concurrent writers to different hashes never interfere and writers to
/// the same hash produce a last-write-wins outcome.
pub struct JobCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JobCache {
    /// Create a cache whose entries expire `ttl_seconds` after insertion.
    pub fn new(ttl_seconds: i64) -> Self {
        Self::with_clock(ttl_seconds, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    pub fn with_clock(ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl: Duration::seconds(ttl_seconds), clock }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or overwrite an entry per job, keyed by its hash suffix,
    /// with a freshly computed expiration.
    pub fn remember(&self, jobs: &[Job]) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entries = self.entries();
        for job in jobs {
            entries.insert(job.hash().to_string(), Entry { job: job.clone(), expires_at });
        }
    }

    /// Look up a job by hash suffix, evicting the entry if it has expired.
    pub fn get(&self, hash: &str) -> Option<Job> {
        let now = self.clock.now();
        let mut entries = self.entries();
        match entries.get(hash) {
            Some(entry) if entry.expires_at > now => Some(entry.job.clone()),
            Some(_) => {
                entries.remove(hash);
                None
            }
            None => None,
        }
    }

    /// All currently non-expired jobs, evicting expired entries as a side
    /// effect of the scan.
    ///
    /// This is not a complete catalog; it holds whatever recent searches
    /// happened to return and may be empty.
    pub fn snapshot(&self) -> Vec<Job> {
        let now = self.clock.now();
        let mut entries = self.entries();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.values().map(|entry| entry.job.clone()).collect()
    }
}
