use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(300);
const DEFAULT_CAPACITY: u64 = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub total_size: u64,
    pub total_objects: u64,
}

/// Per-project bucket totals. Entries expire after the TTL and are dropped
/// explicitly after any write to the bucket.
#[derive(Clone)]
pub struct BucketStatsCache {
    inner: Cache<String, BucketStats>,
}

impl BucketStatsCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn get(&self, project: &str) -> Option<BucketStats> {
        self.inner.get(project)
    }

    pub fn insert(&self, project: &str, stats: BucketStats) {
        self.inner.insert(project.to_string(), stats);
    }

    pub fn invalidate(&self, project: &str) {
        self.inner.invalidate(project);
    }
}

impl Default for BucketStatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_STATS_TTL)
    }
}

impl std::fmt::Debug for BucketStatsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketStatsCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_invalidate() {
        let cache = BucketStatsCache::default();
        let stats = BucketStats {
            total_size: 42,
            total_objects: 2,
        };
        cache.insert("demo", stats);
        assert_eq!(cache.get("demo"), Some(stats));
        assert_eq!(cache.get("other"), None);

        cache.invalidate("demo");
        assert_eq!(cache.get("demo"), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache = BucketStatsCache::new(8, Duration::from_millis(50));
        cache.insert("demo", BucketStats::default());
        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get("demo"), None);
    }
}
