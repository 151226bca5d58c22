//! Per-item memoization of normalized attribute values and per-activity
//! scores.
//!
//! Entries expire once their age exceeds the configured time-to-live and
//! are rebuilt transparently on the next lookup.

use std::collections::BTreeMap;

use outfit_types::{ActivityId, AttributeId, ItemId};

/// Cached values for one item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
    /// Simulated time the entry was (re)started.
    pub last_computed: u64,
    /// Normalized value per attribute.
    pub attribute_scores: BTreeMap<AttributeId, f64>,
    /// Priority score under each activity's own weight set.
    pub activity_scores: BTreeMap<ActivityId, f64>,
}

impl CacheEntry {
    const fn started_at(now: u64) -> Self {
        Self {
            last_computed: now,
            attribute_scores: BTreeMap::new(),
            activity_scores: BTreeMap::new(),
        }
    }
}

/// Time-limited score cache keyed by item.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    ttl: u64,
    entries: BTreeMap<ItemId, CacheEntry>,
}

impl ScoreCache {
    /// Create an empty cache whose entries live for `ttl` time units.
    pub const fn new(ttl: u64) -> Self {
        Self {
            ttl,
            entries: BTreeMap::new(),
        }
    }

    /// Time-to-live of entries.
    pub const fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Number of cached items, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry started at `last_computed` is still valid at `now`.
    pub const fn is_fresh(&self, last_computed: u64, now: u64) -> bool {
        now.saturating_sub(last_computed) <= self.ttl
    }

    /// Fresh entry for an item, without creating one.
    pub fn get(&self, item: ItemId, now: u64) -> Option<&CacheEntry> {
        self.entries
            .get(&item)
            .filter(|entry| self.is_fresh(entry.last_computed, now))
    }

    /// Entry for an item, started over if missing or expired.
    pub fn entry(&mut self, item: ItemId, now: u64) -> &mut CacheEntry {
        let ttl = self.ttl;
        let entry = self
            .entries
            .entry(item)
            .or_insert_with(|| CacheEntry::started_at(now));
        if now.saturating_sub(entry.last_computed) > ttl {
            tracing::debug!(%item, age = now.saturating_sub(entry.last_computed), "cache entry expired");
            *entry = CacheEntry::started_at(now);
        }
        entry
    }

    /// Drop one item's entry. Returns whether it existed.
    pub fn invalidate(&mut self, item: ItemId) -> bool {
        self.entries.remove(&item).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn evict_expired(&mut self, now: u64) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.last_computed) <= ttl);
        before.saturating_sub(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_survive_within_ttl() {
        let mut cache = ScoreCache::new(360);
        let item = ItemId::new();
        cache
            .entry(item, 0)
            .attribute_scores
            .insert(AttributeId::from_index(1), 0.5);
        let entry = cache.entry(item, 360);
        assert_eq!(entry.attribute_scores.len(), 1);
        assert_eq!(entry.last_computed, 0);
    }

    #[test]
    fn expired_entries_restart() {
        let mut cache = ScoreCache::new(360);
        let item = ItemId::new();
        cache
            .entry(item, 0)
            .activity_scores
            .insert(ActivityId::from_index(0), 1.0);
        assert!(cache.get(item, 361).is_none());
        let entry = cache.entry(item, 361);
        assert!(entry.activity_scores.is_empty());
        assert_eq!(entry.last_computed, 361);
    }

    #[test]
    fn invalidate_and_evict() {
        let mut cache = ScoreCache::new(10);
        let fresh = ItemId::new();
        let stale = ItemId::new();
        cache.entry(stale, 0);
        cache.entry(fresh, 15);
        assert_eq!(cache.evict_expired(20), 1);
        assert!(cache.invalidate(fresh));
        assert!(!cache.invalidate(fresh));
        assert!(cache.is_empty());
    }
}
