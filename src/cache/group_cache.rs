//! In-memory overview cache for NNTP groups, bounded by
//! `ConfigView::nntp_acache_len` entries per group via an LRU eviction
//! policy — a group with tens of thousands of articles shouldn't force the
//! whole overview database to stay resident just because a few recent
//! articles were read.

use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::nntp::overview::OverviewRow;

pub struct GroupOverviewCache {
    capacity_per_group: NonZeroUsize,
    groups: HashMap<String, LruCache<u32, OverviewRow>>,
}

impl GroupOverviewCache {
    pub fn new(capacity_per_group: usize) -> Self {
        Self {
            capacity_per_group: NonZeroUsize::new(capacity_per_group.max(1)).expect("max(1) is never zero"),
            groups: HashMap::new(),
        }
    }

    pub fn insert(&mut self, group: &str, row: OverviewRow) {
        let cache = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| LruCache::new(self.capacity_per_group));
        cache.put(row.number, row);
    }

    pub fn get(&mut self, group: &str, number: u32) -> Option<&OverviewRow> {
        self.groups.get_mut(group).and_then(|cache| cache.get(&number))
    }

    pub fn len(&self, group: &str) -> usize {
        self.groups.get(group).map(|c| c.len()).unwrap_or(0)
    }

    /// Drops every overview row cached for `group`, discarding it entirely
    /// rather than evicting it the normal LRU way — used when the group's
    /// article numbering can no longer be trusted (see
    /// `crate::nntp::group::sync_group_high_water`).
    pub fn clear_group(&mut self, group: &str) {
        self.groups.remove(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: u32) -> OverviewRow {
        OverviewRow {
            number,
            subject: "s".to_string(),
            from: "f".to_string(),
            date: "d".to_string(),
            message_id: format!("<{number}@x>"),
            references: Vec::new(),
            bytes: 0,
            lines: 0,
        }
    }

    #[test]
    fn insert_and_get_round_trips() {
        let mut cache = GroupOverviewCache::new(10);
        cache.insert("g", row(1));
        assert_eq!(cache.get("g", 1).unwrap().number, 1);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let mut cache = GroupOverviewCache::new(2);
        cache.insert("g", row(1));
        cache.insert("g", row(2));
        cache.insert("g", row(3));
        assert_eq!(cache.len("g"), 2);
        assert!(cache.get("g", 1).is_none());
        assert!(cache.get("g", 3).is_some());
    }

    #[test]
    fn groups_are_independent() {
        let mut cache = GroupOverviewCache::new(1);
        cache.insert("g1", row(1));
        cache.insert("g2", row(1));
        assert!(cache.get("g1", 1).is_some());
        assert!(cache.get("g2", 1).is_some());
    }

    #[test]
    fn clear_group_drops_only_that_group() {
        let mut cache = GroupOverviewCache::new(10);
        cache.insert("g1", row(1));
        cache.insert("g2", row(1));
        cache.clear_group("g1");
        assert_eq!(cache.len("g1"), 0);
        assert_eq!(cache.len("g2"), 1);
    }
}
