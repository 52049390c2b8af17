//! Per-bucket counters and the keyed bucket map used for per-target breakdowns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters for one attribution key: overall, one influencer, one interest
/// set, or the direct bucket of a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsBucket {
    pub likes: u64,
    pub dislikes: u64,
    pub like_resets: u64,
    pub dislike_resets: u64,
    pub comments: u64,
    pub total_site_visits: u64,
    pub site_visits: BTreeMap<String, u64>,
}

impl StatisticsBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_like(&mut self) {
        self.likes += 1;
    }

    pub fn record_dislike(&mut self) {
        self.dislikes += 1;
    }

    pub fn record_like_reset(&mut self) {
        self.like_resets += 1;
    }

    pub fn record_dislike_reset(&mut self) {
        self.dislike_resets += 1;
    }

    pub fn record_comment(&mut self) {
        self.comments += 1;
    }

    /// Counts the visit in the total and under `site`, verbatim.
    pub fn record_visit(&mut self, site: &str) {
        self.total_site_visits += 1;
        *self.site_visits.entry(site.to_string()).or_insert(0) += 1;
    }

    /// Sums every counter of `other` into `self` and unions the site tallies.
    pub fn merge(&mut self, other: &StatisticsBucket) {
        self.likes += other.likes;
        self.dislikes += other.dislikes;
        self.like_resets += other.like_resets;
        self.dislike_resets += other.dislike_resets;
        self.comments += other.comments;
        self.total_site_visits += other.total_site_visits;
        for (site, visits) in &other.site_visits {
            *self.site_visits.entry(site.clone()).or_insert(0) += visits;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Buckets keyed by a canonical attribution key, created on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketMap<K: Ord> {
    buckets: BTreeMap<K, StatisticsBucket>,
}

impl<K: Ord> BucketMap<K> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    pub fn get_or_create(&mut self, key: K) -> &mut StatisticsBucket {
        self.buckets.entry(key).or_default()
    }

    pub fn get(&self, key: &K) -> Option<&StatisticsBucket> {
        self.buckets.get(key)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &StatisticsBucket)> {
        self.buckets.iter()
    }

    pub fn into_inner(self) -> BTreeMap<K, StatisticsBucket> {
        self.buckets
    }
}

impl<K: Ord> Default for BucketMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counters() {
        let mut bucket = StatisticsBucket::new();
        assert!(bucket.is_empty());
        bucket.record_like();
        bucket.record_like();
        bucket.record_dislike();
        bucket.record_like_reset();
        bucket.record_dislike_reset();
        bucket.record_comment();
        assert_eq!(bucket.likes, 2);
        assert_eq!(bucket.dislikes, 1);
        assert_eq!(bucket.like_resets, 1);
        assert_eq!(bucket.dislike_resets, 1);
        assert_eq!(bucket.comments, 1);
        assert_eq!(bucket.total_site_visits, 0);
    }

    #[test]
    fn test_site_tally_matches_total() {
        let mut bucket = StatisticsBucket::new();
        for site in ["a.com", "b.com", "a.com", "", "a.com"] {
            bucket.record_visit(site);
        }
        assert_eq!(bucket.total_site_visits, 5);
        assert_eq!(bucket.site_visits["a.com"], 3);
        assert_eq!(bucket.site_visits["b.com"], 1);
        // empty identifiers are kept as-is
        assert_eq!(bucket.site_visits[""], 1);
        assert_eq!(bucket.site_visits.values().sum::<u64>(), bucket.total_site_visits);
    }

    #[test]
    fn test_merge_sums_and_unions() {
        let mut a = StatisticsBucket::new();
        a.record_like();
        a.record_visit("a.com");

        let mut b = StatisticsBucket::new();
        b.record_like();
        b.record_comment();
        b.record_visit("a.com");
        b.record_visit("c.com");

        a.merge(&b);
        assert_eq!(a.likes, 2);
        assert_eq!(a.comments, 1);
        assert_eq!(a.total_site_visits, 3);
        assert_eq!(a.site_visits["a.com"], 2);
        assert_eq!(a.site_visits["c.com"], 1);
    }

    #[test]
    fn test_bucket_map_get_or_create() {
        let mut map: BucketMap<String> = BucketMap::new();
        map.get_or_create("bob".into()).record_like();
        map.get_or_create("bob".into()).record_like();
        map.get_or_create("alice".into()).record_comment();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"bob".to_string()).unwrap().likes, 2);
        let keys: Vec<&String> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alice", "bob"]);
    }
}
