//! Target bucket resolution: which per-window bucket an event's counts flow to.

use crate::classifier;
use crate::event::{Attribution, Event, EventKind, InterestSet};
use crate::statistics::{BucketMap, StatisticsBucket};

impl Attribution {
    /// Decided once at ingestion. A non-zero influencer id wins over
    /// interests; an event with neither is unattributed.
    pub fn resolve<I, S>(influencer_id: u64, influencer_username: &str, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if influencer_id != 0 {
            return Attribution::ByInfluencer {
                id: influencer_id,
                username: influencer_username.to_string(),
            };
        }
        let set = InterestSet::new(interests);
        if set.is_empty() {
            Attribution::Unattributed
        } else {
            Attribution::ByInterestSet(set)
        }
    }
}

/// The buckets of one window, one map per target kind plus the direct bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetBuckets {
    pub influencers: BucketMap<String>,
    pub interest_groups: BucketMap<InterestSet>,
    pub direct: StatisticsBucket,
}

impl TargetBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single bucket this event is attributed to, created on first use.
    pub fn bucket_for(&mut self, attribution: &Attribution) -> &mut StatisticsBucket {
        match attribution {
            Attribution::ByInfluencer { username, .. } => {
                self.influencers.get_or_create(username.clone())
            }
            Attribution::ByInterestSet(set) => self.interest_groups.get_or_create(set.clone()),
            Attribution::Unattributed => &mut self.direct,
        }
    }

    /// Records an event into its target bucket. Unclassified events do not
    /// create a bucket.
    pub fn record(&mut self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Unclassified(_)) {
            return false;
        }
        classifier::record(self.bucket_for(&event.attribution), &event.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_influencer_wins_over_interests() {
        let attribution = Attribution::resolve(7, "bob", ["sports"]);
        assert_eq!(
            attribution,
            Attribution::ByInfluencer {
                id: 7,
                username: "bob".into()
            }
        );
    }

    #[test]
    fn test_interests_when_no_influencer() {
        let attribution = Attribution::resolve(0, "", ["sports", "music"]);
        assert_eq!(
            attribution,
            Attribution::ByInterestSet(InterestSet::new(["music", "sports"]))
        );
    }

    #[test]
    fn test_neither_is_unattributed() {
        assert_eq!(
            Attribution::resolve(0, "ghost", Vec::<String>::new()),
            Attribution::Unattributed
        );
    }

    #[test]
    fn test_each_event_lands_in_one_bucket() {
        let mut buckets = TargetBuckets::new();
        let now = Utc::now();
        buckets.record(&Event::new(
            EventKind::Like,
            now,
            Attribution::resolve(7, "bob", ["sports"]),
        ));
        buckets.record(&Event::new(
            EventKind::Like,
            now,
            Attribution::resolve(0, "", ["sports"]),
        ));
        buckets.record(&Event::new(EventKind::Comment, now, Attribution::Unattributed));

        assert_eq!(buckets.influencers.get(&"bob".to_string()).unwrap().likes, 1);
        assert_eq!(
            buckets
                .interest_groups
                .get(&InterestSet::new(["sports"]))
                .unwrap()
                .likes,
            1
        );
        assert_eq!(buckets.direct.comments, 1);
        assert_eq!(buckets.direct.likes, 0);
    }

    #[test]
    fn test_unclassified_creates_no_bucket() {
        let mut buckets = TargetBuckets::new();
        let recorded = buckets.record(&Event::new(
            EventKind::Unclassified("share".into()),
            Utc::now(),
            Attribution::resolve(7, "bob", Vec::<String>::new()),
        ));
        assert!(!recorded);
        assert!(buckets.influencers.is_empty());
    }
}
