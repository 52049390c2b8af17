//! Event classification: raw type label to [`EventKind`], and [`EventKind`]
//! to the counter it increments.

use crate::event::EventKind;
use crate::statistics::StatisticsBucket;

impl EventKind {
    /// Case-insensitive. Unknown labels become [`EventKind::Unclassified`];
    /// `site` is only kept for visits.
    pub fn from_label(label: &str, site: Option<&str>) -> Self {
        match label.to_lowercase().as_str() {
            "like" => EventKind::Like,
            "dislike" => EventKind::Dislike,
            "like_reset" => EventKind::LikeReset,
            "dislike_reset" => EventKind::DislikeReset,
            "comment" => EventKind::Comment,
            "visit" => EventKind::Visit {
                site: site.unwrap_or_default().to_string(),
            },
            _ => EventKind::Unclassified(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventKind::Like => "like",
            EventKind::Dislike => "dislike",
            EventKind::LikeReset => "like_reset",
            EventKind::DislikeReset => "dislike_reset",
            EventKind::Comment => "comment",
            EventKind::Visit { .. } => "visit",
            EventKind::Unclassified(label) => label,
        }
    }
}

/// Applies one event kind to `bucket`. Returns `false` for unclassified
/// kinds, which leave every counter untouched.
pub fn record(bucket: &mut StatisticsBucket, kind: &EventKind) -> bool {
    match kind {
        EventKind::Like => bucket.record_like(),
        EventKind::Dislike => bucket.record_dislike(),
        EventKind::LikeReset => bucket.record_like_reset(),
        EventKind::DislikeReset => bucket.record_dislike_reset(),
        EventKind::Comment => bucket.record_comment(),
        EventKind::Visit { site } => bucket.record_visit(site),
        EventKind::Unclassified(_) => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(EventKind::from_label("LIKE", None), EventKind::Like);
        assert_eq!(EventKind::from_label("Dislike", None), EventKind::Dislike);
        assert_eq!(EventKind::from_label("Like_Reset", None), EventKind::LikeReset);
        assert_eq!(EventKind::from_label("dislike_RESET", None), EventKind::DislikeReset);
        assert_eq!(EventKind::from_label("comment", None), EventKind::Comment);
    }

    #[test]
    fn test_visit_keeps_site_verbatim() {
        assert_eq!(
            EventKind::from_label("visit", Some("A.com ")),
            EventKind::Visit { site: "A.com ".into() }
        );
        assert_eq!(
            EventKind::from_label("VISIT", None),
            EventKind::Visit { site: String::new() }
        );
        // site is ignored for everything but visits
        assert_eq!(EventKind::from_label("like", Some("a.com")), EventKind::Like);
    }

    #[test]
    fn test_unknown_label_is_unclassified() {
        let kind = EventKind::from_label("share", None);
        assert_eq!(kind, EventKind::Unclassified("share".into()));
        assert_eq!(kind.label(), "share");

        let mut bucket = StatisticsBucket::new();
        assert!(!record(&mut bucket, &kind));
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_record_routes_to_counter() {
        let mut bucket = StatisticsBucket::new();
        for label in ["like", "dislike", "like_reset", "dislike_reset", "comment", "visit"] {
            assert!(record(&mut bucket, &EventKind::from_label(label, Some("a.com"))));
        }
        assert_eq!(bucket.likes, 1);
        assert_eq!(bucket.dislikes, 1);
        assert_eq!(bucket.like_resets, 1);
        assert_eq!(bucket.dislike_resets, 1);
        assert_eq!(bucket.comments, 1);
        assert_eq!(bucket.total_site_visits, 1);
        assert_eq!(bucket.site_visits["a.com"], 1);
    }
}
