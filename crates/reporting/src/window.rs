//! Window assignment. Both bounds are exclusive: an event stamped exactly at a
//! window's start or end does not belong to that window.

use chrono::{DateTime, Utc};
use campaign_core::types::CampaignParameters;

use crate::event::Event;

pub fn contains(window: &CampaignParameters, timestamp: DateTime<Utc>) -> bool {
    timestamp > window.start && timestamp < window.end
}

/// Events of `events` that fall inside `window`, in their original order.
pub fn events_in<'a>(
    window: &'a CampaignParameters,
    events: &'a [Event],
) -> impl Iterator<Item = &'a Event> + 'a {
    events.iter().filter(move |e| contains(window, e.timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Attribution, EventKind};
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn window(start: u32, end: u32) -> CampaignParameters {
        CampaignParameters {
            start: at(start),
            end: at(end),
            interests: vec![],
            timestamps: vec![],
            requests: vec![],
        }
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let w = window(0, 10);
        assert!(!contains(&w, at(0)));
        assert!(contains(&w, at(1)));
        assert!(contains(&w, at(9)));
        assert!(!contains(&w, at(10)));
        assert!(!contains(&w, at(11)));
    }

    #[test]
    fn test_degenerate_window_contains_nothing() {
        let w = window(5, 5);
        assert!(!contains(&w, at(5)));
    }

    #[test]
    fn test_events_in_preserves_order() {
        let events: Vec<Event> = [3, 10, 1, 0, 7]
            .iter()
            .map(|m| Event::new(EventKind::Like, at(*m), Attribution::Unattributed))
            .collect();
        let w = window(0, 10);
        let inside: Vec<DateTime<Utc>> = events_in(&w, &events).map(|e| e.timestamp).collect();
        assert_eq!(inside, vec![at(3), at(1), at(7)]);
    }
}
