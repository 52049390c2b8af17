//! Report builder — folds one campaign's event log into overall and
//! per-window statistics.
//!
//! The build is a pure function of `(campaign, events)`: it never fails and
//! holds nothing between calls.

use campaign_core::types::{Campaign, CampaignParameters, RequestStatus};
use tracing::{debug, info};

use crate::attribution::TargetBuckets;
use crate::classifier;
use crate::event::{Event, EventKind};
use crate::report::{BasicInformation, CampaignReport, OverallStatistics, ParametersStatistics};
use crate::statistics::StatisticsBucket;
use crate::window;

pub fn build_report(campaign: &Campaign, events: &[Event]) -> CampaignReport {
    let overall = overall_statistics(events);

    let parameters_statistics: Vec<ParametersStatistics> = campaign
        .parameters
        .iter()
        .map(|params| window_statistics(params, events))
        .collect();

    info!(
        campaign_id = campaign.id,
        events = events.len(),
        windows = parameters_statistics.len(),
        "Campaign report built"
    );
    metrics::counter!("reporting.reports.built").increment(1);

    CampaignReport {
        basic_information: basic_information(campaign),
        overall_statistics: OverallStatistics {
            statistics: overall,
        },
        parameters_statistics,
    }
}

pub fn basic_information(campaign: &Campaign) -> BasicInformation {
    BasicInformation {
        campaign_id: campaign.id,
        post_id: campaign.post_id.clone(),
        agent_id: campaign.agent_id,
        campaign_type: campaign.campaign_type,
        start: campaign.start,
        end: None,
    }
}

/// Classifies every event once, without window filtering.
pub fn overall_statistics(events: &[Event]) -> StatisticsBucket {
    let mut bucket = StatisticsBucket::new();
    for event in events {
        if !classifier::record(&mut bucket, &event.kind) {
            if let EventKind::Unclassified(label) = &event.kind {
                debug!(label = %label, timestamp = %event.timestamp, "Skipping unclassified event");
            }
            metrics::counter!("reporting.events.unclassified").increment(1);
        }
    }
    bucket
}

/// Usernames of declined requests, in request order.
pub fn declined_influencers(params: &CampaignParameters) -> Vec<String> {
    params
        .requests
        .iter()
        .filter(|r| r.status == RequestStatus::Declined)
        .map(|r| r.influencer_username.clone())
        .collect()
}

pub fn window_statistics(params: &CampaignParameters, events: &[Event]) -> ParametersStatistics {
    let mut buckets = TargetBuckets::new();
    let mut in_window = 0usize;
    for event in window::events_in(params, events) {
        in_window += 1;
        buckets.record(event);
    }

    debug!(
        window = %format!("{}..{}", params.start, params.end),
        events = in_window,
        influencers = buckets.influencers.len(),
        interest_groups = buckets.interest_groups.len(),
        "Window statistics folded"
    );

    ParametersStatistics::from_buckets(
        params.start,
        params.end,
        params.timestamps.clone(),
        declined_influencers(params),
        buckets,
    )
}
