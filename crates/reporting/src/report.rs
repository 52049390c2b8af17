//! Campaign performance report — the derived, recomputable output of a build.

use campaign_core::types::CampaignType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::attribution::TargetBuckets;
use crate::event::InterestSet;
use crate::statistics::StatisticsBucket;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReport {
    pub basic_information: BasicInformation,
    pub overall_statistics: OverallStatistics,
    pub parameters_statistics: Vec<ParametersStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInformation {
    pub campaign_id: u64,
    pub post_id: String,
    pub agent_id: u64,
    pub campaign_type: CampaignType,
    pub start: DateTime<Utc>,
    /// Stays `None` until campaign completion is tracked.
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub statistics: StatisticsBucket,
}

/// Statistics of one parameter window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersStatistics {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub timestamps: Vec<DateTime<Utc>>,
    pub influencer_who_did_not_accept: Vec<String>,
    pub influencers: BTreeMap<String, StatisticsBucket>,
    pub interest_groups: Vec<InterestGroupStatistics>,
    /// Events inside the window with neither influencer nor interests.
    pub direct: StatisticsBucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestGroupStatistics {
    pub interests: InterestSet,
    pub statistics: StatisticsBucket,
}

impl ParametersStatistics {
    pub(crate) fn from_buckets(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timestamps: Vec<DateTime<Utc>>,
        declined: Vec<String>,
        buckets: TargetBuckets,
    ) -> Self {
        Self {
            start,
            end,
            timestamps,
            influencer_who_did_not_accept: declined,
            influencers: buckets.influencers.into_inner(),
            interest_groups: buckets
                .interest_groups
                .into_inner()
                .into_iter()
                .map(|(interests, statistics)| InterestGroupStatistics {
                    interests,
                    statistics,
                })
                .collect(),
            direct: buckets.direct,
        }
    }

    pub fn influencer(&self, username: &str) -> Option<&StatisticsBucket> {
        self.influencers.get(username)
    }

    pub fn interest_group(&self, interests: &InterestSet) -> Option<&StatisticsBucket> {
        self.interest_groups
            .iter()
            .find(|g| &g.interests == interests)
            .map(|g| &g.statistics)
    }

    /// Influencer, interest-group and direct buckets merged together.
    pub fn combined(&self) -> StatisticsBucket {
        let mut total = self.direct.clone();
        for bucket in self.influencers.values() {
            total.merge(bucket);
        }
        for group in &self.interest_groups {
            total.merge(&group.statistics);
        }
        total
    }
}
