//! Management request types and the campaign monitoring view.

use campaign_core::types::{Campaign, CampaignParameters};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    pub post_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub influencers: Vec<InfluencerInvite>,
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,
}

/// Replaces the active targeting from `now` until `end`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateParametersRequest {
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub influencers: Vec<InfluencerInvite>,
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluencerInvite {
    pub influencer_id: u64,
    pub username: String,
}

// ─── Monitoring view ───────────────────────────────────────────────────────

/// Flattened campaign as served to the monitoring side, with labels in
/// place of enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMonitoring {
    pub post_id: String,
    pub agent_id: u64,
    pub start: DateTime<Utc>,
    pub campaign_type: String,
    pub campaign_parameters: Vec<ParametersMonitoring>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersMonitoring {
    pub interests: Vec<String>,
    pub timestamps: Vec<DateTime<Utc>>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub campaign_requests: Vec<RequestMonitoring>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMonitoring {
    pub influencer_id: u64,
    pub influencer_username: String,
    pub request_status: String,
}

impl From<&CampaignParameters> for ParametersMonitoring {
    fn from(params: &CampaignParameters) -> Self {
        Self {
            interests: params.interests.clone(),
            timestamps: params.timestamps.clone(),
            start: params.start,
            end: params.end,
            campaign_requests: params
                .requests
                .iter()
                .map(|r| RequestMonitoring {
                    influencer_id: r.influencer_id,
                    influencer_username: r.influencer_username.clone(),
                    request_status: r.status.to_string(),
                })
                .collect(),
        }
    }
}

impl From<&Campaign> for CampaignMonitoring {
    fn from(campaign: &Campaign) -> Self {
        Self {
            post_id: campaign.post_id.clone(),
            agent_id: campaign.agent_id,
            start: campaign.start,
            campaign_type: campaign.campaign_type.to_string(),
            campaign_parameters: campaign.parameters.iter().map(Into::into).collect(),
        }
    }
}
