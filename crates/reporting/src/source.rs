//! Statistics source contract and the wire shapes it delivers.
//!
//! Collaborators hand over a campaign definition and its raw event log as
//! [`StatisticsSnapshot`] records. Ingestion turns those into domain values
//! exactly once; everything downstream works on [`Campaign`] and [`Event`].

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::{
    Campaign, CampaignParameters, CampaignRequest, CampaignType, RequestStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::event::{Attribution, Event, EventKind};

/// Read-only access to one campaign's definition and event log.
pub trait StatisticsSource: Send + Sync {
    fn fetch_campaign(&self, campaign_id: u64) -> CampaignResult<Campaign>;

    fn fetch_events(&self, campaign_id: u64) -> CampaignResult<Vec<Event>>;
}

// ─── Wire records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub campaign_id: u64,
    pub campaign: CampaignRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub post_id: String,
    pub agent_id: u64,
    pub campaign_type: String,
    pub start: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub campaign_parameters: Vec<ParametersRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamps: Vec<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub campaign_requests: Vec<RequestRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub influencer_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub influencer_username: String,
    pub request_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    /// Zero when the event is not tied to an influencer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub influencer_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub influencer_username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub web_site: Option<String>,
}

/// Upstream writers emit `null` for empty lists and unset ids.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ─── Ingestion ──────────────────────────────────────────────────────────────

impl EventRecord {
    /// Infallible: unknown labels are carried as [`EventKind::Unclassified`].
    pub fn into_event(self) -> Event {
        let kind = EventKind::from_label(&self.event_type, self.web_site.as_deref());
        let attribution =
            Attribution::resolve(self.influencer_id, &self.influencer_username, self.interests);
        Event::new(kind, self.timestamp, attribution)
    }
}

impl RequestRecord {
    /// Only a declined request affects a report, so an unrecognised label
    /// is kept as a pending invitation rather than failing the build.
    fn status(&self) -> RequestStatus {
        self.request_status.parse().unwrap_or_else(|e| {
            warn!(
                influencer_id = self.influencer_id,
                error = %e,
                "Unknown request status, treating as sent"
            );
            RequestStatus::Sent
        })
    }
}

impl ParametersRecord {
    fn to_parameters(&self) -> CampaignResult<CampaignParameters> {
        if self.end < self.start {
            return Err(CampaignError::MalformedUpstream(format!(
                "window ends ({}) before it starts ({})",
                self.end, self.start
            )));
        }
        let requests = self
            .campaign_requests
            .iter()
            .map(|r| CampaignRequest {
                influencer_id: r.influencer_id,
                influencer_username: r.influencer_username.clone(),
                status: r.status(),
            })
            .collect();

        Ok(CampaignParameters {
            start: self.start,
            end: self.end,
            interests: self.interests.clone(),
            timestamps: self.timestamps.clone(),
            requests,
        })
    }
}

impl StatisticsSnapshot {
    pub fn to_campaign(&self) -> CampaignResult<Campaign> {
        let campaign_type: CampaignType = self.campaign.campaign_type.parse()?;
        let parameters = self
            .campaign
            .campaign_parameters
            .iter()
            .map(ParametersRecord::to_parameters)
            .collect::<CampaignResult<Vec<_>>>()?;

        Ok(Campaign {
            id: self.campaign_id,
            post_id: self.campaign.post_id.clone(),
            agent_id: self.campaign.agent_id,
            campaign_type,
            start: self.campaign.start,
            parameters,
        })
    }

    pub fn to_events(&self) -> Vec<Event> {
        self.events.iter().cloned().map(EventRecord::into_event).collect()
    }
}

// ─── Snapshot source ────────────────────────────────────────────────────────

/// Serves statistics from pre-fetched snapshots, keyed by campaign id.
#[derive(Debug, Default)]
pub struct SnapshotSource {
    snapshots: HashMap<u64, StatisticsSnapshot>,
}

impl SnapshotSource {
    pub fn new(snapshots: Vec<StatisticsSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().map(|s| (s.campaign_id, s)).collect(),
        }
    }

    /// Accepts a single snapshot object or an array of them.
    pub fn from_json(json: &str) -> CampaignResult<Self> {
        let snapshots = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<StatisticsSnapshot>>(json)?
        } else {
            vec![serde_json::from_str::<StatisticsSnapshot>(json)?]
        };
        Ok(Self::new(snapshots))
    }

    pub fn from_file(path: impl AsRef<Path>) -> CampaignResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json(&json)?;
        info!(path = %path.display(), campaigns = source.len(), "Snapshot source loaded");
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn campaign_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.snapshots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn snapshot(&self, campaign_id: u64) -> CampaignResult<&StatisticsSnapshot> {
        self.snapshots
            .get(&campaign_id)
            .ok_or(CampaignError::CampaignNotFound(campaign_id))
    }
}

impl StatisticsSource for SnapshotSource {
    fn fetch_campaign(&self, campaign_id: u64) -> CampaignResult<Campaign> {
        self.snapshot(campaign_id)?.to_campaign()
    }

    fn fetch_events(&self, campaign_id: u64) -> CampaignResult<Vec<Event>> {
        Ok(self.snapshot(campaign_id)?.to_events())
    }
}
