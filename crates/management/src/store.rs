//! In-memory campaign store backed by DashMap.
//!
//! Stands in for the relational campaign store during development and tests,
//! and serves report inputs through [`StatisticsSource`].

use crate::models::*;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::{
    Campaign, CampaignParameters, CampaignRequest, CampaignType, RequestStatus,
};
use campaign_reporting::{Event, StatisticsSource};
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Thread-safe store for campaigns, their event logs, and the interest catalogue.
pub struct CampaignStore {
    campaigns: DashMap<u64, Campaign>,
    events: DashMap<u64, Vec<Event>>,
    interests: DashSet<String>,
    next_id: AtomicU64,
}

impl CampaignStore {
    pub fn new() -> Self {
        info!("Campaign store initialized (in-memory)");
        Self {
            campaigns: DashMap::new(),
            events: DashMap::new(),
            interests: DashSet::new(),
            next_id: AtomicU64::new(1),
        }
    }

    // ─── Interests ─────────────────────────────────────────────────────────

    pub fn register_interests<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.interests.insert(name.into());
        }
    }

    pub fn all_interests(&self) -> Vec<String> {
        let mut names: Vec<String> = self.interests.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Keeps the names known to the catalogue, in request order.
    fn resolve_interests(&self, requested: Vec<String>) -> Vec<String> {
        let (known, unknown): (Vec<String>, Vec<String>) =
            requested.into_iter().partition(|i| self.interests.contains(i));
        if !unknown.is_empty() {
            warn!(unknown = ?unknown, "Dropping interests missing from catalogue");
        }
        known
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn create_campaign(
        &self,
        agent_id: u64,
        req: CreateCampaignRequest,
    ) -> CampaignResult<Campaign> {
        if req.post_id.trim().is_empty() {
            return Err(CampaignError::Validation("post id is required".into()));
        }
        if req.end < req.start {
            return Err(CampaignError::Validation(format!(
                "campaign ends ({}) before it starts ({})",
                req.end, req.start
            )));
        }

        let campaign_type = CampaignType::from_schedule(req.start, req.end, req.timestamps.len());
        let window = CampaignParameters {
            start: req.start,
            end: req.end,
            interests: self.resolve_interests(req.interests),
            timestamps: req.timestamps,
            requests: invitations(&req.influencers),
        };
        let campaign = Campaign {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            post_id: req.post_id,
            agent_id,
            campaign_type,
            start: req.start,
            parameters: vec![window],
        };

        self.campaigns.insert(campaign.id, campaign.clone());
        self.events.insert(campaign.id, Vec::new());
        metrics::counter!("management.campaigns.created").increment(1);
        info!(
            campaign_id = campaign.id,
            agent_id,
            campaign_type = %campaign_type,
            "Campaign created"
        );
        Ok(campaign)
    }

    pub fn get_campaign(&self, id: u64) -> CampaignResult<Campaign> {
        self.campaigns
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(CampaignError::CampaignNotFound(id))
    }

    /// Closes the window active at `now` and appends `[now, req.end)`.
    pub fn update_campaign_parameters(
        &self,
        id: u64,
        req: UpdateParametersRequest,
        now: DateTime<Utc>,
    ) -> CampaignResult<Campaign> {
        if req.end < now {
            return Err(CampaignError::Validation(format!(
                "new parameters end ({}) in the past",
                req.end
            )));
        }
        let interests = self.resolve_interests(req.interests);

        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(CampaignError::CampaignNotFound(id))?;
        let campaign = entry.value_mut();
        for params in campaign.parameters.iter_mut().filter(|p| p.is_active_at(now)) {
            params.end = now;
        }
        campaign.parameters.push(CampaignParameters {
            start: now,
            end: req.end,
            interests,
            timestamps: req.timestamps,
            requests: invitations(&req.influencers),
        });
        info!(campaign_id = id, windows = campaign.parameters.len(), "Campaign parameters updated");
        Ok(campaign.clone())
    }

    pub fn delete_campaign(&self, id: u64) -> CampaignResult<()> {
        self.campaigns
            .remove(&id)
            .ok_or(CampaignError::CampaignNotFound(id))?;
        self.events.remove(&id);
        metrics::counter!("management.campaigns.deleted").increment(1);
        info!(campaign_id = id, "Campaign deleted");
        Ok(())
    }

    pub fn campaigns_for_agent(&self, agent_id: u64) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|r| r.value().agent_id == agent_id)
            .map(|r| r.value().clone())
            .collect();
        campaigns.sort_by_key(|c| c.id);
        campaigns
    }

    pub fn currently_valid_interests(
        &self,
        id: u64,
        now: DateTime<Utc>,
    ) -> CampaignResult<Vec<String>> {
        let campaign = self.get_campaign(id)?;
        Ok(campaign
            .active_parameters(now)
            .map(|p| p.interests.clone())
            .unwrap_or_default())
    }

    /// The window active at `now`, or else the one that ended last.
    pub fn last_active_parameters(
        &self,
        id: u64,
        now: DateTime<Utc>,
    ) -> CampaignResult<CampaignParameters> {
        let campaign = self.get_campaign(id)?;
        if let Some(active) = campaign.active_parameters(now) {
            return Ok(active.clone());
        }
        campaign
            .parameters
            .iter()
            .max_by_key(|p| p.end)
            .cloned()
            .ok_or(CampaignError::CampaignNotFound(id))
    }

    pub fn campaign_for_monitoring(&self, id: u64) -> CampaignResult<CampaignMonitoring> {
        Ok(CampaignMonitoring::from(&self.get_campaign(id)?))
    }

    /// Post ids of campaigns whose active targeting shares an interest with
    /// `profile_interests`, ordered by campaign id.
    pub fn available_campaign_posts(
        &self,
        profile_interests: &[String],
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut matches: Vec<(u64, String)> = self
            .campaigns
            .iter()
            .filter(|r| {
                r.value()
                    .active_parameters(now)
                    .is_some_and(|p| p.targets_any(profile_interests))
            })
            .map(|r| (r.value().id, r.value().post_id.clone()))
            .collect();
        matches.sort_by_key(|(id, _)| *id);
        matches.into_iter().map(|(_, post)| post).collect()
    }

    /// Records an influencer's answer on every window that invited them.
    /// Returns the number of requests updated.
    pub fn set_request_status(
        &self,
        id: u64,
        influencer_id: u64,
        status: RequestStatus,
    ) -> CampaignResult<usize> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(CampaignError::CampaignNotFound(id))?;
        let mut updated = 0;
        for request in entry
            .value_mut()
            .parameters
            .iter_mut()
            .flat_map(|p| p.requests.iter_mut())
            .filter(|r| r.influencer_id == influencer_id)
        {
            request.status = status;
            updated += 1;
        }
        info!(
            campaign_id = id,
            influencer_id,
            status = %status,
            updated,
            "Request status recorded"
        );
        Ok(updated)
    }

    // ─── Events ────────────────────────────────────────────────────────────

    pub fn record_event(&self, id: u64, event: Event) -> CampaignResult<()> {
        let mut log = self
            .events
            .get_mut(&id)
            .ok_or(CampaignError::CampaignNotFound(id))?;
        log.push(event);
        metrics::counter!("management.events.recorded").increment(1);
        Ok(())
    }

    pub fn event_count(&self, id: u64) -> usize {
        self.events.get(&id).map_or(0, |log| log.len())
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsSource for CampaignStore {
    fn fetch_campaign(&self, campaign_id: u64) -> CampaignResult<Campaign> {
        self.get_campaign(campaign_id)
    }

    fn fetch_events(&self, campaign_id: u64) -> CampaignResult<Vec<Event>> {
        self.events
            .get(&campaign_id)
            .map(|log| log.value().clone())
            .ok_or(CampaignError::CampaignNotFound(campaign_id))
    }
}

fn invitations(influencers: &[InfluencerInvite]) -> Vec<CampaignRequest> {
    influencers
        .iter()
        .map(|i| CampaignRequest {
            influencer_id: i.influencer_id,
            influencer_username: i.username.clone(),
            status: RequestStatus::Sent,
        })
        .collect()
}
