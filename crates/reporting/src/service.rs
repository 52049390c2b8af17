//! Async report service: fetches a campaign's inputs from a
//! [`StatisticsSource`] under a timeout, then runs the pure builder.

use campaign_core::config::ReportingConfig;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::Campaign;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::event::Event;
use crate::report::CampaignReport;
use crate::report_builder::build_report;
use crate::source::StatisticsSource;

pub struct ReportService {
    source: Arc<dyn StatisticsSource>,
    config: ReportingConfig,
}

impl ReportService {
    pub fn new(source: Arc<dyn StatisticsSource>, config: ReportingConfig) -> Self {
        Self { source, config }
    }

    /// Builds the report for `campaign_id`. Any fetch failure or timeout
    /// fails the whole build; no partial report is produced.
    pub async fn generate(&self, campaign_id: u64) -> CampaignResult<CampaignReport> {
        match self.fetch_inputs(campaign_id).await {
            Ok((campaign, events)) => Ok(build_report(&campaign, &events)),
            Err(e) => {
                warn!(campaign_id, error = %e, "Campaign report build failed");
                metrics::counter!("reporting.reports.failed").increment(1);
                Err(e)
            }
        }
    }

    async fn fetch_inputs(&self, campaign_id: u64) -> CampaignResult<(Campaign, Vec<Event>)> {
        if self.config.parallel_fetch {
            let (campaign, events) = tokio::join!(
                self.fetch("campaign", campaign_id, |s, id| s.fetch_campaign(id)),
                self.fetch("events", campaign_id, |s, id| s.fetch_events(id)),
            );
            Ok((campaign?, events?))
        } else {
            let campaign = self
                .fetch("campaign", campaign_id, |s, id| s.fetch_campaign(id))
                .await?;
            let events = self
                .fetch("events", campaign_id, |s, id| s.fetch_events(id))
                .await?;
            Ok((campaign, events))
        }
    }

    async fn fetch<T, F>(
        &self,
        resource: &'static str,
        campaign_id: u64,
        op: F,
    ) -> CampaignResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn StatisticsSource, u64) -> CampaignResult<T> + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let timeout_ms = self.config.fetch_timeout_ms;
        let task = tokio::task::spawn_blocking(move || op(&*source, campaign_id));

        match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
            Ok(Ok(result)) => {
                debug!(campaign_id, resource, ok = result.is_ok(), "Upstream fetch finished");
                result
            }
            Ok(Err(join_err)) => Err(CampaignError::upstream(resource, join_err)),
            Err(_) => Err(CampaignError::Timeout {
                resource: resource.to_string(),
                timeout_ms,
            }),
        }
    }
}
