//! Campaign domain types shared by the reporting engine and the management store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CampaignError;

/// A promoted post together with its ordered targeting windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub post_id: String,
    pub agent_id: u64,
    pub campaign_type: CampaignType,
    pub start: DateTime<Utc>,
    pub parameters: Vec<CampaignParameters>,
}

impl Campaign {
    /// The window whose `[start, end)` contains `now`. Later windows win if
    /// the editor ever produced an overlap.
    pub fn active_parameters(&self, now: DateTime<Utc>) -> Option<&CampaignParameters> {
        self.parameters.iter().rev().find(|p| p.is_active_at(now))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    OneTime,
    Repeatable,
}

impl CampaignType {
    /// A campaign is one-time when it starts and ends at the same instant
    /// and has a single scheduled timestamp.
    pub fn from_schedule(start: DateTime<Utc>, end: DateTime<Utc>, timestamps: usize) -> Self {
        if start == end && timestamps == 1 {
            CampaignType::OneTime
        } else {
            CampaignType::Repeatable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::OneTime => "ONE_TIME",
            CampaignType::Repeatable => "REPEATABLE",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one_time" => Ok(CampaignType::OneTime),
            "repeatable" => Ok(CampaignType::Repeatable),
            other => Err(CampaignError::MalformedUpstream(format!(
                "unknown campaign type '{other}'"
            ))),
        }
    }
}

/// One targeting configuration, active over `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignParameters {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interests: Vec<String>,
    pub timestamps: Vec<DateTime<Utc>>,
    pub requests: Vec<CampaignRequest>,
}

impl CampaignParameters {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    pub fn targets_any(&self, interests: &[String]) -> bool {
        self.interests.iter().any(|i| interests.contains(i))
    }
}

/// An invitation sent to one influencer for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignRequest {
    pub influencer_id: u64,
    pub influencer_username: String,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Sent,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Sent => "SENT",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sent" => Ok(RequestStatus::Sent),
            "accepted" => Ok(RequestStatus::Accepted),
            "declined" => Ok(RequestStatus::Declined),
            other => Err(CampaignError::MalformedUpstream(format!(
                "unknown request status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn window(start: u32, end: u32, interests: &[&str]) -> CampaignParameters {
        CampaignParameters {
            start: at(start),
            end: at(end),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            timestamps: vec![],
            requests: vec![],
        }
    }

    #[test]
    fn test_campaign_type_from_schedule() {
        assert_eq!(CampaignType::from_schedule(at(5), at(5), 1), CampaignType::OneTime);
        assert_eq!(CampaignType::from_schedule(at(5), at(5), 2), CampaignType::Repeatable);
        assert_eq!(CampaignType::from_schedule(at(5), at(9), 1), CampaignType::Repeatable);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Declined".parse::<RequestStatus>().unwrap(), RequestStatus::Declined);
        assert_eq!("DECLINED".parse::<RequestStatus>().unwrap(), RequestStatus::Declined);
        assert_eq!("accepted".parse::<RequestStatus>().unwrap(), RequestStatus::Accepted);
        assert!(matches!(
            "maybe".parse::<RequestStatus>(),
            Err(CampaignError::MalformedUpstream(_))
        ));
    }

    #[test]
    fn test_campaign_type_labels() {
        assert_eq!("one_time".parse::<CampaignType>().unwrap(), CampaignType::OneTime);
        assert_eq!("REPEATABLE".parse::<CampaignType>().unwrap(), CampaignType::Repeatable);
        assert_eq!(CampaignType::OneTime.to_string(), "ONE_TIME");
        assert!("weekly".parse::<CampaignType>().is_err());
    }

    #[test]
    fn test_active_parameters() {
        let campaign = Campaign {
            id: 1,
            post_id: "post-1".into(),
            agent_id: 3,
            campaign_type: CampaignType::Repeatable,
            start: at(0),
            parameters: vec![window(0, 6, &["sports"]), window(6, 12, &["music"])],
        };
        assert_eq!(campaign.active_parameters(at(6)).unwrap().interests, vec!["music"]);
        assert_eq!(campaign.active_parameters(at(0)).unwrap().interests, vec!["sports"]);
        assert!(campaign.active_parameters(at(12)).is_none());
    }

    #[test]
    fn test_targets_any() {
        let params = window(0, 1, &["sports", "music"]);
        assert!(params.targets_any(&["music".to_string()]));
        assert!(!params.targets_any(&["travel".to_string()]));
        assert!(!params.targets_any(&[]));
    }
}
