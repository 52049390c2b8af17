use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Upstream {resource} fetch failed: {reason}")]
    Upstream { resource: String, reason: String },

    #[error("Malformed upstream data: {0}")]
    MalformedUpstream(String),

    #[error("Campaign {0} not found")]
    CampaignNotFound(u64),

    #[error("Upstream {resource} fetch timed out after {timeout_ms}ms")]
    Timeout { resource: String, timeout_ms: u64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CampaignError {
    pub fn upstream(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Upstream {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
