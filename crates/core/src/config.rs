use serde::Deserialize;

use crate::error::{CampaignError, CampaignResult};

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_INSIGHTS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Caller-side policy for the two upstream fetches of a report build.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    #[serde(default = "default_parallel_fetch")]
    pub parallel_fetch: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

// Default functions
fn default_fetch_timeout_ms() -> u64 {
    5000
}
fn default_parallel_fetch() -> bool {
    true
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            parallel_fetch: default_parallel_fetch(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reporting: ReportingConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> CampaignResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| CampaignError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reporting.fetch_timeout_ms, 5000);
        assert!(config.reporting.parallel_fetch);
        assert!(config.source.snapshot_path.is_none());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"reporting":{"fetch_timeout_ms":250}}"#).unwrap();
        assert_eq!(config.reporting.fetch_timeout_ms, 250);
        assert!(config.reporting.parallel_fetch);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        std::env::set_var("CAMPAIGN_INSIGHTS__REPORTING__FETCH_TIMEOUT_MS", "soon");
        let result = AppConfig::load();
        std::env::remove_var("CAMPAIGN_INSIGHTS__REPORTING__FETCH_TIMEOUT_MS");
        assert!(matches!(result, Err(CampaignError::Config(_))));
    }
}
