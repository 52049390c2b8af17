//! Campaign Insights — builds campaign performance reports from statistics
//! snapshots and prints them as JSON.

use anyhow::Context;
use campaign_core::config::AppConfig;
use campaign_reporting::{ReportService, SnapshotSource};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "campaign-insights")]
#[command(about = "Campaign performance reports from statistics snapshots")]
#[command(version)]
struct Cli {
    /// Statistics snapshot file: one snapshot object or an array of them
    #[arg(long, env = "CAMPAIGN_INSIGHTS__SOURCE__SNAPSHOT_PATH")]
    snapshot: Option<String>,

    /// Campaign to report on (default: every campaign in the snapshot)
    #[arg(long)]
    campaign_id: Option<u64>,

    /// Per-fetch timeout in milliseconds (overrides config)
    #[arg(long, env = "CAMPAIGN_INSIGHTS__REPORTING__FETCH_TIMEOUT_MS")]
    fetch_timeout_ms: Option<u64>,

    /// Fetch campaign and events one after the other
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Single-line JSON output
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_insights=info,campaign_reporting=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(path) = cli.snapshot {
        config.source.snapshot_path = Some(path);
    }
    if let Some(timeout) = cli.fetch_timeout_ms {
        config.reporting.fetch_timeout_ms = timeout;
    }
    if cli.sequential {
        config.reporting.parallel_fetch = false;
    }

    info!(
        snapshot = ?config.source.snapshot_path,
        fetch_timeout_ms = config.reporting.fetch_timeout_ms,
        parallel_fetch = config.reporting.parallel_fetch,
        "Configuration loaded"
    );

    let path = config
        .source
        .snapshot_path
        .clone()
        .context(
            "no snapshot given: pass --snapshot or set CAMPAIGN_INSIGHTS__SOURCE__SNAPSHOT_PATH",
        )?;
    let source = Arc::new(
        SnapshotSource::from_file(&path).with_context(|| format!("loading snapshot {path}"))?,
    );

    let campaign_ids = match cli.campaign_id {
        Some(id) => vec![id],
        None => source.campaign_ids(),
    };

    let service = ReportService::new(source, config.reporting.clone());
    let mut reports = Vec::with_capacity(campaign_ids.len());
    for id in campaign_ids {
        let report = service
            .generate(id)
            .await
            .with_context(|| format!("building report for campaign {id}"))?;
        reports.push(report);
    }

    let output = match (cli.campaign_id, cli.compact) {
        (Some(_), true) => serde_json::to_string(&reports[0])?,
        (Some(_), false) => serde_json::to_string_pretty(&reports[0])?,
        (None, true) => serde_json::to_string(&reports)?,
        (None, false) => serde_json::to_string_pretty(&reports)?,
    };
    println!("{output}");

    Ok(())
}
