//! Campaign performance reporting — classifies a campaign's event log and
//! folds it into overall, per-window, per-influencer and per-interest
//! statistics.

pub mod attribution;
pub mod classifier;
pub mod event;
pub mod report;
pub mod report_builder;
pub mod service;
pub mod source;
pub mod statistics;
pub mod window;

pub use attribution::TargetBuckets;
pub use event::{Attribution, Event, EventKind, InterestSet};
pub use report::{
    BasicInformation, CampaignReport, InterestGroupStatistics, OverallStatistics,
    ParametersStatistics,
};
pub use report_builder::build_report;
pub use service::ReportService;
pub use source::{SnapshotSource, StatisticsSnapshot, StatisticsSource};
pub use statistics::{BucketMap, StatisticsBucket};
