//! Campaign management backend — campaign lifecycle, targeting windows,
//! influencer invitations, and the monitoring view.
//!
//! Data stored in DashMap; the store doubles as a statistics source for the
//! reporting engine.

pub mod models;
pub mod store;

pub use models::{
    CampaignMonitoring, CreateCampaignRequest, InfluencerInvite, UpdateParametersRequest,
};
pub use store::CampaignStore;
