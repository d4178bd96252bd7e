// Core algorithm exports
pub mod budget;
pub mod filters;
pub mod matcher;
pub mod reconcile;
pub mod scoring;

pub use budget::{audience_fit_score, BudgetTier};
pub use filters::{campaign_open_for_matching, niche_overlap, profile_eligible};
pub use matcher::{CampaignRanking, InfluencerRanking, MatchFinder};
pub use reconcile::{
    reconcile_paid_session, NotificationSink, ReconcileError, ReconcileOutcome, ReconcileStore,
};
pub use scoring::calculate_match_score;
