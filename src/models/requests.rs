use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matching campaigns for an influencer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CampaignMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "influencer_id", rename = "influencerId")]
    pub influencer_id: String,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default, alias = "min_score", rename = "minScore")]
    pub min_score: Option<f64>,
    #[serde(default, alias = "limit", rename = "limit")]
    pub limit: Option<u16>,
}

/// Request to find matching influencers for a campaign
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InfluencerMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "campaign_id", rename = "campaignId")]
    pub campaign_id: String,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default, alias = "min_score", rename = "minScore")]
    pub min_score: Option<f64>,
    #[serde(default, alias = "limit", rename = "limit")]
    pub limit: Option<u16>,
}

/// Request to reconcile a completed payment session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReconcilePaymentRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}
