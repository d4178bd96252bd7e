use serde::{Deserialize, Serialize};
use crate::models::domain::{ApplicationStatus, CampaignMatch, InfluencerMatch};

/// Response for the campaign-matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignMatchesResponse {
    pub matches: Vec<CampaignMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the influencer-matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerMatchesResponse {
    pub matches: Vec<InfluencerMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the payment reconciliation endpoint.
///
/// `paymentVerified` reflects only what the provider confirmed; the other
/// flags report how far the downstream updates got, with non-fatal
/// problems listed in `warnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilePaymentResponse {
    #[serde(rename = "paymentVerified")]
    pub payment_verified: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "applicationStatus")]
    pub application_status: Option<ApplicationStatus>,
    #[serde(rename = "applicationUpdated")]
    pub application_updated: bool,
    #[serde(rename = "campaignStarted")]
    pub campaign_started: bool,
    #[serde(rename = "notificationSent")]
    pub notification_sent: bool,
    pub warnings: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
