use serde::{Deserialize, Serialize};

/// Campaign lifecycle status.
///
/// Transitions only move forward: draft -> scheduled -> active ->
/// in_progress -> completed/expired. `stage` encodes that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    InProgress,
    Completed,
    Expired,
}

impl CampaignStatus {
    /// Campaigns eligible for matching: scheduled or active.
    pub fn is_open_for_matching(self) -> bool {
        matches!(self, CampaignStatus::Scheduled | CampaignStatus::Active)
    }

    fn stage(self) -> u8 {
        match self {
            CampaignStatus::Draft => 0,
            CampaignStatus::Scheduled => 1,
            CampaignStatus::Active => 2,
            CampaignStatus::InProgress => 3,
            CampaignStatus::Completed | CampaignStatus::Expired => 4,
        }
    }

    /// Whether moving to `next` respects the forward-only lifecycle.
    pub fn can_advance_to(self, next: CampaignStatus) -> bool {
        next.stage() > self.stage()
    }
}

/// Application lifecycle status.
///
/// pending -> approved -> approved_and_paid -> completed, with rejected
/// terminal from pending or approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    ApprovedAndPaid,
    Rejected,
    Completed,
}

impl ApplicationStatus {
    /// Statuses a payment confirmation may advance to approved_and_paid.
    pub fn is_payable(self) -> bool {
        matches!(self, ApplicationStatus::Pending | ApplicationStatus::Approved)
    }

    /// Terminal statuses a payment confirmation must not disturb.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Completed)
    }
}

/// Brand campaign as stored in the marketplace database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "campaignId")]
    pub id: String,
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub title: String,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(rename = "targetLocation", default)]
    pub target_location: Option<String>,
    #[serde(default)]
    pub budget: f64,
    pub status: CampaignStatus,
    #[serde(rename = "startDate")]
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "endDate")]
    pub end_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Influencer profile with audience and niche data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerProfile {
    #[serde(rename = "influencerId")]
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "audienceSize", default)]
    pub audience_size: i64,
    #[serde(rename = "engagementRate", default)]
    pub engagement_rate: f64,
    #[serde(rename = "followerCount", default)]
    pub follower_count: i64,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

/// An influencer's application to a campaign.
///
/// Exactly one application exists per (campaign, influencer) pair,
/// enforced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "applicationId")]
    pub id: String,
    #[serde(rename = "campaignId")]
    pub campaign_id: String,
    #[serde(rename = "influencerId")]
    pub influencer_id: String,
    pub status: ApplicationStatus,
    #[serde(rename = "appliedAt")]
    pub applied_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "paidAt", default)]
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payment confirmation extracted from a provider checkout session.
///
/// Consumed once by the reconciliation flow, never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub paid: bool,
    #[serde(rename = "campaignId")]
    pub campaign_id: String,
    #[serde(rename = "influencerId")]
    pub influencer_id: String,
}

/// Per-factor contributions behind a match score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "nicheOverlap")]
    pub niche_overlap: f64,
    #[serde(rename = "audienceFit")]
    pub audience_fit: f64,
    pub engagement: f64,
    #[serde(rename = "locationAffinity")]
    pub location_affinity: f64,
    #[serde(rename = "sharedNiches")]
    pub shared_niches: Vec<String>,
}

/// Scored campaign result for an influencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignMatch {
    #[serde(rename = "campaignId")]
    pub campaign_id: String,
    #[serde(rename = "brandId")]
    pub brand_id: String,
    pub title: String,
    pub budget: f64,
    pub status: CampaignStatus,
    #[serde(rename = "startDate")]
    pub start_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "endDate")]
    pub end_date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "matchScore")]
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scored influencer result for a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerMatch {
    #[serde(rename = "influencerId")]
    pub influencer_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "audienceSize")]
    pub audience_size: i64,
    #[serde(rename = "engagementRate")]
    pub engagement_rate: f64,
    #[serde(rename = "followerCount")]
    pub follower_count: i64,
    #[serde(rename = "matchScore")]
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub niche: f64,
    pub audience: f64,
    pub engagement: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            niche: 0.40,
            audience: 0.30,
            engagement: 0.20,
            location: 0.10,
        }
    }
}
