// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Application, ApplicationStatus, Campaign, CampaignMatch, CampaignStatus, InfluencerMatch,
    InfluencerProfile, PaymentEvent, ScoreBreakdown, ScoringWeights,
};
pub use requests::{CampaignMatchesRequest, InfluencerMatchesRequest, ReconcilePaymentRequest};
pub use responses::{
    CampaignMatchesResponse, ErrorResponse, HealthResponse, InfluencerMatchesResponse,
    ReconcilePaymentResponse,
};
