use crate::models::{Campaign, InfluencerProfile, ScoreBreakdown, ScoringWeights};
use crate::core::budget::{audience_fit_score, BudgetTier};
use crate::core::filters::niche_overlap;

/// Engagement rate at which the bonus starts paying out
pub const BASE_ENGAGEMENT_RATE: f64 = 0.03;
/// Engagement rate at which the bonus is fully earned
pub const HIGH_ENGAGEMENT_RATE: f64 = 0.06;

/// Calculate a compatibility score (0-100) between a campaign and an
/// influencer profile.
///
/// Scoring formula:
/// score = (
///     niche_overlap * 0.40 +       # Jaccard overlap of niche sets
///     audience_fit * 0.30 +        # audience size vs budget tier band
///     engagement * 0.20 +          # threshold bonus on engagement rate
///     location_affinity * 0.10     # target location satisfied
/// ) * 100
///
/// Pure and total: the same inputs always produce the same score, and no
/// input in the declared domain raises.
pub fn calculate_match_score(
    campaign: &Campaign,
    profile: &InfluencerProfile,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let (niche_score, shared_niches) = niche_overlap(&campaign.niches, &profile.niches);

    let tier = BudgetTier::from_budget(campaign.budget);
    let audience_score = audience_fit_score(profile.audience_size, tier);

    let engagement_score = engagement_bonus(profile.engagement_rate);

    let location_score = location_affinity(
        campaign.target_location.as_deref(),
        profile.location.as_deref(),
    );

    let total = (niche_score * weights.niche
        + audience_score * weights.audience
        + engagement_score * weights.engagement
        + location_score * weights.location)
        * 100.0;

    let breakdown = ScoreBreakdown {
        niche_overlap: niche_score,
        audience_fit: audience_score,
        engagement: engagement_score,
        location_affinity: location_score,
        shared_niches,
    };

    (total.clamp(0.0, 100.0), breakdown)
}

/// Calculate engagement bonus (0-1)
///
/// Stepped threshold: full bonus at a high engagement rate, half bonus at
/// a baseline rate, nothing below it. NaN or negative rates earn nothing.
#[inline]
fn engagement_bonus(rate: f64) -> f64 {
    if rate >= HIGH_ENGAGEMENT_RATE {
        1.0
    } else if rate >= BASE_ENGAGEMENT_RATE {
        0.5
    } else {
        0.0
    }
}

/// Calculate location affinity (0-1)
///
/// A campaign without a target location accepts any profile. A targeted
/// campaign pays out only on a case-insensitive location match.
#[inline]
fn location_affinity(target: Option<&str>, profile_location: Option<&str>) -> f64 {
    match target {
        None => 1.0,
        Some(wanted) => match profile_location {
            Some(loc) if loc.trim().eq_ignore_ascii_case(wanted.trim()) => 1.0,
            _ => 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignStatus;
    use chrono::Utc;

    fn create_test_campaign(niches: Vec<&str>, budget: f64) -> Campaign {
        Campaign {
            id: "cmp_1".to_string(),
            brand_id: "brand_1".to_string(),
            title: "Spring collection".to_string(),
            niches: niches.into_iter().map(String::from).collect(),
            target_location: None,
            budget,
            status: CampaignStatus::Active,
            start_date: Utc::now(),
            end_date: Utc::now(),
            created_at: Some(Utc::now()),
        }
    }

    fn create_test_profile(niches: Vec<&str>, engagement_rate: f64) -> InfluencerProfile {
        InfluencerProfile {
            id: "inf_1".to_string(),
            display_name: "Test Creator".to_string(),
            niches: niches.into_iter().map(String::from).collect(),
            location: None,
            audience_size: 100_000,
            engagement_rate,
            follower_count: 120_000,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_score_in_range_and_deterministic() {
        let campaign = create_test_campaign(vec!["fashion", "beauty"], 5_000.0);
        let profile = create_test_profile(vec!["fashion"], 0.05);
        let weights = ScoringWeights::default();

        let (first, breakdown) = calculate_match_score(&campaign, &profile, &weights);
        let (second, _) = calculate_match_score(&campaign, &profile, &weights);

        assert!((0.0..=100.0).contains(&first));
        assert_eq!(first, second);
        assert_eq!(breakdown.shared_niches, vec!["fashion"]);
    }

    #[test]
    fn test_closer_niche_and_engagement_scores_higher() {
        // Campaign {fashion, beauty}, budget 5000: the partially aligned,
        // lower-engagement profile must score strictly below the fully
        // aligned, higher-engagement one.
        let campaign = create_test_campaign(vec!["fashion", "beauty"], 5_000.0);
        let weights = ScoringWeights::default();

        let partial = create_test_profile(vec!["fashion"], 0.05);
        let full = create_test_profile(vec!["fashion", "beauty"], 0.08);

        let (partial_score, _) = calculate_match_score(&campaign, &partial, &weights);
        let (full_score, _) = calculate_match_score(&campaign, &full, &weights);

        assert!(partial_score < full_score);
    }

    #[test]
    fn test_empty_niches_zero_component_not_error() {
        let campaign = create_test_campaign(vec![], 5_000.0);
        let profile = create_test_profile(vec!["fashion"], 0.05);
        let weights = ScoringWeights::default();

        let (score, breakdown) = calculate_match_score(&campaign, &profile, &weights);

        assert_eq!(breakdown.niche_overlap, 0.0);
        assert!(breakdown.shared_niches.is_empty());
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_zero_budget_uses_lowest_tier() {
        let campaign = create_test_campaign(vec!["fashion"], 0.0);
        let mut profile = create_test_profile(vec!["fashion"], 0.05);
        profile.audience_size = 3_000; // inside the starter band

        let weights = ScoringWeights::default();
        let (score, breakdown) = calculate_match_score(&campaign, &profile, &weights);

        assert!(breakdown.audience_fit > 0.0);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_engagement_bonus_steps() {
        assert_eq!(engagement_bonus(0.08), 1.0);
        assert_eq!(engagement_bonus(0.06), 1.0);
        assert_eq!(engagement_bonus(0.05), 0.5);
        assert_eq!(engagement_bonus(0.03), 0.5);
        assert_eq!(engagement_bonus(0.01), 0.0);
        assert_eq!(engagement_bonus(-1.0), 0.0);
        assert_eq!(engagement_bonus(f64::NAN), 0.0);
    }

    #[test]
    fn test_location_affinity() {
        assert_eq!(location_affinity(None, None), 1.0);
        assert_eq!(location_affinity(None, Some("Berlin")), 1.0);
        assert_eq!(location_affinity(Some("Berlin"), Some("berlin")), 1.0);
        assert_eq!(location_affinity(Some("Berlin"), Some("Paris")), 0.0);
        assert_eq!(location_affinity(Some("Berlin"), None), 0.0);
    }
}
