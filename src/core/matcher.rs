use crate::models::{
    Campaign, CampaignMatch, InfluencerMatch, InfluencerProfile, ScoringWeights,
};
use crate::core::{
    filters::{campaign_open_for_matching, profile_eligible},
    scoring::calculate_match_score,
};
use std::cmp::Ordering;

/// Ranked campaigns for one influencer
#[derive(Debug)]
pub struct CampaignRanking {
    pub matches: Vec<CampaignMatch>,
    pub total_candidates: usize,
}

/// Ranked influencers for one campaign
#[derive(Debug)]
pub struct InfluencerRanking {
    pub matches: Vec<InfluencerMatch>,
    pub total_candidates: usize,
}

/// Match finder - ranks a candidate population against one anchor entity
///
/// # Pipeline Stages
/// 1. Eligibility filter (campaign matching window / active profile)
/// 2. Scoring via the scoring engine
/// 3. Threshold filter (score >= min_score)
/// 4. Deterministic ordering and truncation
///
/// Read-only over its inputs; candidates come from the store, the finder
/// never touches it.
#[derive(Debug, Clone)]
pub struct MatchFinder {
    weights: ScoringWeights,
}

impl MatchFinder {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank campaigns for an influencer.
    ///
    /// Keeps campaigns scoring at least `min_score`, sorted by score
    /// descending with ties broken by earliest start date.
    pub fn rank_campaigns(
        &self,
        profile: &InfluencerProfile,
        candidates: Vec<Campaign>,
        min_score: f64,
        limit: usize,
    ) -> CampaignRanking {
        let total_candidates = candidates.len();

        let mut matches: Vec<CampaignMatch> = candidates
            .into_iter()
            .filter(campaign_open_for_matching)
            .filter_map(|campaign| {
                let (score, breakdown) = calculate_match_score(&campaign, profile, &self.weights);

                if score >= min_score {
                    Some(CampaignMatch {
                        campaign_id: campaign.id,
                        brand_id: campaign.brand_id,
                        title: campaign.title,
                        budget: campaign.budget,
                        status: campaign.status,
                        start_date: campaign.start_date,
                        end_date: campaign.end_date,
                        score,
                        breakdown,
                    })
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.start_date.cmp(&b.start_date))
        });

        matches.truncate(limit);

        CampaignRanking {
            matches,
            total_candidates,
        }
    }

    /// Rank influencers for a campaign.
    ///
    /// Symmetric to `rank_campaigns`; ties broken by higher engagement
    /// rate, then higher follower count.
    pub fn rank_influencers(
        &self,
        campaign: &Campaign,
        candidates: Vec<InfluencerProfile>,
        min_score: f64,
        limit: usize,
    ) -> InfluencerRanking {
        let total_candidates = candidates.len();

        let mut matches: Vec<InfluencerMatch> = candidates
            .into_iter()
            .filter(profile_eligible)
            .filter_map(|profile| {
                let (score, breakdown) = calculate_match_score(campaign, &profile, &self.weights);

                if score >= min_score {
                    Some(InfluencerMatch {
                        influencer_id: profile.id,
                        display_name: profile.display_name,
                        audience_size: profile.audience_size,
                        engagement_rate: profile.engagement_rate,
                        follower_count: profile.follower_count,
                        score,
                        breakdown,
                    })
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    b.engagement_rate
                        .partial_cmp(&a.engagement_rate)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| b.follower_count.cmp(&a.follower_count))
        });

        matches.truncate(limit);

        InfluencerRanking {
            matches,
            total_candidates,
        }
    }
}

impl Default for MatchFinder {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignStatus;
    use chrono::{Duration, Utc};

    fn create_campaign(id: &str, status: CampaignStatus, start_offset_days: i64) -> Campaign {
        Campaign {
            id: id.to_string(),
            brand_id: format!("brand_{}", id),
            title: format!("Campaign {}", id),
            niches: vec!["fashion".to_string(), "beauty".to_string()],
            target_location: None,
            budget: 5_000.0,
            status,
            start_date: Utc::now() + Duration::days(start_offset_days),
            end_date: Utc::now() + Duration::days(start_offset_days + 30),
            created_at: Some(Utc::now()),
        }
    }

    fn create_profile(id: &str, niches: Vec<&str>, engagement_rate: f64) -> InfluencerProfile {
        InfluencerProfile {
            id: id.to_string(),
            display_name: format!("Creator {}", id),
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
    fn test_rank_campaigns_filters_closed_statuses() {
        let finder = MatchFinder::with_default_weights();
        let profile = create_profile("inf", vec!["fashion", "beauty"], 0.07);

        let candidates = vec![
            create_campaign("1", CampaignStatus::Active, 1),
            create_campaign("2", CampaignStatus::Draft, 1),
            create_campaign("3", CampaignStatus::Completed, 1),
            create_campaign("4", CampaignStatus::Scheduled, 2),
        ];

        let result = finder.rank_campaigns(&profile, candidates, 0.0, 10);

        assert_eq!(result.total_candidates, 4);
        assert_eq!(result.matches.len(), 2);
        for m in &result.matches {
            assert!(m.status.is_open_for_matching());
        }
    }

    #[test]
    fn test_rank_campaigns_tie_break_earliest_start() {
        let finder = MatchFinder::with_default_weights();
        let profile = create_profile("inf", vec!["fashion", "beauty"], 0.07);

        // Identical campaigns except for start date -> identical scores
        let candidates = vec![
            create_campaign("later", CampaignStatus::Active, 14),
            create_campaign("sooner", CampaignStatus::Active, 2),
        ];

        let result = finder.rank_campaigns(&profile, candidates, 0.0, 10);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].campaign_id, "sooner");
        assert_eq!(result.matches[1].campaign_id, "later");
    }

    #[test]
    fn test_rank_influencers_sorted_by_score() {
        let finder = MatchFinder::with_default_weights();
        let campaign = create_campaign("cmp", CampaignStatus::Active, 1);

        let candidates = vec![
            create_profile("partial", vec!["fashion"], 0.05),
            create_profile("full", vec!["fashion", "beauty"], 0.08),
        ];

        let result = finder.rank_influencers(&campaign, candidates, 0.0, 10);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].influencer_id, "full");
        assert!(result.matches[0].score > result.matches[1].score);
    }

    #[test]
    fn test_min_score_threshold_subsets() {
        let finder = MatchFinder::with_default_weights();
        let campaign = create_campaign("cmp", CampaignStatus::Active, 1);

        let candidates: Vec<InfluencerProfile> = (0..20)
            .map(|i| {
                let niches = if i % 2 == 0 {
                    vec!["fashion", "beauty"]
                } else {
                    vec!["fashion"]
                };
                create_profile(&i.to_string(), niches, 0.01 + (i as f64) * 0.004)
            })
            .collect();

        let loose = finder.rank_influencers(&campaign, candidates.clone(), 40.0, 50);
        let strict = finder.rank_influencers(&campaign, candidates, 70.0, 50);

        assert!(strict.matches.len() <= loose.matches.len());
        for m in &strict.matches {
            assert!(loose.matches.iter().any(|l| l.influencer_id == m.influencer_id));
        }
    }

    #[test]
    fn test_no_candidates_is_empty_not_error() {
        let finder = MatchFinder::with_default_weights();
        let campaign = create_campaign("cmp", CampaignStatus::Active, 1);

        let result = finder.rank_influencers(&campaign, vec![], 0.0, 10);

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_respects_limit() {
        let finder = MatchFinder::with_default_weights();
        let profile = create_profile("inf", vec!["fashion", "beauty"], 0.07);

        let candidates: Vec<Campaign> = (0..25)
            .map(|i| create_campaign(&i.to_string(), CampaignStatus::Active, i))
            .collect();

        let result = finder.rank_campaigns(&profile, candidates, 0.0, 5);

        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.total_candidates, 25);
    }
}
