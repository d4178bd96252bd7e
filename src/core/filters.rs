use crate::models::{Campaign, InfluencerProfile};
use std::collections::BTreeSet;

/// Check if a campaign is open for matching.
///
/// This is Stage 1 of the ranking pipeline: only scheduled and active
/// campaigns are candidates.
#[inline]
pub fn campaign_open_for_matching(campaign: &Campaign) -> bool {
    campaign.status.is_open_for_matching()
}

/// Check if an influencer profile is a matching candidate.
#[inline]
pub fn profile_eligible(profile: &InfluencerProfile) -> bool {
    profile.is_active
}

/// Normalized niche overlap between a campaign and a profile.
///
/// Returns the Jaccard overlap (intersection over union, 0.0 to 1.0) of
/// the case-folded niche sets along with the shared niches in sorted
/// order. An empty set on either side scores 0.0, not an error.
pub fn niche_overlap(
    campaign_niches: &[String],
    profile_niches: &[String],
) -> (f64, Vec<String>) {
    if campaign_niches.is_empty() || profile_niches.is_empty() {
        return (0.0, Vec::new());
    }

    let wanted: BTreeSet<String> = campaign_niches
        .iter()
        .map(|n| n.trim().to_lowercase())
        .collect();
    let offered: BTreeSet<String> = profile_niches
        .iter()
        .map(|n| n.trim().to_lowercase())
        .collect();

    let shared: Vec<String> = wanted.intersection(&offered).cloned().collect();
    let union = wanted.union(&offered).count();

    let overlap = if union > 0 {
        shared.len() as f64 / union as f64
    } else {
        0.0
    };

    (overlap, shared)
}
