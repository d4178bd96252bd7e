// Criterion benchmarks for BrandBridge Core

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use brandbridge_core::core::{budget::{audience_fit_score, BudgetTier}, filters::niche_overlap, MatchFinder};
use brandbridge_core::core::scoring::calculate_match_score;
use brandbridge_core::models::{Campaign, CampaignStatus, InfluencerProfile, ScoringWeights};
use chrono::{Duration, Utc};

const NICHE_POOL: &[&str] = &[
    "fashion", "beauty", "fitness", "travel", "food", "gaming", "tech", "music",
];

fn create_campaign() -> Campaign {
    Campaign {
        id: "cmp_bench".to_string(),
        brand_id: "brand_bench".to_string(),
        title: "Benchmark campaign".to_string(),
        niches: vec!["fashion".to_string(), "beauty".to_string(), "fitness".to_string()],
        target_location: Some("Berlin".to_string()),
        budget: 8_000.0,
        status: CampaignStatus::Active,
        start_date: Utc::now() + Duration::days(3),
        end_date: Utc::now() + Duration::days(33),
        created_at: Some(Utc::now()),
    }
}

fn create_profile(id: usize) -> InfluencerProfile {
    let niches = (0..=(id % 4))
        .map(|n| NICHE_POOL[(id + n) % NICHE_POOL.len()].to_string())
        .collect();

    InfluencerProfile {
        id: id.to_string(),
        display_name: format!("Creator {}", id),
        niches,
        location: if id % 3 == 0 { Some("Berlin".to_string()) } else { None },
        audience_size: 5_000 + (id as i64 * 1_733) % 900_000,
        engagement_rate: 0.01 + (id % 9) as f64 * 0.01,
        follower_count: 10_000 + (id as i64 * 2_117) % 1_200_000,
        is_active: true,
        created_at: Some(Utc::now()),
    }
}

fn bench_single_score(c: &mut Criterion) {
    let campaign = create_campaign();
    let profile = create_profile(7);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&campaign),
                black_box(&profile),
                black_box(&weights),
            )
        });
    });
}

fn bench_niche_overlap(c: &mut Criterion) {
    let wanted: Vec<String> = vec!["fashion", "beauty", "fitness"]
        .into_iter()
        .map(String::from)
        .collect();
    let offered: Vec<String> = vec!["fashion", "travel", "food", "beauty"]
        .into_iter()
        .map(String::from)
        .collect();

    c.bench_function("niche_overlap", |b| {
        b.iter(|| niche_overlap(black_box(&wanted), black_box(&offered)));
    });
}

fn bench_audience_fit(c: &mut Criterion) {
    c.bench_function("audience_fit_score", |b| {
        b.iter(|| audience_fit_score(black_box(120_000), black_box(BudgetTier::Scale)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let finder = MatchFinder::with_default_weights();
    let campaign = create_campaign();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<InfluencerProfile> =
            (0..*candidate_count).map(create_profile).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_influencers", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    finder.rank_influencers(
                        black_box(&campaign),
                        black_box(candidates.clone()),
                        black_box(40.0),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_score,
    bench_niche_overlap,
    bench_audience_fit,
    bench_ranking
);

criterion_main!(benches);
