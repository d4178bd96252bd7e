use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::MatchFinder;
use crate::models::{
    CampaignMatchesRequest, CampaignMatchesResponse, ErrorResponse, HealthResponse,
    InfluencerMatchesRequest, InfluencerMatchesResponse,
};
use crate::routes::auth::{authenticate, AuthError, Claims};
use crate::services::{CacheKey, CacheManager, MarketplaceStore, NotificationClient,
    PaymentProviderClient, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MarketplaceStore>,
    pub payments: Arc<PaymentProviderClient>,
    pub notifier: Arc<NotificationClient>,
    pub cache: Arc<CacheManager>,
    pub finder: MatchFinder,
    pub jwt_secret: String,
    pub default_min_score: f64,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/campaigns", web::post().to(find_campaign_matches))
        .route("/matches/influencers", web::post().to(find_influencer_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn unauthorized(err: AuthError) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "Unauthorized".to_string(),
        message: err.to_string(),
        status_code: 401,
    })
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse {
        error: "Forbidden".to_string(),
        message: "Caller may not view matches for this entity".to_string(),
        status_code: 403,
    })
}

fn caller_claims(http_req: &actix_web::HttpRequest, state: &AppState) -> Result<Claims, HttpResponse> {
    authenticate(http_req, &state.jwt_secret).map_err(unauthorized)
}

/// Find matching campaigns for an influencer
///
/// POST /api/v1/matches/campaigns
///
/// Request body:
/// ```json
/// {
///   "influencerId": "string",
///   "minScore": 40.0,
///   "limit": 20
/// }
/// ```
async fn find_campaign_matches(
    state: web::Data<AppState>,
    req: web::Json<CampaignMatchesRequest>,
    http_req: actix_web::HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for campaign matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let claims = match caller_claims(&http_req, &state) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };
    if !claims.can_act_for(&req.influencer_id) {
        return forbidden();
    }

    let min_score = req.min_score.unwrap_or(state.default_min_score);
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    tracing::info!(
        "Finding campaigns for influencer {} (min score {}, limit {})",
        req.influencer_id,
        min_score,
        limit
    );

    let profile = match state.store.get_influencer(&req.influencer_id).await {
        Ok(profile) => profile,
        Err(StoreError::NotFound(what)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: what,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch influencer {}: {}", req.influencer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch influencer profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let cache_key = CacheKey::campaign_matches(&req.influencer_id, min_score, limit);
    if let Ok(cached) = state.cache.get::<CampaignMatchesResponse>(&cache_key).await {
        tracing::debug!("Serving cached campaign matches for {}", req.influencer_id);
        return HttpResponse::Ok().json(cached);
    }

    let candidates = match state.store.list_open_campaigns().await {
        Ok(campaigns) => campaigns,
        Err(e) => {
            tracing::error!("Failed to list open campaigns: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query campaigns".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let ranking = state.finder.rank_campaigns(&profile, candidates, min_score, limit);

    let response = CampaignMatchesResponse {
        matches: ranking.matches,
        total_candidates: ranking.total_candidates,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache campaign matches: {}", e);
    }

    tracing::info!(
        "Returning {} campaign matches for influencer {} (from {} candidates)",
        response.matches.len(),
        req.influencer_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Find matching influencers for a campaign
///
/// POST /api/v1/matches/influencers
///
/// Request body:
/// ```json
/// {
///   "campaignId": "string",
///   "minScore": 40.0,
///   "limit": 20
/// }
/// ```
async fn find_influencer_matches(
    state: web::Data<AppState>,
    req: web::Json<InfluencerMatchesRequest>,
    http_req: actix_web::HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for influencer matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let claims = match caller_claims(&http_req, &state) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let min_score = req.min_score.unwrap_or(state.default_min_score);
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let campaign = match state.store.get_campaign(&req.campaign_id).await {
        Ok(campaign) => campaign,
        Err(StoreError::NotFound(what)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: what,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch campaign {}: {}", req.campaign_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch campaign".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Only the owning brand (or an admin) may browse candidates
    if !claims.can_act_for(&campaign.brand_id) {
        return forbidden();
    }

    tracing::info!(
        "Finding influencers for campaign {} (min score {}, limit {})",
        req.campaign_id,
        min_score,
        limit
    );

    let cache_key = CacheKey::influencer_matches(&req.campaign_id, min_score, limit);
    if let Ok(cached) = state.cache.get::<InfluencerMatchesResponse>(&cache_key).await {
        tracing::debug!("Serving cached influencer matches for {}", req.campaign_id);
        return HttpResponse::Ok().json(cached);
    }

    let candidates = match state.store.list_active_influencers().await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to list influencer candidates: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query influencers".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let ranking = state.finder.rank_influencers(&campaign, candidates, min_score, limit);

    let response = InfluencerMatchesResponse {
        matches: ranking.matches,
        total_candidates: ranking.total_candidates,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache influencer matches: {}", e);
    }

    tracing::info!(
        "Returning {} influencer matches for campaign {} (from {} candidates)",
        response.matches.len(),
        req.campaign_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
