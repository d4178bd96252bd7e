use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::reconcile::{reconcile_paid_session, ReconcileError};
use crate::models::{ErrorResponse, ReconcilePaymentRequest, ReconcilePaymentResponse};
use crate::routes::matches::AppState;
use crate::services::{CacheKey, PaymentProviderError};

/// Configure payment-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/payments/reconcile", web::post().to(reconcile_payment));
}

/// Reconcile a completed checkout session
///
/// POST /api/v1/payments/reconcile
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string"
/// }
/// ```
///
/// The session is re-fetched from the payment provider so its status is
/// verified server-side. Secondary failures (campaign transition,
/// notification) come back in `warnings` with a 200, never as a fatal
/// error once the provider has confirmed payment.
async fn reconcile_payment(
    state: web::Data<AppState>,
    req: web::Json<ReconcilePaymentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Reconciling payment session {}", req.session_id);

    let session = match state.payments.retrieve_session(&req.session_id).await {
        Ok(session) => session,
        Err(PaymentProviderError::NotFound(what)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: what,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Payment provider lookup failed for {}: {}", req.session_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Payment provider unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let event = match session.into_event() {
        Ok(event) => event,
        Err(e) => {
            // Sessions without marketplace metadata were not created by us
            tracing::warn!("Session {} cannot be reconciled: {}", req.session_id, e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Session not reconcilable".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let outcome = match reconcile_paid_session(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &event,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err @ ReconcileError::ApplicationNotFound { .. }) => {
            tracing::error!("Payment metadata mismatch: {}", err);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Application not found".to_string(),
                message: err.to_string(),
                status_code: 404,
            });
        }
        Err(err) => {
            tracing::error!("Reconciliation failed for {}: {}", req.session_id, err);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Reconciliation failed".to_string(),
                message: err.to_string(),
                status_code: 500,
            });
        }
    };

    // A campaign transition changes which campaigns are matchable, so the
    // cached rankings are stale on both sides
    if outcome.campaign_started {
        let pattern = CacheKey::influencer_matches_pattern(&event.campaign_id);
        if let Err(e) = state.cache.invalidate_pattern(&pattern).await {
            tracing::warn!("Failed to invalidate influencer match cache: {}", e);
        }
        if let Err(e) = state
            .cache
            .invalidate_pattern(&CacheKey::campaign_matches_pattern())
            .await
        {
            tracing::warn!("Failed to invalidate campaign match cache: {}", e);
        }
    }

    if !outcome.warnings.is_empty() {
        tracing::warn!(
            "Reconciled session {} with warnings: {:?}",
            req.session_id,
            outcome.warnings
        );
    }

    HttpResponse::Ok().json(ReconcilePaymentResponse {
        payment_verified: outcome.payment_verified,
        session_id: event.session_id,
        application_status: outcome.application_status,
        application_updated: outcome.application_updated,
        campaign_started: outcome.campaign_started,
        notification_sent: outcome.notification_sent,
        warnings: outcome.warnings,
    })
}
