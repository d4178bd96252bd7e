use crate::models::{Application, ApplicationStatus, PaymentEvent};
use serde_json::json;
use thiserror::Error;

/// Errors that end a reconciliation attempt outright
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no application found for campaign {campaign_id} and influencer {influencer_id}")]
    ApplicationNotFound {
        campaign_id: String,
        influencer_id: String,
    },

    #[error("store lookup failed: {0}")]
    Store(String),
}

/// Store operations the reconciliation flow depends on.
///
/// Implemented by the Postgres marketplace store in production and by an
/// in-memory double in tests.
pub trait ReconcileStore {
    type Error: std::fmt::Display;

    /// Look up the application for a (campaign, influencer) pair.
    async fn find_application(
        &self,
        campaign_id: &str,
        influencer_id: &str,
    ) -> Result<Option<Application>, Self::Error>;

    /// Advance an application to approved_and_paid if it is currently
    /// payable. Returns whether this call changed the row.
    async fn mark_application_paid(&self, application_id: &str) -> Result<bool, Self::Error>;

    /// Move a campaign to in_progress if it is currently scheduled or
    /// active. Must be a single atomic conditional write, never a
    /// read-then-write. Returns whether this call made the transition.
    async fn begin_campaign_progress(&self, campaign_id: &str) -> Result<bool, Self::Error>;
}

/// Notification dispatch seam used by the reconciliation flow.
pub trait NotificationSink {
    type Error: std::fmt::Display;

    async fn notify(
        &self,
        recipient_id: &str,
        title: &str,
        message: &str,
        metadata: serde_json::Value,
    ) -> Result<(), Self::Error>;
}

/// Result of a reconciliation run.
///
/// Once the provider has confirmed payment, `payment_verified` stays true
/// no matter what happens downstream; secondary failures show up in
/// `warnings` instead.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub payment_verified: bool,
    pub application_status: Option<ApplicationStatus>,
    pub application_updated: bool,
    pub campaign_started: bool,
    pub notification_sent: bool,
    pub warnings: Vec<String>,
}

/// Reconcile a completed payment session against application and campaign
/// state.
///
/// Steps:
/// 1. Locate the application for the event's (campaign, influencer) pair;
///    a missing application is a data-integrity mismatch reported as
///    `ApplicationNotFound`, never retried.
/// 2. Mark the application approved_and_paid. Replayed events are a
///    no-op; terminal applications are left untouched with a warning.
/// 3. If this left the application paid, flip the campaign to in_progress
///    through the store's conditional write. Losing that race, or the
///    write failing, never rolls back step 2.
/// 4. Notify the influencer; failure is a warning, not an error.
pub async fn reconcile_paid_session<S, N>(
    store: &S,
    notifier: &N,
    event: &PaymentEvent,
) -> Result<ReconcileOutcome, ReconcileError>
where
    S: ReconcileStore,
    N: NotificationSink,
{
    if !event.paid {
        tracing::info!(
            "Session {} is not paid; nothing to reconcile",
            event.session_id
        );
        return Ok(ReconcileOutcome {
            payment_verified: false,
            warnings: vec![format!(
                "session {} has not been paid; no state was changed",
                event.session_id
            )],
            ..Default::default()
        });
    }

    let application = store
        .find_application(&event.campaign_id, &event.influencer_id)
        .await
        .map_err(|e| ReconcileError::Store(e.to_string()))?
        .ok_or_else(|| ReconcileError::ApplicationNotFound {
            campaign_id: event.campaign_id.clone(),
            influencer_id: event.influencer_id.clone(),
        })?;

    let mut outcome = ReconcileOutcome {
        payment_verified: true,
        application_status: Some(application.status),
        ..Default::default()
    };

    if application.status == ApplicationStatus::ApprovedAndPaid {
        tracing::debug!(
            "Application {} already approved_and_paid; replayed session {}",
            application.id,
            event.session_id
        );
    } else if application.status.is_terminal() {
        outcome.warnings.push(format!(
            "application {} is in terminal status and was left unchanged",
            application.id
        ));
    } else {
        match store.mark_application_paid(&application.id).await {
            Ok(updated) => {
                outcome.application_updated = updated;
                if updated {
                    outcome.application_status = Some(ApplicationStatus::ApprovedAndPaid);
                }
            }
            Err(e) => {
                tracing::error!("Failed to mark application {} paid: {}", application.id, e);
                outcome.warnings.push(format!(
                    "failed to mark application {} paid: {}",
                    application.id, e
                ));
            }
        }
    }

    // The campaign's first paid application moves it to in_progress. The
    // store does this as one compare-and-set; a concurrent confirmation
    // winning the race surfaces here as Ok(false).
    if outcome.application_status == Some(ApplicationStatus::ApprovedAndPaid) {
        match store.begin_campaign_progress(&event.campaign_id).await {
            Ok(started) => {
                outcome.campaign_started = started;
                if started {
                    tracing::info!("Campaign {} moved to in_progress", event.campaign_id);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Campaign {} status update failed after payment: {}",
                    event.campaign_id,
                    e
                );
                outcome.warnings.push(format!(
                    "campaign {} status update failed: {}",
                    event.campaign_id, e
                ));
            }
        }
    }

    let metadata = json!({
        "campaignId": event.campaign_id,
        "sessionId": event.session_id,
    });

    match notifier
        .notify(
            &event.influencer_id,
            "Payment received",
            &format!(
                "Payment for your campaign application has been confirmed (campaign {}).",
                event.campaign_id
            ),
            metadata,
        )
        .await
    {
        Ok(()) => outcome.notification_sent = true,
        Err(e) => {
            tracing::warn!(
                "Failed to notify influencer {} about payment: {}",
                event.influencer_id,
                e
            );
            outcome
                .warnings
                .push(format!("notification to {} failed: {}", event.influencer_id, e));
        }
    }

    Ok(outcome)
}
