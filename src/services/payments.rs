use crate::models::PaymentEvent;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the payment provider
#[derive(Debug, Error)]
pub enum PaymentProviderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid provider API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Checkout session as reported by the payment provider.
///
/// Metadata ids are optional at this point; converting to a
/// `PaymentEvent` enforces their presence.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub payment_status: String,
    pub campaign_id: Option<String>,
    pub influencer_id: Option<String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    /// Convert into a reconciliation event.
    ///
    /// Sessions whose metadata lacks either id cannot be reconciled and
    /// are rejected here rather than deeper in the flow.
    pub fn into_event(self) -> Result<PaymentEvent, PaymentProviderError> {
        let paid = self.is_paid();

        let campaign_id = self.campaign_id.ok_or_else(|| {
            PaymentProviderError::InvalidResponse("session metadata missing campaignId".into())
        })?;
        let influencer_id = self.influencer_id.ok_or_else(|| {
            PaymentProviderError::InvalidResponse("session metadata missing influencerId".into())
        })?;

        Ok(PaymentEvent {
            session_id: self.id,
            paid,
            campaign_id,
            influencer_id,
        })
    }
}

/// Payment provider API client
///
/// Retrieves checkout sessions so their status can be verified
/// server-side instead of trusting the redirect parameters.
pub struct PaymentProviderClient {
    base_url: String,
    secret_key: String,
    client: Client,
}

impl PaymentProviderClient {
    /// Create a new payment provider client
    pub fn new(base_url: String, secret_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            secret_key,
            client,
        }
    }

    /// Retrieve a checkout session by its provider-assigned identifier
    pub async fn retrieve_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, PaymentProviderError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(session_id)
        );

        tracing::debug!("Retrieving checkout session {}", session_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => return Err(PaymentProviderError::Unauthorized),
            404 => {
                return Err(PaymentProviderError::NotFound(format!(
                    "checkout session {}",
                    session_id
                )))
            }
            _ if !response.status().is_success() => {
                return Err(PaymentProviderError::ApiError(format!(
                    "Failed to retrieve session: {}",
                    response.status()
                )));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let id = json
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentProviderError::InvalidResponse("missing session id".into()))?
            .to_string();

        let payment_status = json
            .get("payment_status")
            .and_then(|v| v.as_str())
            .unwrap_or("unpaid")
            .to_string();

        let metadata = json.get("metadata");
        let campaign_id = metadata
            .and_then(|m| m.get("campaignId"))
            .and_then(|v| v.as_str())
            .map(String::from);
        let influencer_id = metadata
            .and_then(|m| m.get("influencerId"))
            .and_then(|v| v.as_str())
            .map(String::from);

        Ok(CheckoutSession {
            id,
            payment_status,
            campaign_id,
            influencer_id,
        })
    }
}
