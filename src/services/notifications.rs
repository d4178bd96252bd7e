use crate::core::reconcile::NotificationSink;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when dispatching notifications
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Dispatch rejected: {0}")]
    DispatchError(String),
}

/// Notification dispatch client
///
/// Posts notifications to the marketplace notification service; delivery
/// to the influencer's devices is that service's concern.
pub struct NotificationClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl NotificationClient {
    /// Create a new notification client
    pub fn new(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            client,
        }
    }

    /// Dispatch one notification
    pub async fn send(
        &self,
        recipient_id: &str,
        title: &str,
        message: &str,
        metadata: Value,
    ) -> Result<(), NotificationError> {
        let url = format!(
            "{}/notifications",
            self.endpoint.trim_end_matches('/')
        );

        let payload = serde_json::json!({
            "notificationId": uuid::Uuid::new_v4().to_string(),
            "recipientId": recipient_id,
            "title": title,
            "message": message,
            "metadata": metadata,
            "createdAt": chrono::Utc::now(),
        });

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotificationError::DispatchError(format!(
                "notification service returned {}",
                response.status()
            )));
        }

        tracing::debug!("Dispatched notification to {}", recipient_id);

        Ok(())
    }
}

impl NotificationSink for NotificationClient {
    type Error = NotificationError;

    async fn notify(
        &self,
        recipient_id: &str,
        title: &str,
        message: &str,
        metadata: Value,
    ) -> Result<(), NotificationError> {
        self.send(recipient_id, title, message, metadata).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_posts_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/notifications")
            .match_header("x-api-key", "nk_test")
            .with_status(201)
            .create_async()
            .await;

        let client = NotificationClient::new(server.url(), "nk_test".to_string());
        client
            .send("inf_1", "Payment received", "Your payment cleared.", json!({}))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_dispatch_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/notifications")
            .with_status(503)
            .create_async()
            .await;

        let client = NotificationClient::new(server.url(), "nk_test".to_string());
        let err = client
            .send("inf_1", "Payment received", "Your payment cleared.", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::DispatchError(_)));
    }
}
