//! Synthetic webhook delivery.
//!
//! Builds a payment-success event with timestamp-derived identifiers and
//! POSTs it once to the configured endpoint. Outcomes are logged and handed
//! back to the operator; nothing is retried or escalated.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::config::{TimeoutConfig, WebhookConfig};

/// Placeholder signature value. Nothing verifies it client-side; whether the
/// endpoint checks a real HMAC is its own business.
pub const SIGNATURE_PLACEHOLDER: &str = "test_signature";

/// Header marking the delivery as a test event.
pub const TEST_MODE_HEADER: &str = "X-Test-Mode";

/// Header carrying the per-delivery id.
pub const WEBHOOK_ID_HEADER: &str = "X-Webhook-Id";

/// Header carrying the optional shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Errors from the webhook probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Request could not be sent, or timed out in flight.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configured webhook URL did not parse.
    #[error("invalid webhook URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Synthetic payment-success event, shaped like a provider delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestWebhookPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub event: String,
    pub test_mode: bool,
    pub data: TestPaymentData,
    pub created_at: DateTime<Utc>,
}

/// Payment metadata nested inside the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPaymentData {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_id: String,
    pub customer: TestCustomer,
    pub metadata: TestMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCustomer {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    pub tokens: u32,
    pub user_id: String,
}

impl TestWebhookPayload {
    /// Build a fresh event with timestamp-derived identifiers.
    pub fn synthetic() -> Self {
        let now = Utc::now();
        let millis = now.timestamp_millis();
        Self {
            id: format!("test_webhook_{millis}"),
            kind: "payment".to_string(),
            event: "payment.success".to_string(),
            test_mode: true,
            data: TestPaymentData {
                order_id: format!("test_order_{millis}"),
                amount: 5.0,
                currency: "USD".to_string(),
                status: "success".to_string(),
                payment_id: format!("pay_test_{millis}"),
                customer: TestCustomer {
                    email: "test@example.com".to_string(),
                    phone: "+1234567890".to_string(),
                },
                metadata: TestMetadata {
                    tokens: 100,
                    user_id: "test_user".to_string(),
                },
            },
            created_at: now,
        }
    }
}

/// What the endpoint said about one delivery attempt.
#[derive(Debug)]
pub struct DeliveryReport {
    /// Per-delivery id sent in [`WEBHOOK_ID_HEADER`].
    pub webhook_id: Uuid,
    /// Event id from the payload.
    pub event_id: String,
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Response body, verbatim.
    pub body: String,
}

impl DeliveryReport {
    /// Whether the endpoint accepted the delivery.
    pub fn accepted(&self) -> bool {
        self.status.is_success()
    }
}

/// One-shot sender for synthetic webhook deliveries.
#[derive(Debug, Clone)]
pub struct WebhookSender {
    client: Client,
    url: Url,
    signature_header: String,
    secret: Option<String>,
}

impl WebhookSender {
    /// Build a sender from the probe configuration.
    pub fn new(config: &WebhookConfig, timeouts: &TimeoutConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self {
            client,
            url: Url::parse(&config.url)?,
            signature_header: config.signature_header.clone(),
            secret: config.secret.clone(),
        })
    }

    /// Send one synthetic payment event.
    ///
    /// A non-2xx answer is reported in the returned [`DeliveryReport`], not
    /// treated as an error; only transport failures bubble up.
    pub async fn send_test_webhook(&self) -> Result<DeliveryReport, ProbeError> {
        let payload = TestWebhookPayload::synthetic();
        let webhook_id = Uuid::new_v4();

        tracing::info!(%webhook_id, event_id = %payload.id, url = %self.url, "sending test webhook");

        let mut request = self
            .client
            .post(self.url.clone())
            .header(TEST_MODE_HEADER, "true")
            .header(self.signature_header.as_str(), SIGNATURE_PLACEHOLDER)
            .header(WEBHOOK_ID_HEADER, webhook_id.to_string())
            .json(&payload);

        if let Some(secret) = &self.secret {
            request = request.header(API_KEY_HEADER, secret.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            tracing::info!(%status, "webhook delivered");
        } else {
            tracing::warn!(%status, body = %body, "webhook endpoint rejected delivery");
        }

        Ok(DeliveryReport {
            webhook_id,
            event_id: payload.id,
            status,
            body,
        })
    }
}
