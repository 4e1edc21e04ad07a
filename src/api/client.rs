//! Typed client for the payments backend.
//!
//! One `reqwest::Client` per instance, with connect and request timeouts
//! applied at construction. Every call issues exactly one request: failures
//! are terminal for the attempt and never retried here.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::api::types::{
    ApiError, PaymentRequest, PaymentResponse, PaymentSession, PaymentStatus, DEFAULT_CREATE_ERROR,
};
use crate::config::TimeoutConfig;

/// Path of the payment-creation endpoint.
pub const CREATE_PAYMENT_PATH: &str = "/api/miniapp/create-payment";

/// Path prefix of the payment-status endpoint.
pub const PAYMENT_STATUS_PATH: &str = "/api/miniapp/payment-status";

/// Client for the mini app payment API.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    client: Client,
    base_url: Url,
}

impl PaymentClient {
    /// Create a client against `base_url` with the configured timeouts.
    pub fn new(base_url: Url, timeouts: &TimeoutConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create a payment session for a top-up.
    ///
    /// Issues one POST. A `{success: false}` body maps to [`ApiError::Backend`]
    /// carrying the backend's error text (or [`DEFAULT_CREATE_ERROR`] when the
    /// backend omits it), regardless of HTTP status.
    pub async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentSession, ApiError> {
        let endpoint = self.base_url.join(CREATE_PAYMENT_PATH)?;

        tracing::debug!(
            credits = request.credits,
            amount = request.amount,
            "creating payment session"
        );

        let response = self.client.post(endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: PaymentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(ApiError::Decode(e)),
            Err(_) => {
                return Err(ApiError::Backend(format!(
                    "backend returned status {}",
                    status
                )))
            }
        };

        if !parsed.success {
            return Err(ApiError::Backend(
                parsed.error.unwrap_or_else(|| DEFAULT_CREATE_ERROR.to_string()),
            ));
        }

        let link = parsed.payment_url.ok_or(ApiError::MissingPaymentUrl)?;
        let payment_url = Url::parse(&link).map_err(|_| ApiError::MissingPaymentUrl)?;

        tracing::info!(payment_url = %payment_url, payment_id = ?parsed.payment_id, "payment session created");

        Ok(PaymentSession {
            payment_url,
            payment_id: parsed.payment_id,
        })
    }

    /// Fetch the current status of a payment by its backend id.
    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, ApiError> {
        let endpoint = self
            .base_url
            .join(&format!("{}/{}", PAYMENT_STATUS_PATH, payment_id))?;

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Unknown payments come back as {success: false, error} with a 404.
            let message = serde_json::from_str::<PaymentResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| format!("backend returned status {}", status));
            return Err(ApiError::Backend(message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
