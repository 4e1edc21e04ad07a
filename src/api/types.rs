//! Wire types for the payment-creation protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::SessionConfig;

/// Settlement currency. The storefront only sells in USD.
pub const CURRENCY: &str = "USD";

/// Payment method offered by the mini app.
pub const PAYMENT_METHOD: &str = "card";

/// Message shown when the backend reports failure without an error text.
pub const DEFAULT_CREATE_ERROR: &str = "Failed to create payment";

/// Request body for creating a payment session.
///
/// Built fresh for every submission attempt; never cached. `currency` and
/// `payment_method` are fixed by the constructor rather than caller-settable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Billing email for the receipt.
    pub email: String,
    /// Number of credits being purchased.
    pub credits: u32,
    /// Quoted price in USD.
    pub amount: f64,
    /// Always [`CURRENCY`].
    pub currency: String,
    /// Always [`PAYMENT_METHOD`].
    pub payment_method: String,
    /// Numeric user id from the host client, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Opaque host-signed session token, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_data: Option<String>,
}

impl PaymentRequest {
    /// Assemble a request for one submission attempt.
    pub fn new(email: String, credits: u32, amount: f64, session: &SessionConfig) -> Self {
        Self {
            email,
            credits,
            amount,
            currency: CURRENCY.to_string(),
            payment_method: PAYMENT_METHOD.to_string(),
            user_id: session.user_id,
            init_data: session.init_data.clone(),
        }
    }
}

/// Raw response body of the payment-creation endpoint.
///
/// Polymorphic over two shapes: success carries `payment_url` (and usually
/// `payment_id`), failure carries an optional `error` text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A successfully created payment session.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    /// Where the host should navigate the user to complete payment.
    pub payment_url: Url,
    /// Backend transaction id, used for status polling.
    pub payment_id: Option<String>,
}

/// Lifecycle states reported by the payment-status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Completed,
    Pending,
    Failed,
}

/// Response body of the payment-status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub success: bool,
    pub status: PaymentState,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Errors from talking to the payments backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent, or timed out in flight.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with an in-band failure payload.
    #[error("{0}")]
    Backend(String),

    /// Response body was not the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Success payload without a usable payment link.
    #[error("payment link missing or invalid in response")]
    MissingPaymentUrl,

    /// Endpoint path could not be joined onto the configured base URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_fields() {
        let session = SessionConfig {
            user_id: Some(123456789),
            init_data: Some("query_id=abc".to_string()),
        };
        let request = PaymentRequest::new("user@example.com".to_string(), 100, 5.0, &session);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["payment_method"], "card");
        assert_eq!(json["credits"], 100);
        assert_eq!(json["amount"], 5.0);
        assert_eq!(json["user_id"], 123456789);
    }

    #[test]
    fn absent_session_fields_are_omitted() {
        let request =
            PaymentRequest::new("user@example.com".to_string(), 200, 10.0, &SessionConfig::default());

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("user_id").is_none());
        assert!(json.get("init_data").is_none());
    }

    #[test]
    fn response_decodes_both_shapes() {
        let ok: PaymentResponse =
            serde_json::from_str(r#"{"success":true,"payment_url":"https://pay.example/x","payment_id":"42"}"#)
                .unwrap();
        assert!(ok.success);
        assert_eq!(ok.payment_url.as_deref(), Some("https://pay.example/x"));

        let failed: PaymentResponse =
            serde_json::from_str(r#"{"success":false,"error":"Insufficient funds"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Insufficient funds"));
    }

    #[test]
    fn payment_state_decodes_lowercase() {
        let status: PaymentStatus = serde_json::from_str(
            r#"{"success":true,"status":"pending","amount":5.0,"created_at":"2026-01-10T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(status.status, PaymentState::Pending);
    }
}
