//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the checkout
//! client and the webhook diagnostics tool. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the checkout client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Backend API settings.
    pub api: ApiConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Host-provided session identity.
    pub session: SessionConfig,

    /// Webhook probe settings.
    pub webhook: WebhookConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the payments backend (e.g., "https://pay.example.com").
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Timeout configuration for outbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Session identity handed to the page by the host messaging client.
///
/// Both fields are optional: the backend accepts anonymous payment attempts
/// and rejects them with an in-band error when it needs an account.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Numeric user id from the host client.
    pub user_id: Option<i64>,

    /// Opaque host-signed session token, passed through verbatim.
    pub init_data: Option<String>,
}

/// Webhook probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint the synthetic payment event is POSTed to.
    pub url: String,

    /// Name of the provider signature header. The probe sends a placeholder
    /// value; nothing verifies it client-side.
    pub signature_header: String,

    /// Optional shared secret sent in `X-API-Key` when set.
    pub secret: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/api/miniapp/lava-webhook".to_string(),
            signature_header: "X-Lava-Signature".to_string(),
            secret: None,
        }
    }
}
