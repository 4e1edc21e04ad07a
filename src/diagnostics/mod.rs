//! Webhook endpoint diagnostics.
//!
//! Operator-driven tooling: send a synthetic payment event at the webhook
//! endpoint, and scan a provider dashboard page for testing controls and API
//! endpoint references. Nothing here runs in the payment path.

pub mod scanner;
pub mod webhook;

pub use scanner::{scan_api_endpoints, scan_test_controls, EndpointMatch, TestControl};
pub use webhook::{DeliveryReport, ProbeError, TestWebhookPayload, WebhookSender};
