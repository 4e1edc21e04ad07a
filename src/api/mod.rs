//! Payments backend API surface.
//!
//! # Data Flow
//! ```text
//! CheckoutForm::submit
//!     → types.rs (PaymentRequest, fixed currency/method fields)
//!     → client.rs (one POST, configured timeouts)
//!     → PaymentSession { payment_url } or ApiError
//! ```
//!
//! # Design Decisions
//! - Backend-reported failure and transport failure are distinct error variants
//! - No retries or backoff anywhere; an attempt is terminal
//! - Timeouts come from config and bound every request

pub mod client;
pub mod types;

pub use client::PaymentClient;
pub use types::{ApiError, PaymentRequest, PaymentSession, PaymentState, PaymentStatus};
