//! Client-side toolkit for a mini app credits checkout, plus diagnostics for
//! its payment webhook endpoint.

pub mod api;
pub mod checkout;
pub mod config;
pub mod diagnostics;
pub mod observability;

pub use api::PaymentClient;
pub use checkout::CheckoutForm;
pub use config::CheckoutConfig;
