//! Checkout flow subsystem.
//!
//! # Data Flow
//! ```text
//! user interaction
//!     → form.rs (selection + email state, pay gate)
//!     → packages.rs (catalog, flat-rate consistency)
//!     → api::PaymentClient (one request per submit)
//!     → SubmitOutcome (redirect or surfaced failure)
//! ```

pub mod form;
pub mod packages;

pub use form::{validate_email, CheckoutForm, FormView, SubmitError, SubmitOutcome};
pub use packages::{CreditPackage, PackageCatalog};
