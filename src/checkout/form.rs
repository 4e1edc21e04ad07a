//! Checkout form controller.
//!
//! # Responsibilities
//! - Own package selection and email state per form instance
//! - Gate the pay control on email validity and in-flight state
//! - Issue exactly one payment-creation request per submission
//!
//! # Design Decisions
//! - State lives on the instance, never in module globals; two forms never
//!   share selection state
//! - Every terminal path (success, backend failure, transport failure,
//!   cancellation) re-enables the pay control
//! - Failures surface a message and leave the form re-submittable; retrying
//!   is the user's decision

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::api::client::PaymentClient;
use crate::api::types::{ApiError, PaymentRequest, DEFAULT_CREATE_ERROR};
use crate::checkout::packages::{CreditPackage, PackageCatalog};
use crate::config::SessionConfig;

/// Message shown for transport-level failures, where the backend never
/// produced an error text of its own.
pub const GENERIC_RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Local part and domain are runs of non-whitespace, non-`@` characters; the
/// domain must contain a dot with a non-empty label on each side.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Returns true iff `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Submission lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitPhase {
    /// No request in flight; the pay control follows email validity.
    Idle,
    /// A request is in flight; the pay control is disabled.
    InFlight,
}

/// Errors that prevent a submission attempt from issuing a request.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Email failed validation.
    #[error("invalid email address")]
    InvalidEmail,

    /// Another submission is already in flight for this form.
    #[error("a submission is already in flight")]
    InFlight,

    /// Quoted amount does not match the flat rate for the selection.
    #[error("amount {amount} does not match the price of {credits} credits")]
    PriceMismatch { credits: u32, amount: f64 },
}

/// Terminal result of a submission attempt that issued a request.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Session created; the host should navigate to `payment_url`.
    Redirect {
        payment_url: Url,
        payment_id: Option<String>,
    },
    /// Attempt failed; `message` is what the user sees. The form is already
    /// re-enabled.
    Failed { message: String },
}

/// One package row in the render snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PackageView {
    pub credits: u32,
    pub price_usd: f64,
    pub active: bool,
}

/// Render snapshot for the embedding UI.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    /// Price of the current selection.
    pub total_usd: f64,
    /// Whether the pay control accepts a click.
    pub pay_enabled: bool,
    /// Catalog rows; at most one is active.
    pub packages: Vec<PackageView>,
    /// Message from the last failed attempt, if any.
    pub status: Option<String>,
}

/// Controller for one checkout form instance.
#[derive(Debug)]
pub struct CheckoutForm {
    catalog: PackageCatalog,
    selected: CreditPackage,
    email: String,
    phase: SubmitPhase,
    status: Option<String>,
    session: SessionConfig,
}

impl CheckoutForm {
    /// Create a form with the catalog's first package pre-selected.
    pub fn new(catalog: PackageCatalog, session: SessionConfig) -> Self {
        let selected = catalog
            .default_package()
            .unwrap_or(CreditPackage { credits: 100, price_usd: 5.0 });
        Self {
            catalog,
            selected,
            email: String::new(),
            phase: SubmitPhase::Idle,
            status: None,
            session,
        }
    }

    /// Select a package. Always succeeds; only the selection and its UI
    /// reflection change.
    pub fn select_package(&mut self, credits: u32, price_usd: f64) {
        self.selected = CreditPackage { credits, price_usd };
        tracing::debug!(credits, price_usd, "package selected");
    }

    /// Store (trimmed) email input and re-derive the pay control state.
    pub fn set_email(&mut self, input: &str) {
        self.email = input.trim().to_string();
    }

    /// Current selection.
    pub fn selected(&self) -> CreditPackage {
        self.selected
    }

    /// Whether the current email input passes validation.
    pub fn email_valid(&self) -> bool {
        validate_email(&self.email)
    }

    /// Whether the pay control accepts a click right now.
    pub fn pay_enabled(&self) -> bool {
        self.phase == SubmitPhase::Idle && self.email_valid()
    }

    /// Message from the last failed attempt, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Snapshot of everything the embedding UI renders.
    pub fn view(&self) -> FormView {
        FormView {
            total_usd: self.selected.price_usd,
            pay_enabled: self.pay_enabled(),
            packages: self
                .catalog
                .packages()
                .iter()
                .map(|p| PackageView {
                    credits: p.credits,
                    price_usd: p.price_usd,
                    active: *p == self.selected,
                })
                .collect(),
            status: self.status.clone(),
        }
    }

    /// Submit the current selection as one payment-creation request.
    ///
    /// Preconditions are checked before any network effect: a valid email, no
    /// submission in flight, and a selection priced at the flat rate. The pay
    /// control is disabled for the duration of the request and re-enabled on
    /// every exit, including when the returned future is dropped mid-flight.
    pub async fn submit(&mut self, client: &PaymentClient) -> Result<SubmitOutcome, SubmitError> {
        if self.phase == SubmitPhase::InFlight {
            return Err(SubmitError::InFlight);
        }
        if !self.email_valid() {
            return Err(SubmitError::InvalidEmail);
        }
        let CreditPackage { credits, price_usd } = self.selected;
        if !PackageCatalog::price_matches(credits, price_usd) {
            return Err(SubmitError::PriceMismatch {
                credits,
                amount: price_usd,
            });
        }

        let request = PaymentRequest::new(self.email.clone(), credits, price_usd, &self.session);
        self.status = None;

        let result = {
            let _flight = FlightGuard::begin(&mut self.phase);
            client.create_payment(&request).await
        };

        match result {
            Ok(session) => Ok(SubmitOutcome::Redirect {
                payment_url: session.payment_url,
                payment_id: session.payment_id,
            }),
            Err(ApiError::Backend(message)) => {
                tracing::warn!(%message, "backend rejected payment creation");
                Ok(self.fail(message))
            }
            Err(ApiError::MissingPaymentUrl) => {
                tracing::warn!("success response without a payment link");
                Ok(self.fail(DEFAULT_CREATE_ERROR.to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "payment creation failed before a backend answer");
                Ok(self.fail(GENERIC_RETRY_MESSAGE.to_string()))
            }
        }
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        self.status = Some(message.clone());
        SubmitOutcome::Failed { message }
    }
}

/// Marks the form in-flight for the guard's lifetime; releases on drop, so a
/// dropped submission future also re-enables the pay control.
struct FlightGuard<'a> {
    phase: &'a mut SubmitPhase,
}

impl<'a> FlightGuard<'a> {
    fn begin(phase: &'a mut SubmitPhase) -> Self {
        *phase = SubmitPhase::InFlight;
        Self { phase }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.phase = SubmitPhase::Idle;
    }
}
