//! Checkout CLI for the mini app payments backend.
//!
//! Drives the same flow the embedded payment form runs: pick a credit
//! package, validate the billing email, create a payment session, and print
//! the link to pay at.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use miniapp_checkout::checkout::{CheckoutForm, PackageCatalog, SubmitOutcome};
use miniapp_checkout::config::{loader, SessionConfig};
use miniapp_checkout::observability::logging;
use miniapp_checkout::PaymentClient;

#[derive(Parser)]
#[command(name = "checkout")]
#[command(about = "Drive the mini app credits checkout flow", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the credit packages on offer
    Packages,
    /// Create a payment session and print the payment link
    Pay {
        /// Billing email for the receipt
        #[arg(short, long)]
        email: String,

        /// Credit package to buy
        #[arg(long, default_value_t = 100)]
        credits: u32,

        /// Host user id (overrides config)
        #[arg(long)]
        user_id: Option<i64>,

        /// Host-signed session token (overrides config)
        #[arg(long)]
        init_data: Option<String>,
    },
    /// Check the status of a payment
    Status {
        /// Backend payment id from a previous `pay`
        payment_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("miniapp_checkout=info");

    let cli = Cli::parse();
    let config = loader::load_or_default(cli.config.as_deref())?;

    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    match cli.command {
        Commands::Packages => {
            let catalog = PackageCatalog::default();
            for package in catalog.packages() {
                println!("{:>5} credits  ${:.2}", package.credits, package.price_usd);
            }
        }
        Commands::Pay {
            email,
            credits,
            user_id,
            init_data,
        } => {
            let catalog = PackageCatalog::default();
            let package = catalog
                .find(credits)
                .ok_or_else(|| format!("no {} credit package; run `checkout packages`", credits))?;

            let session = SessionConfig {
                user_id: user_id.or(config.session.user_id),
                init_data: init_data.or_else(|| config.session.init_data.clone()),
            };

            let client = PaymentClient::new(config.api.base_url.parse()?, &config.timeouts)?;
            let mut form = CheckoutForm::new(catalog, session);
            form.select_package(package.credits, package.price_usd);
            form.set_email(&email);

            if !form.pay_enabled() {
                eprintln!("Error: `{}` is not a valid email address", email);
                return Ok(());
            }

            match form.submit(&client).await? {
                SubmitOutcome::Redirect {
                    payment_url,
                    payment_id,
                } => {
                    if let Some(id) = payment_id {
                        println!("Payment id: {}", id);
                    }
                    println!("Pay at: {}", payment_url);
                }
                SubmitOutcome::Failed { message } => {
                    eprintln!("Error: {}", message);
                }
            }
        }
        Commands::Status { payment_id } => {
            let client = PaymentClient::new(config.api.base_url.parse()?, &config.timeouts)?;
            match client.payment_status(&payment_id).await {
                Ok(status) => {
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    Ok(())
}
