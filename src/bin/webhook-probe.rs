//! Manual diagnostics for the payment webhook endpoint.
//!
//! `send` posts one synthetic payment-success event at the configured
//! endpoint; `scan` looks through a page for testing controls and known API
//! endpoint references.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use miniapp_checkout::config::loader;
use miniapp_checkout::diagnostics::{scan_api_endpoints, scan_test_controls, WebhookSender};
use miniapp_checkout::observability::logging;

#[derive(Parser)]
#[command(name = "webhook-probe")]
#[command(about = "Diagnostics for the payment webhook endpoint", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a synthetic payment webhook to the configured endpoint
    Send {
        /// Override the endpoint URL from config
        #[arg(long)]
        url: Option<String>,
    },
    /// Scan a page for test controls and known API endpoint patterns
    Scan {
        /// Local file path or http(s) URL of the page
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("webhook_probe=info,miniapp_checkout=info");

    let cli = Cli::parse();
    let mut config = loader::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Send { url } => {
            if let Some(url) = url {
                config.webhook.url = url;
            }
            let sender = WebhookSender::new(&config.webhook, &config.timeouts)?;
            let report = sender.send_test_webhook().await?;

            if report.accepted() {
                println!("Webhook delivered ({})", report.status);
            } else {
                println!("Endpoint rejected delivery: {}", report.status);
            }
            if !report.body.is_empty() {
                println!("Response: {}", report.body);
            }
        }
        Commands::Scan { source } => {
            let markup = read_page(&source).await?;

            let controls = scan_test_controls(&markup);
            if controls.is_empty() {
                println!("No test controls found.");
                println!("Look manually under Webhooks, API / Settings, or Developer Tools.");
            } else {
                println!("Found {} candidate control(s):", controls.len());
                for (i, control) in controls.iter().enumerate() {
                    println!("{:>3}. [{}] \"{}\"", i + 1, control.tag, control.text);
                }
            }

            let endpoints = scan_api_endpoints(&markup);
            if endpoints.is_empty() {
                println!("No known API endpoint patterns in page scripts.");
            } else {
                println!("Endpoint references:");
                for hit in &endpoints {
                    println!("  {}", hit.matched);
                }
            }
        }
    }

    Ok(())
}

/// Fetch `source` over HTTP when it looks like a URL, otherwise read a file.
async fn read_page(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("page fetch returned status {}", status).into());
        }
        Ok(response.text().await?)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
