//! Credit package catalog and pricing.

use serde::{Deserialize, Serialize};

/// Flat storefront rate: one credit costs five cents.
pub const USD_PER_CREDIT: f64 = 0.05;

/// Tolerance when checking a quoted amount against the catalog rate.
pub const PRICE_TOLERANCE_USD: f64 = 0.01;

/// A purchasable block of credits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditPackage {
    /// Credits granted on successful payment.
    pub credits: u32,
    /// Price in USD.
    pub price_usd: f64,
}

impl CreditPackage {
    pub fn new(credits: u32, price_usd: f64) -> Self {
        Self { credits, price_usd }
    }
}

/// The fixed set of packages the storefront offers.
#[derive(Debug, Clone)]
pub struct PackageCatalog {
    packages: Vec<CreditPackage>,
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self {
            packages: vec![
                CreditPackage::new(100, 5.0),
                CreditPackage::new(200, 10.0),
                CreditPackage::new(500, 25.0),
                CreditPackage::new(1000, 50.0),
            ],
        }
    }
}

impl PackageCatalog {
    /// All packages on offer, in display order.
    pub fn packages(&self) -> &[CreditPackage] {
        &self.packages
    }

    /// The pre-selected package shown when the form first renders.
    pub fn default_package(&self) -> Option<CreditPackage> {
        self.packages.first().copied()
    }

    /// Look up a package by its credit amount.
    pub fn find(&self, credits: u32) -> Option<CreditPackage> {
        self.packages.iter().copied().find(|p| p.credits == credits)
    }

    /// Price for an arbitrary credit amount at the flat rate.
    pub fn price_for(credits: u32) -> f64 {
        f64::from(credits) * USD_PER_CREDIT
    }

    /// Whether a quoted amount is consistent with the flat rate.
    ///
    /// The backend rejects mismatched pairs; checking here avoids a doomed
    /// request.
    pub fn price_matches(credits: u32, amount: f64) -> bool {
        (amount - Self::price_for(credits)).abs() <= PRICE_TOLERANCE_USD
    }
}
