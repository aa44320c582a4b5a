//! Savings account records, listing filters and portfolio summary

mod filter;

pub use filter::{AccountFilter, PortfolioSummary, ALL_ACCOUNT_TYPES, ALL_ACCOUNT_TYPES_ES};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Badge tier derived from the account type name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    Vip,
    Premium,
    Standard,
}

impl AccountTier {
    pub fn label(&self) -> &'static str {
        match self {
            AccountTier::Vip => "VIP",
            AccountTier::Premium => "Premium",
            AccountTier::Standard => "Standard",
        }
    }
}

/// An account as shown in the listing: its record plus the derived tier
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountListing<'a> {
    #[serde(flatten)]
    pub account: &'a SavingsAccount,
    pub tier: AccountTier,
}

/// A savings account as listed in the account catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: String,
    pub account_number: String,
    pub holder_name: String,
    pub balance: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub open_date: NaiveDate,
    pub account_type: String,
    pub status: AccountStatus,
    pub currency: String,
}

impl SavingsAccount {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn listing(&self) -> AccountListing<'_> {
        AccountListing { account: self, tier: self.tier() }
    }

    pub fn tier(&self) -> AccountTier {
        if self.account_type.contains("VIP") {
            AccountTier::Vip
        } else if self.account_type.contains("Premium") {
            AccountTier::Premium
        } else {
            AccountTier::Standard
        }
    }
}

/// Catalog document: `{"accounts": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCatalog {
    pub accounts: Vec<SavingsAccount>,
}

impl AccountCatalog {
    pub fn from_reader<R: Read>(reader: R) -> crate::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn filter(&self, filter: &AccountFilter) -> Vec<&SavingsAccount> {
        filter.apply(&self.accounts)
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_accounts(&self.accounts)
    }
}

/// "ahorro" -> "Ahorro", for type labels in listings
pub fn capitalize_type(account_type: &str) -> String {
    let mut chars = account_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
