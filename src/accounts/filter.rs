//! Search/type filtering of the account listing and whole-catalog totals

use super::SavingsAccount;
use serde::Serialize;

/// Account type value meaning "no type filter"
pub const ALL_ACCOUNT_TYPES: &str = "all";

/// Same meaning, as sent by the Spanish-language listing page
pub const ALL_ACCOUNT_TYPES_ES: &str = "todos";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    /// Matched against holder name (case-insensitive) or account number
    pub search: Option<String>,
    /// Exact account type; `None`, empty, "all" or "todos" disables
    pub account_type: Option<String>,
}

impl AccountFilter {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn type_term(&self) -> Option<&str> {
        self.account_type
            .as_deref()
            .filter(|t| !t.is_empty() && *t != ALL_ACCOUNT_TYPES && *t != ALL_ACCOUNT_TYPES_ES)
    }

    /// True if either filter narrows the listing
    pub fn is_active(&self) -> bool {
        self.search_term().is_some() || self.type_term().is_some()
    }

    pub fn matches(&self, account: &SavingsAccount) -> bool {
        if let Some(query) = self.search_term() {
            let by_name = account.holder_name.to_lowercase().contains(&query);
            let by_number = account.account_number.contains(&query);
            if !by_name && !by_number {
                return false;
            }
        }
        match self.type_term() {
            Some(t) => account.account_type == t,
            None => true,
        }
    }

    /// Matching accounts in catalog order
    pub fn apply<'a>(&self, accounts: &'a [SavingsAccount]) -> Vec<&'a SavingsAccount> {
        accounts.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Totals shown above the listing; always computed over the full catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_balance: f64,
    pub active_accounts: usize,
    pub total_accounts: usize,
    /// Mean annual rate in percent, `None` for an empty catalog
    pub average_interest_rate: Option<f64>,
    /// Distinct account types in first-seen order
    pub account_types: Vec<String>,
}

impl PortfolioSummary {
    pub fn from_accounts(accounts: &[SavingsAccount]) -> Self {
        let total_balance = accounts.iter().map(|a| a.balance).sum();
        let active_accounts = accounts.iter().filter(|a| a.is_active()).count();
        let average_interest_rate = if accounts.is_empty() {
            None
        } else {
            Some(accounts.iter().map(|a| a.interest_rate).sum::<f64>() / accounts.len() as f64)
        };

        let mut account_types: Vec<String> = Vec::new();
        for account in accounts {
            if !account_types.contains(&account.account_type) {
                account_types.push(account.account_type.clone());
            }
        }

        Self {
            total_balance,
            active_accounts,
            total_accounts: accounts.len(),
            average_interest_rate,
            account_types,
        }
    }
}
