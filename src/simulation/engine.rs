//! Month-by-month compounding of a savings balance

use super::{MonthlyEntry, SimulationInput, SimulationLimits, SimulationResult, ValidationErrors};
use log::debug;

/// Validates inputs against its limits and projects the monthly schedule
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    limits: SimulationLimits,
}

impl ProjectionEngine {
    pub fn new(limits: SimulationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SimulationLimits {
        &self.limits
    }

    /// Validate `input` and, if every field passes, project the full term.
    /// Nothing is computed when any field is invalid.
    pub fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult, ValidationErrors> {
        input.validate(&self.limits)?;
        Ok(self.project(input))
    }

    /// Each month accrues interest on the balance carried from the previous
    /// month, then adds that interest and the contribution together. Must stay
    /// iterative; the closed-form annuity formula drifts from these balances.
    fn project(&self, input: &SimulationInput) -> SimulationResult {
        let monthly_rate = input.monthly_rate();
        let contribution = input.monthly_contribution;

        debug!(
            "Projecting principal={:.2} contribution={:.2} term={} monthly_rate={:.8}",
            input.principal, contribution, input.term_months, monthly_rate
        );

        let mut entries = Vec::with_capacity(input.term_months as usize);
        let mut balance = input.principal;

        for month in 1..=input.term_months {
            let interest = balance * monthly_rate;
            balance = balance + interest + contribution;

            entries.push(MonthlyEntry {
                month,
                balance,
                interest,
                contribution,
            });
        }

        let total_contributed = input.principal + contribution * f64::from(input.term_months);
        let result = SimulationResult {
            final_balance: balance,
            total_contributed,
            total_interest: balance - total_contributed,
            entries,
        };

        debug!(
            "Projection complete: final_balance={:.2} total_interest={:.2}",
            result.final_balance, result.total_interest
        );

        result
    }
}
