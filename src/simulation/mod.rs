//! Projection engine for savings simulations

mod input;
mod engine;
mod results;
pub mod batch;

pub use input::{Field, SimulationInput, SimulationLimits, ValidationError, ValidationErrorKind, ValidationErrors};
pub use engine::ProjectionEngine;
pub use results::{MonthlyEntry, SimulationResult};
pub use batch::{run_batch, load_scenarios, load_scenarios_from_reader};

// ============================================================================
// Default Simulation Bounds
// ============================================================================
// Amounts are in Colombian pesos (COP). Rates are annual percentages that
// compound monthly at rate / 100 / 12.

/// Smallest initial deposit accepted ($10,000 COP)
pub const MIN_PRINCIPAL: f64 = 10_000.0;

/// Largest initial deposit accepted ($1,000,000,000 COP)
pub const MAX_PRINCIPAL: f64 = 1_000_000_000.0;

/// Largest monthly contribution accepted ($100,000,000 COP)
pub const MAX_MONTHLY_CONTRIBUTION: f64 = 100_000_000.0;

/// Longest term in months (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// Highest annual rate in percent
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 50.0;

/// Annual rate pre-filled in the simulator form (5%)
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 5.0;
