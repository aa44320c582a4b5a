//! Savings account simulator
//!
//! Month-by-month compound-interest projections for a savings product with an
//! initial deposit and fixed monthly contributions, the string-level form
//! handling that feeds them, and filtering/summary helpers for the savings
//! account listing.

pub mod accounts;
pub mod error;
pub mod form;
pub mod format;
pub mod simulation;

pub use error::{Error, Result};
pub use form::SimulationForm;
pub use simulation::{
    Field, MonthlyEntry, ProjectionEngine, SimulationInput, SimulationLimits, SimulationResult,
    ValidationError, ValidationErrors,
};
