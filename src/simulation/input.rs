//! Simulation inputs, configurable bounds and field-level validation

use super::{
    MAX_ANNUAL_RATE_PERCENT, MAX_MONTHLY_CONTRIBUTION, MAX_PRINCIPAL, MAX_TERM_MONTHS,
    MIN_PRINCIPAL,
};
use crate::format::{describe_term, format_amount_label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Scalar inputs for one projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Initial deposit
    pub principal: f64,
    /// Amount added at the end of every month
    pub monthly_contribution: f64,
    /// Number of months to project
    pub term_months: u32,
    /// Annual interest rate in percent (5.0 = 5%)
    pub annual_rate_percent: f64,
}

impl SimulationInput {
    /// Monthly rate as a fraction: annual percent / 100 / 12
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Check every field against `limits`, collecting one error per invalid field
    pub fn validate(&self, limits: &SimulationLimits) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Err(e) = limits.check_principal(self.principal) {
            errors.push(e);
        }
        if let Err(e) = limits.check_contribution(self.monthly_contribution) {
            errors.push(e);
        }
        if let Err(e) = limits.check_term(i64::from(self.term_months)) {
            errors.push(e);
        }
        if let Err(e) = limits.check_rate(self.annual_rate_percent) {
            errors.push(e);
        }

        errors.into_result(())
    }
}

/// Inclusive bounds applied before any projection runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationLimits {
    #[serde(default = "default_min_principal")]
    pub min_principal: f64,

    #[serde(default = "default_max_principal")]
    pub max_principal: f64,

    #[serde(default = "default_max_contribution")]
    pub max_monthly_contribution: f64,

    #[serde(default = "default_max_term")]
    pub max_term_months: u32,

    #[serde(default = "default_max_rate")]
    pub max_annual_rate_percent: f64,
}

fn default_min_principal() -> f64 { MIN_PRINCIPAL }
fn default_max_principal() -> f64 { MAX_PRINCIPAL }
fn default_max_contribution() -> f64 { MAX_MONTHLY_CONTRIBUTION }
fn default_max_term() -> u32 { MAX_TERM_MONTHS }
fn default_max_rate() -> f64 { MAX_ANNUAL_RATE_PERCENT }

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            min_principal: MIN_PRINCIPAL,
            max_principal: MAX_PRINCIPAL,
            max_monthly_contribution: MAX_MONTHLY_CONTRIBUTION,
            max_term_months: MAX_TERM_MONTHS,
            max_annual_rate_percent: MAX_ANNUAL_RATE_PERCENT,
        }
    }
}

impl SimulationLimits {
    /// Load limits from a JSON document; missing keys keep their defaults.
    /// The result is checked with [`SimulationLimits::validate`].
    pub fn from_reader<R: Read>(reader: R) -> crate::Result<Self> {
        let limits: Self = serde_json::from_reader(reader)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Bounds must be finite and non-negative, the principal range must not be
    /// inverted, and the term must stay within 1..=MAX_TERM_MONTHS.
    pub fn validate(&self) -> crate::Result<()> {
        let amounts = [
            ("min_principal", self.min_principal),
            ("max_principal", self.max_principal),
            ("max_monthly_contribution", self.max_monthly_contribution),
            ("max_annual_rate_percent", self.max_annual_rate_percent),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_limit(
                    field,
                    format!("must be a finite non-negative number, got {}", value),
                ));
            }
        }
        if self.min_principal > self.max_principal {
            return Err(invalid_limit(
                "min_principal",
                format!("{} exceeds max_principal {}", self.min_principal, self.max_principal),
            ));
        }
        if self.max_term_months == 0 || self.max_term_months > MAX_TERM_MONTHS {
            return Err(invalid_limit(
                "max_term_months",
                format!("must be between 1 and {}, got {}", MAX_TERM_MONTHS, self.max_term_months),
            ));
        }
        Ok(())
    }

    /// Load limits from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn check_principal(&self, value: f64) -> Result<f64, ValidationError> {
        let field = Field::Principal;
        if value.is_nan() || value < 0.0 {
            Err(ValidationError::new(field, ValidationErrorKind::Invalid))
        } else if value < self.min_principal {
            Err(ValidationError::new(field, ValidationErrorKind::BelowMinimum(self.min_principal)))
        } else if value > self.max_principal {
            Err(ValidationError::new(field, ValidationErrorKind::AboveMaximum(self.max_principal)))
        } else {
            Ok(value)
        }
    }

    pub fn check_contribution(&self, value: f64) -> Result<f64, ValidationError> {
        let field = Field::MonthlyContribution;
        if value.is_nan() || value < 0.0 {
            Err(ValidationError::new(field, ValidationErrorKind::Invalid))
        } else if value > self.max_monthly_contribution {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::AboveMaximum(self.max_monthly_contribution),
            ))
        } else {
            Ok(value)
        }
    }

    /// Takes a signed count so form input like "-3" or "0" reports `Invalid`
    /// rather than wrapping.
    pub fn check_term(&self, months: i64) -> Result<u32, ValidationError> {
        let field = Field::TermMonths;
        if months < 1 {
            Err(ValidationError::new(field, ValidationErrorKind::Invalid))
        } else if months > i64::from(self.max_term_months) {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::TermTooLong(self.max_term_months),
            ))
        } else {
            // Bounded by max_term_months above
            Ok(months as u32)
        }
    }

    pub fn check_rate(&self, value: f64) -> Result<f64, ValidationError> {
        let field = Field::AnnualRatePercent;
        if value.is_nan() || value < 0.0 {
            Err(ValidationError::new(field, ValidationErrorKind::Invalid))
        } else if value > self.max_annual_rate_percent {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::AboveMaximum(self.max_annual_rate_percent),
            ))
        } else {
            Ok(value)
        }
    }
}

fn invalid_limit(field: &'static str, reason: String) -> crate::Error {
    crate::Error::InvalidLimits { field, reason }
}

/// Simulation input fields, ordered the way they are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Principal,
    MonthlyContribution,
    TermMonths,
    AnnualRatePercent,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Principal,
        Field::MonthlyContribution,
        Field::TermMonths,
        Field::AnnualRatePercent,
    ];

    /// Machine name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Principal => "principal",
            Field::MonthlyContribution => "monthly_contribution",
            Field::TermMonths => "term_months",
            Field::AnnualRatePercent => "annual_rate_percent",
        }
    }

    /// Human label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Principal => "initial amount",
            Field::MonthlyContribution => "monthly contribution",
            Field::TermMonths => "term",
            Field::AnnualRatePercent => "interest rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which check a field failed; bounds carry the configured limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationErrorKind {
    Required,
    Invalid,
    BelowMinimum(f64),
    AboveMaximum(f64),
    /// Term longer than the configured maximum number of months
    TermTooLong(u32),
}

/// A single invalid field and the message shown next to it
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        let message = describe(field, kind);
        Self { field, kind, message }
    }
}

fn describe(field: Field, kind: ValidationErrorKind) -> String {
    match kind {
        ValidationErrorKind::Required => format!("{} is required", field.label()),
        ValidationErrorKind::Invalid => match field {
            Field::Principal | Field::MonthlyContribution => "enter a valid amount".to_string(),
            Field::TermMonths => "enter a valid term".to_string(),
            Field::AnnualRatePercent => "enter a valid rate".to_string(),
        },
        ValidationErrorKind::BelowMinimum(min) => {
            format!("the minimum amount is {} COP", format_amount_label(min))
        }
        ValidationErrorKind::AboveMaximum(max) => match field {
            Field::Principal => format!("the maximum amount is {} COP", format_amount_label(max)),
            Field::MonthlyContribution => {
                format!("the maximum contribution is {} COP", format_amount_label(max))
            }
            Field::TermMonths => format!("the maximum term is {} months", max),
            Field::AnnualRatePercent => format!("the maximum rate is {}% per year", max),
        },
        ValidationErrorKind::TermTooLong(months) => {
            if months % 12 == 0 {
                format!("the maximum term is {} months ({} years)", months, months / 12)
            } else {
                format!("the maximum term is {} months ({})", months, describe_term(months))
            }
        }
    }
}

/// All field errors from one validation pass, in validation order
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("invalid simulation input: {}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Error recorded for `field`, if any
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Fields that failed, in validation order
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Field -> message map for display next to form inputs
    pub fn to_map(&self) -> BTreeMap<Field, String> {
        self.errors
            .iter()
            .map(|e| (e.field, e.message.clone()))
            .collect()
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SimulationInput {
        SimulationInput {
            principal: 1_000_000.0,
            monthly_contribution: 100_000.0,
            term_months: 12,
            annual_rate_percent: 5.0,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate(&SimulationLimits::default()).is_ok());
    }

    #[test]
    fn test_principal_below_minimum() {
        let input = SimulationInput { principal: 9_999.0, ..valid_input() };
        let errors = input.validate(&SimulationLimits::default()).unwrap_err();

        assert_eq!(errors.fields(), vec![Field::Principal]);
        let err = errors.get(Field::Principal).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::BelowMinimum(10_000.0));
        assert!(err.message.contains("minimum amount"));
        assert_eq!(err.message, "the minimum amount is $10,000 COP");
    }

    #[test]
    fn test_principal_bounds_are_inclusive() {
        let limits = SimulationLimits::default();
        assert!(limits.check_principal(10_000.0).is_ok());
        assert!(limits.check_principal(1_000_000_000.0).is_ok());

        let err = limits.check_principal(1_000_000_001.0).unwrap_err();
        assert_eq!(err.message, "the maximum amount is $1,000,000,000 COP");
    }

    #[test]
    fn test_negative_and_nan_are_invalid() {
        let limits = SimulationLimits::default();
        assert_eq!(limits.check_principal(-1.0).unwrap_err().kind, ValidationErrorKind::Invalid);
        assert_eq!(limits.check_contribution(f64::NAN).unwrap_err().kind, ValidationErrorKind::Invalid);
        assert_eq!(limits.check_rate(-0.5).unwrap_err().message, "enter a valid rate");
    }

    #[test]
    fn test_term_bounds() {
        let limits = SimulationLimits::default();
        assert_eq!(limits.check_term(1).unwrap(), 1);
        assert_eq!(limits.check_term(600).unwrap(), 600);
        assert_eq!(limits.check_term(0).unwrap_err().kind, ValidationErrorKind::Invalid);

        let err = limits.check_term(601).unwrap_err();
        assert_eq!(err.field, Field::TermMonths);
        assert_eq!(err.message, "the maximum term is 600 months (50 years)");
    }

    #[test]
    fn test_rate_above_maximum() {
        let input = SimulationInput { annual_rate_percent: 50.1, ..valid_input() };
        let errors = input.validate(&SimulationLimits::default()).unwrap_err();

        assert_eq!(errors.fields(), vec![Field::AnnualRatePercent]);
        assert_eq!(
            errors.get(Field::AnnualRatePercent).unwrap().message,
            "the maximum rate is 50% per year"
        );
        // Zero rate is allowed
        let zero = SimulationInput { annual_rate_percent: 0.0, ..valid_input() };
        assert!(zero.validate(&SimulationLimits::default()).is_ok());
    }

    #[test]
    fn test_errors_follow_field_order() {
        let input = SimulationInput {
            principal: 5.0,
            monthly_contribution: 200_000_000.0,
            term_months: 0,
            annual_rate_percent: 75.0,
        };
        let errors = input.validate(&SimulationLimits::default()).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.fields(), Field::ALL.to_vec());

        let map = errors.to_map();
        assert_eq!(map[&Field::MonthlyContribution], "the maximum contribution is $100,000,000 COP");
        assert_eq!(map[&Field::TermMonths], "enter a valid term");
    }

    #[test]
    fn test_custom_limits_in_messages() {
        let limits = SimulationLimits {
            min_principal: 50_000.0,
            max_term_months: 30,
            ..Default::default()
        };
        assert_eq!(
            limits.check_principal(20_000.0).unwrap_err().message,
            "the minimum amount is $50,000 COP"
        );
        assert_eq!(
            limits.check_term(31).unwrap_err().message,
            "the maximum term is 30 months (2 years and 6 months)"
        );
    }

    #[test]
    fn test_limits_json_defaults() {
        let limits = SimulationLimits::from_reader(r#"{"max_term_months": 120}"#.as_bytes()).unwrap();
        assert_eq!(limits.max_term_months, 120);
        assert_eq!(limits.min_principal, MIN_PRINCIPAL);
        assert_eq!(limits.max_annual_rate_percent, MAX_ANNUAL_RATE_PERCENT);
    }

    fn limits_error(json: &str) -> (&'static str, String) {
        match SimulationLimits::from_reader(json.as_bytes()) {
            Err(crate::Error::InvalidLimits { field, reason }) => (field, reason),
            other => panic!("expected InvalidLimits, got {:?}", other),
        }
    }

    #[test]
    fn test_limits_inverted_principal_range() {
        let (field, reason) = limits_error(r#"{"min_principal": 20000, "max_principal": 100}"#);
        assert_eq!(field, "min_principal");
        assert!(reason.contains("exceeds max_principal"));
    }

    #[test]
    fn test_limits_term_out_of_range() {
        let (field, _) = limits_error(r#"{"max_term_months": 4000000000}"#);
        assert_eq!(field, "max_term_months");

        let (field, _) = limits_error(r#"{"max_term_months": 601}"#);
        assert_eq!(field, "max_term_months");

        let (field, _) = limits_error(r#"{"max_term_months": 0}"#);
        assert_eq!(field, "max_term_months");
    }

    #[test]
    fn test_limits_negative_bounds() {
        let (field, _) = limits_error(r#"{"max_monthly_contribution": -1}"#);
        assert_eq!(field, "max_monthly_contribution");

        let (field, _) = limits_error(r#"{"min_principal": -10}"#);
        assert_eq!(field, "min_principal");
    }

    #[test]
    fn test_limits_non_finite_bounds() {
        // JSON has no NaN/inf literals, so build the struct directly
        let limits = SimulationLimits { max_annual_rate_percent: f64::NAN, ..Default::default() };
        assert!(matches!(
            limits.validate(),
            Err(crate::Error::InvalidLimits { field: "max_annual_rate_percent", .. })
        ));

        let limits = SimulationLimits { max_principal: f64::INFINITY, ..Default::default() };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_limits_malformed_json() {
        assert!(matches!(
            SimulationLimits::from_reader(r#"{"max_term_months": "lots"}"#.as_bytes()),
            Err(crate::Error::Json(_))
        ));
        assert!(SimulationLimits::default().validate().is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(Field::MonthlyContribution, ValidationErrorKind::Required);
        assert_eq!(err.to_string(), "monthly_contribution: monthly contribution is required");

        let errors = ValidationErrors::from(err);
        assert_eq!(
            errors.to_string(),
            "invalid simulation input: monthly_contribution: monthly contribution is required"
        );
    }
}
