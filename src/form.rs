//! Simulator form: raw user-entered strings to a validated `SimulationInput`

use crate::simulation::{
    Field, SimulationInput, SimulationLimits, ValidationError, ValidationErrorKind,
    ValidationErrors, DEFAULT_ANNUAL_RATE_PERCENT,
};
use serde::{Deserialize, Serialize};

/// The four simulator inputs exactly as typed.
///
/// Amounts may carry `,` thousands separators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationForm {
    #[serde(default)]
    pub principal: String,

    #[serde(default)]
    pub monthly_contribution: String,

    #[serde(default)]
    pub term_months: String,

    #[serde(default = "default_rate")]
    pub annual_rate_percent: String,
}

fn default_rate() -> String {
    DEFAULT_ANNUAL_RATE_PERCENT.to_string()
}

impl Default for SimulationForm {
    fn default() -> Self {
        Self {
            principal: String::new(),
            monthly_contribution: String::new(),
            term_months: String::new(),
            annual_rate_percent: default_rate(),
        }
    }
}

impl SimulationForm {
    pub fn new(
        principal: impl Into<String>,
        monthly_contribution: impl Into<String>,
        term_months: impl Into<String>,
        annual_rate_percent: impl Into<String>,
    ) -> Self {
        Self {
            principal: principal.into(),
            monthly_contribution: monthly_contribution.into(),
            term_months: term_months.into(),
            annual_rate_percent: annual_rate_percent.into(),
        }
    }

    /// Parse and range-check every field. Reports at most one error per field,
    /// in the order principal, contribution, term, rate.
    pub fn parse(&self, limits: &SimulationLimits) -> Result<SimulationInput, ValidationErrors> {
        let principal = parse_amount(Field::Principal, &self.principal)
            .and_then(|v| limits.check_principal(v));
        let contribution = parse_amount(Field::MonthlyContribution, &self.monthly_contribution)
            .and_then(|v| limits.check_contribution(v));
        let term = parse_term(&self.term_months).and_then(|v| limits.check_term(v));
        let rate = parse_rate(&self.annual_rate_percent).and_then(|v| limits.check_rate(v));

        match (principal, contribution, term, rate) {
            (Ok(principal), Ok(monthly_contribution), Ok(term_months), Ok(annual_rate_percent)) => {
                Ok(SimulationInput {
                    principal,
                    monthly_contribution,
                    term_months,
                    annual_rate_percent,
                })
            }
            (principal, contribution, term, rate) => {
                let mut errors = ValidationErrors::default();
                for e in [principal.err(), contribution.err(), term.err(), rate.err()]
                    .into_iter()
                    .flatten()
                {
                    errors.push(e);
                }
                Err(errors)
            }
        }
    }

    /// Regroup the amount fields with thousands separators, as the form does
    /// while the user types.
    pub fn normalize_amounts(&mut self) {
        self.principal = crate::format::format_number_input(&self.principal);
        self.monthly_contribution = crate::format::format_number_input(&self.monthly_contribution);
    }
}

fn required(field: Field, raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(field, ValidationErrorKind::Required))
    } else {
        Ok(trimmed)
    }
}

fn parse_amount(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value = required(field, raw)?;
    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ValidationError::new(field, ValidationErrorKind::Invalid))
}

fn parse_term(raw: &str) -> Result<i64, ValidationError> {
    let value = required(Field::TermMonths, raw)?;
    match value.parse::<i64>() {
        Ok(months) => Ok(months),
        // All-digit input too large for i64 is still just "too long"
        Err(_) if value.bytes().all(|b| b.is_ascii_digit()) => Ok(i64::MAX),
        Err(_) => Err(ValidationError::new(Field::TermMonths, ValidationErrorKind::Invalid)),
    }
}

fn parse_rate(raw: &str) -> Result<f64, ValidationError> {
    let value = required(Field::AnnualRatePercent, raw)?;
    value
        .parse::<f64>()
        .map_err(|_| ValidationError::new(Field::AnnualRatePercent, ValidationErrorKind::Invalid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> SimulationLimits {
        SimulationLimits::default()
    }

    #[test]
    fn test_parse_with_separators() {
        let form = SimulationForm::new("1,000,000", "100,000", "12", "5");
        let input = form.parse(&limits()).unwrap();

        assert_eq!(input.principal, 1_000_000.0);
        assert_eq!(input.monthly_contribution, 100_000.0);
        assert_eq!(input.term_months, 12);
        assert_eq!(input.annual_rate_percent, 5.0);
    }

    #[test]
    fn test_default_form_requires_fields() {
        let form = SimulationForm::default();
        assert_eq!(form.annual_rate_percent, "5");

        let errors = form.parse(&limits()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![Field::Principal, Field::MonthlyContribution, Field::TermMonths]
        );
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::Required));
        assert_eq!(errors.get(Field::Principal).unwrap().message, "initial amount is required");
        assert_eq!(errors.get(Field::TermMonths).unwrap().message, "term is required");
    }

    #[test]
    fn test_invalid_values() {
        let form = SimulationForm::new("abc", "-5", "1.5", "x");
        let errors = form.parse(&limits()).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::Invalid));
        assert_eq!(errors.get(Field::Principal).unwrap().message, "enter a valid amount");
        assert_eq!(errors.get(Field::TermMonths).unwrap().message, "enter a valid term");
    }

    #[test]
    fn test_boundaries() {
        let errors = SimulationForm::new("9,999", "0", "601", "50.1")
            .parse(&limits())
            .unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![Field::Principal, Field::TermMonths, Field::AnnualRatePercent]
        );
        assert!(errors.get(Field::Principal).unwrap().message.contains("minimum amount"));
    }

    #[test]
    fn test_term_zero_and_huge() {
        let zero = SimulationForm::new("10000", "0", "0", "5").parse(&limits()).unwrap_err();
        assert_eq!(zero.get(Field::TermMonths).unwrap().kind, ValidationErrorKind::Invalid);

        let huge = SimulationForm::new("10000", "0", "99999999999999999999", "5")
            .parse(&limits())
            .unwrap_err();
        assert_eq!(
            huge.get(Field::TermMonths).unwrap().kind,
            ValidationErrorKind::TermTooLong(600)
        );
    }

    #[test]
    fn test_json_missing_rate_uses_default() {
        let form: SimulationForm =
            serde_json::from_str(r#"{"principal": "50,000", "monthly_contribution": "0", "term_months": "6"}"#)
                .unwrap();
        assert_eq!(form.annual_rate_percent, "5");
        assert!(form.parse(&limits()).is_ok());
    }

    #[test]
    fn test_normalize_amounts() {
        let mut form = SimulationForm::new("1000000", "25000x", "12", "5");
        form.normalize_amounts();
        assert_eq!(form.principal, "1,000,000");
        assert_eq!(form.monthly_contribution, "25,000");
    }
}
