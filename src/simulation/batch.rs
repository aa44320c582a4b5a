//! Scenario batches: load inputs from CSV and project them in parallel

use super::{ProjectionEngine, SimulationInput, SimulationResult, ValidationErrors};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

/// Load scenarios from CSV with columns
/// `principal,monthly_contribution,term_months,annual_rate_percent`
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> crate::Result<Vec<SimulationInput>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut scenarios = Vec::new();
    for record in rdr.deserialize() {
        scenarios.push(record?);
    }
    Ok(scenarios)
}

pub fn load_scenarios<P: AsRef<Path>>(path: P) -> crate::Result<Vec<SimulationInput>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Project every scenario independently; results keep input order
pub fn run_batch(
    engine: &ProjectionEngine,
    scenarios: &[SimulationInput],
) -> Vec<Result<SimulationResult, ValidationErrors>> {
    let start = Instant::now();
    let results: Vec<_> = scenarios
        .par_iter()
        .map(|input| engine.simulate(input))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        "Projected {} scenarios ({} rejected) in {:?}",
        scenarios.len(),
        failed,
        start.elapsed()
    );
    results
}

/// One line of the batch summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummaryRow {
    pub scenario: usize,
    pub principal: f64,
    pub monthly_contribution: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
    pub final_balance: Option<f64>,
    pub total_contributed: Option<f64>,
    pub total_interest: Option<f64>,
    pub error: Option<String>,
}

impl BatchSummaryRow {
    pub fn new(
        scenario: usize,
        input: &SimulationInput,
        outcome: &Result<SimulationResult, ValidationErrors>,
    ) -> Self {
        let (final_balance, total_contributed, total_interest, error) = match outcome {
            Ok(r) => (Some(r.final_balance), Some(r.total_contributed), Some(r.total_interest), None),
            Err(e) => (None, None, None, Some(e.to_string())),
        };
        Self {
            scenario,
            principal: input.principal,
            monthly_contribution: input.monthly_contribution,
            term_months: input.term_months,
            annual_rate_percent: input.annual_rate_percent,
            final_balance,
            total_contributed,
            total_interest,
            error,
        }
    }
}

/// Write one summary row per scenario (1-based scenario numbers)
pub fn write_batch_summary<W: Write>(
    writer: W,
    scenarios: &[SimulationInput],
    results: &[Result<SimulationResult, ValidationErrors>],
) -> crate::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, (input, outcome)) in scenarios.iter().zip(results).enumerate() {
        wtr.serialize(BatchSummaryRow::new(i + 1, input, outcome))?;
    }
    wtr.flush()?;
    Ok(())
}
