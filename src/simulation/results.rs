//! Projection output: monthly schedule and totals

use serde::{Deserialize, Serialize};
use std::io::Write;

/// One month of the projected schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    /// Month index, 1-based
    pub month: u32,
    /// Balance after this month's interest and contribution
    pub balance: f64,
    /// Interest accrued on the balance carried into this month
    pub interest: f64,
    /// Contribution added this month
    pub contribution: f64,
}

/// Full result of a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub final_balance: f64,
    /// Principal plus every monthly contribution
    pub total_contributed: f64,
    /// Final balance minus total contributed
    pub total_interest: f64,
    pub entries: Vec<MonthlyEntry>,
}

impl SimulationResult {
    /// Sum of monthly interest amounts; matches `total_interest` up to rounding
    pub fn accrued_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.interest).sum()
    }

    /// Interest earned as a percentage of everything contributed
    pub fn gain_percent(&self) -> f64 {
        if self.total_contributed > 0.0 {
            self.total_interest / self.total_contributed * 100.0
        } else {
            0.0
        }
    }

    /// Write the monthly schedule as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> crate::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> SimulationResult {
        SimulationResult {
            final_balance: 12_211.0,
            total_contributed: 12_000.0,
            total_interest: 211.0,
            entries: vec![
                MonthlyEntry { month: 1, balance: 11_100.0, interest: 100.0, contribution: 1_000.0 },
                MonthlyEntry { month: 2, balance: 12_211.0, interest: 111.0, contribution: 1_000.0 },
            ],
        }
    }

    #[test]
    fn test_gain_percent() {
        let result = sample();
        assert_relative_eq!(result.gain_percent(), 211.0 / 12_000.0 * 100.0);

        let empty = SimulationResult {
            final_balance: 0.0,
            total_contributed: 0.0,
            total_interest: 0.0,
            entries: Vec::new(),
        };
        assert_eq!(empty.gain_percent(), 0.0);
    }

    #[test]
    fn test_accrued_interest() {
        assert_eq!(sample().accrued_interest(), 211.0);
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month,balance,interest,contribution");
        assert_eq!(lines[1], "1,11100.0,100.0,1000.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["final_balance"], 12_211.0);
        assert_eq!(json["entries"][1]["month"], 2);
        assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    }
}
