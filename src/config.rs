//! Simulation configuration shared by all calculators
//!
//! Defaults reproduce the reference calculator page. A JSON file can override
//! any subset of fields.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loans up to this many months get one chart sample per month
pub const DEFAULT_MONTHLY_SAMPLE_THRESHOLD: u32 = 36;

/// Refinance break-even beyond this is flagged as borderline
pub const DEFAULT_BREAK_EVEN_BORDERLINE_MONTHS: f64 = 60.0;

/// Configuration for simulator instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Loans of at most this many months are sampled monthly, longer ones yearly
    pub monthly_sample_threshold_months: u32,

    /// Refinance break-even horizon considered borderline
    pub break_even_borderline_months: f64,

    /// LTV risk band upper limits (percent)
    pub ltv_bands: LtvBands,
}

/// Upper limits (exclusive, percent) of the LTV risk bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtvBands {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl Default for LtvBands {
    fn default() -> Self {
        Self {
            low: 45.0,
            moderate: 60.0,
            high: 75.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            monthly_sample_threshold_months: DEFAULT_MONTHLY_SAMPLE_THRESHOLD,
            break_even_borderline_months: DEFAULT_BREAK_EVEN_BORDERLINE_MONTHS,
            ltv_bands: LtvBands::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"break_even_borderline_months": 48}"#).unwrap();

        assert_eq!(config.break_even_borderline_months, 48.0);
        assert_eq!(config.monthly_sample_threshold_months, 36);
        assert_eq!(config.ltv_bands, LtvBands::default());
    }
}
