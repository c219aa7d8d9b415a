//! Loan-to-value risk banding

use serde::Serialize;

use crate::config::LtvBands;
use crate::error::{Result, ValidationError};
use crate::inputs::LtvParams;

/// Risk band of a loan-to-value ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LtvRisk {
    /// Comfortably financed
    Low,
    /// Within standard bank lending
    Moderate,
    /// At the edge of bank financing
    High,
    /// Beyond what banks normally lend
    Excessive,
}

impl LtvRisk {
    pub fn description(&self) -> &'static str {
        match self {
            LtvRisk::Low => "excellent (low risk)",
            LtvRisk::Moderate => "reasonable (bank standard)",
            LtvRisk::High => "high (bank financing limit)",
            LtvRisk::Excessive => "very risky (over the limit)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LtvAssessment {
    /// Outstanding loans as a percentage of asset value
    pub ltv_pct: f64,
    pub risk: LtvRisk,
}

/// Classify outstanding loans against the asset they are secured on
pub fn assess_ltv(params: &LtvParams, bands: &LtvBands) -> Result<LtvAssessment> {
    if params.asset_value <= 0.0 {
        return Err(ValidationError::NonPositiveAssetValue);
    }

    let ltv_pct = params.outstanding_loans / params.asset_value * 100.0;
    let risk = if ltv_pct < bands.low {
        LtvRisk::Low
    } else if ltv_pct < bands.moderate {
        LtvRisk::Moderate
    } else if ltv_pct < bands.high {
        LtvRisk::High
    } else {
        LtvRisk::Excessive
    };

    Ok(LtvAssessment { ltv_pct, risk })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(asset_value: f64, outstanding_loans: f64) -> Result<LtvAssessment> {
        assess_ltv(
            &LtvParams {
                asset_value,
                outstanding_loans,
            },
            &LtvBands::default(),
        )
    }

    #[test]
    fn test_bands() {
        assert_eq!(assess(1_000_000.0, 300_000.0).unwrap().risk, LtvRisk::Low);
        assert_eq!(assess(1_000_000.0, 450_000.0).unwrap().risk, LtvRisk::Moderate);
        assert_eq!(assess(1_000_000.0, 700_000.0).unwrap().risk, LtvRisk::High);
        assert_eq!(assess(1_000_000.0, 750_000.0).unwrap().risk, LtvRisk::Excessive);
    }

    #[test]
    fn test_ratio() {
        let assessment = assess(800_000.0, 200_000.0).unwrap();
        assert_eq!(assessment.ltv_pct, 25.0);
    }

    #[test]
    fn test_zero_asset_rejected() {
        assert_eq!(assess(0.0, 100.0), Err(ValidationError::NonPositiveAssetValue));
    }
}
