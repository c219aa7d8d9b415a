//! Validation errors raised before any simulation state is built

use thiserror::Error;

/// Rejected parameter records
///
/// Only a handful of inputs are validated; every other malformed number is
/// coerced to zero when the record is parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Term used as a divisor was zero or negative
    #[error("term must be greater than zero (got {years} years)")]
    NonPositiveTerm { years: f64 },

    /// Term beyond the longest horizon a run will simulate
    #[error("term of {years} years exceeds the {max_years}-year maximum")]
    TermTooLong { years: f64, max_years: f64 },

    /// Balloon slice larger than the whole loan
    #[error("balloon principal {balloon} exceeds total principal {principal}")]
    BalloonExceedsPrincipal { balloon: f64, principal: f64 },

    /// Refinance called without a single usable existing loan
    #[error("no valid existing loan data")]
    NoValidLoans,

    /// LTV needs a positive asset value
    #[error("asset value must be greater than zero")]
    NonPositiveAssetValue,
}

/// Result alias used by every simulator
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Longest term accepted by the month-by-month simulators
pub const MAX_TERM_YEARS: f64 = 100.0;

/// Reject a term that is used as a divisor or bounds a monthly loop
pub(crate) fn require_valid_term(years: f64) -> Result<()> {
    if years.is_nan() || years <= 0.0 {
        Err(ValidationError::NonPositiveTerm { years })
    } else if years > MAX_TERM_YEARS {
        Err(ValidationError::TermTooLong {
            years,
            max_years: MAX_TERM_YEARS,
        })
    } else {
        Ok(())
    }
}
