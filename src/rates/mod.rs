//! Rate conversions, annuity payments and IRR

mod convert;
mod annuity;
mod irr;

pub use convert::{monthly_effective, monthly_nominal, MONTHS_PER_YEAR};
pub use annuity::{monthly_payment, term_months};
pub use irr::{calculate_irr, effective_annual_cost};
