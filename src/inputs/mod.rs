//! Parameter records supplied by the presentation layer
//!
//! Records are rebuilt for every calculation. Numeric fields are parsed
//! leniently: missing or garbled values become 0 and flags become false.

mod coerce;
mod params;
pub mod loader;

pub use coerce::{lenient_amount, lenient_flag, lenient_year, parse_amount, parse_flag};
pub use params::{
    GrowthParams, LeverageParams, LoanEntry, LoanParams, LtvParams, NewLoan, RefinanceParams,
    DEFAULT_TAX_RATE_PCT,
};
pub use loader::load_loan_entries;
