//! Chart samples emitted by the simulators
//!
//! Samples are kept in chronological insertion order and carry everything a
//! chart needs. They are never fed back into a calculation.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::io::Write;

/// Label on the x-axis of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleLabel {
    /// Calendar year at the end of a projection year
    CalendarYear(i32),
    /// Month number, used for short loans
    Month(u32),
    /// Elapsed years, used for long loans
    YearsElapsed(f64),
    /// Final balloon settlement
    BalloonSettlement,
}

impl fmt::Display for SampleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleLabel::CalendarYear(year) => write!(f, "{}", year),
            SampleLabel::Month(month) => write!(f, "{} months", month),
            SampleLabel::YearsElapsed(years) => write!(f, "{:.1} years", years),
            SampleLabel::BalloonSettlement => f.write_str("balloon settlement"),
        }
    }
}

impl Serialize for SampleLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One point of a charted series
///
/// Loan series: nominal principal and interest paid in the period, the total
/// payment, and the nominal outstanding balance afterwards.
/// Growth series: cumulative deposits, accumulated gain, deposits made during
/// the year, and the portfolio balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSample {
    pub label: SampleLabel,
    pub principal_component: f64,
    pub interest_component: f64,
    pub total_payment: f64,
    pub balance: f64,
}

/// Write a sample series as CSV with a header row
pub fn write_samples_csv<W: Write>(writer: W, samples: &[PeriodSample]) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Label", "Principal", "Interest", "TotalPayment", "Balance"])?;

    for sample in samples {
        csv_writer.write_record([
            sample.label.to_string(),
            format!("{:.2}", sample.principal_component),
            format!("{:.2}", sample.interest_component),
            format!("{:.2}", sample.total_payment),
            format!("{:.2}", sample.balance),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text() {
        assert_eq!(SampleLabel::CalendarYear(2031).to_string(), "2031");
        assert_eq!(SampleLabel::Month(7).to_string(), "7 months");
        assert_eq!(SampleLabel::YearsElapsed(3.0).to_string(), "3.0 years");
        assert_eq!(SampleLabel::BalloonSettlement.to_string(), "balloon settlement");
    }

    #[test]
    fn test_csv_output() {
        let samples = vec![PeriodSample {
            label: SampleLabel::Month(1),
            principal_component: 100.0,
            interest_component: 25.5,
            total_payment: 125.5,
            balance: 900.0,
        }];

        let mut out = Vec::new();
        write_samples_csv(&mut out, &samples).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Label,Principal,Interest,TotalPayment,Balance\n1 months,100.00,25.50,125.50,900.00\n"
        );
    }

    #[test]
    fn test_label_serializes_as_text() {
        let json = serde_json::to_string(&SampleLabel::YearsElapsed(2.0)).unwrap();
        assert_eq!(json, "\"2.0 years\"");
    }
}
