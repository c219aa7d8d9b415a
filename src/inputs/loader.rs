//! Load existing-loan lists from CSV
//!
//! Expected columns: `outstanding_balance,annual_rate_pct,remaining_years`.
//! Cells that do not parse are read as 0, so the row is later skipped by
//! refinance rather than failing the whole file.

use super::LoanEntry;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load loan entries from a CSV file
pub fn load_loan_entries(path: &Path) -> Result<Vec<LoanEntry>, Box<dyn Error>> {
    let file = File::open(path)?;
    read_loan_entries(file)
}

/// Read loan entries from any CSV source with a header row
pub fn read_loan_entries<R: Read>(source: R) -> Result<Vec<LoanEntry>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let entry: LoanEntry = result?;
        entries.push(entry);
    }

    log::debug!("Loaded {} loan entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_entries() {
        let data = "\
outstanding_balance,annual_rate_pct,remaining_years
250000,4.5,20
80000, 6.1 ,7
";
        let entries = read_loan_entries(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], LoanEntry::new(250_000.0, 4.5, 20.0));
        assert_eq!(entries[1].annual_rate_pct, 6.1);
    }

    #[test]
    fn test_garbled_cells_become_zero() {
        let data = "\
outstanding_balance,annual_rate_pct,remaining_years
abc,4.5,20
";
        let entries = read_loan_entries(data.as_bytes()).unwrap();
        assert_eq!(entries[0].outstanding_balance, 0.0);
        assert!(!entries[0].qualifies());
    }
}
