//! Table export: CSV or the stored-table JSON form.

use anyhow::{Context, Result};
use clap::ValueEnum;
use ledgersift_core::TransactionTable;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

/// Write a table to `path` in the given format. JSON output round-trips
/// through `serde_json::from_slice::<TransactionTable>` losslessly.
pub fn write_table(table: &TransactionTable, path: &Path, format: TableFormat) -> Result<()> {
    match format {
        TableFormat::Csv => {
            let mut wtr = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            for record in table.records() {
                wtr.serialize(record)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            wtr.flush()
                .with_context(|| format!("flushing {}", path.display()))?;
        }
        TableFormat::Json => {
            let json = serde_json::to_vec_pretty(table).context("serializing table")?;
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgersift_core::TransactionRecord;
    use tempfile::tempdir;

    fn sample_table() -> TransactionTable {
        TransactionTable::new(vec![TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            narration: "GROCERY STORE".to_string(),
            reference: "REF1".to_string(),
            withdrawal: 1500.0,
            deposit: 0.0,
            balance: 10000.0,
        }])
    }

    #[test]
    fn test_write_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&sample_table(), &path, TableFormat::Csv).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,narration,reference,withdrawal,deposit,balance"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-01,GROCERY STORE,REF1,1500.0,0.0,10000.0"
        );
    }

    #[test]
    fn test_write_json_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let table = sample_table();
        write_table(&table, &path, TableFormat::Json).unwrap();

        let bytes = fs::read(&path).unwrap();
        let back: TransactionTable = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, table);
    }
}
