//! Input loading: statement documents and stored tables, combined in supply
//! order for multi-document analysis.

use anyhow::{Context, Result, anyhow, bail};
use ledgersift_core::TransactionTable;
use ledgersift_extract::parse_document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read every input and combine the resulting tables in input order.
///
/// Inputs ending in `.json` are stored tables; everything else parses as a
/// statement document (PDF or extracted text). Per-input failures are warned
/// and skipped so one bad document never aborts the batch; the load as a
/// whole only fails when no input yielded any data, because then there is
/// nothing to analyze.
pub fn load_combined_table(paths: &[PathBuf], password: &str) -> Result<TransactionTable> {
    let mut tables = Vec::new();
    for path in paths {
        match load_one(path, password) {
            Ok(table) => {
                if table.is_empty() {
                    warn!(input = %path.display(), "no extractable data");
                }
                tables.push(table);
            }
            Err(err) => warn!(input = %path.display(), error = format!("{err:#}"), "skipping input"),
        }
    }

    let combined = TransactionTable::concat(tables);
    if combined.is_empty() {
        bail!("no documents yielded data");
    }
    Ok(combined)
}

fn load_one(path: &Path, password: &str) -> Result<TransactionTable> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("decoding stored table {}", path.display()))
    } else {
        parse_document(&bytes, password).map_err(|err| {
            if err.is_credential_failure() {
                anyhow!("{err}; pass --password")
            } else {
                anyhow!(err)
            }
        })
    }
}
