//! ledgersift-extract: turn statement documents into transaction tables.
//!
//! Matcher and normalizer run per page in page order; a document's records
//! concatenate into one table. Batch parsing isolates per-document failures
//! and preserves input order.

pub mod document;
pub mod error;
pub mod normalize;
pub mod pattern;

pub use error::ExtractError;
pub use pattern::RawRecord;

use ledgersift_core::TransactionTable;
use tracing::{debug, warn};

/// Parse one document (PDF bytes or already-extracted text) into a table.
///
/// An empty table is an ordinary outcome ("no extractable data"), not an
/// error; the caller decides whether to surface it. A record that matched
/// the pattern but fails normalization aborts this document's parse.
pub fn parse_document(bytes: &[u8], password: &str) -> Result<TransactionTable, ExtractError> {
    let pages = document::read_pages(bytes, password)?;

    let mut records = Vec::new();
    for page in &pages {
        for raw in pattern::match_page(page) {
            records.push(normalize::normalize(&raw)?);
        }
    }

    if records.is_empty() {
        debug!(pages = pages.len(), "no extractable data in document");
    }
    Ok(TransactionTable::new(records))
}

/// Result slot for one labeled input of a batch parse.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub label: String,
    pub result: Result<TransactionTable, ExtractError>,
}

/// Parse a batch of labeled documents sequentially with one shared password.
///
/// Output order equals input order and one document's failure never stops
/// the rest. This is the batch surface for callers whose inputs are all
/// documents; a caller mixing documents with already-materialized tables
/// (stored-table files, say) parses each input individually and combines
/// the results with `TransactionTable::concat` to keep supply order.
pub fn parse_all(
    inputs: impl IntoIterator<Item = (String, Vec<u8>)>,
    password: &str,
) -> Vec<DocumentOutcome> {
    inputs
        .into_iter()
        .map(|(label, bytes)| {
            let result = parse_document(&bytes, password);
            if let Err(err) = &result {
                warn!(document = %label, error = %err, "document failed to parse");
            }
            DocumentOutcome { label, result }
        })
        .collect()
}
