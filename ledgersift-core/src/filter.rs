//! The three table filters: date range, keyword, amount comparison.
//!
//! Each filter derives a new collection from a read-only table; the input is
//! never mutated. An empty result is an ordinary outcome the aggregator turns
//! into a zero report.

use chrono::NaiveDate;

use crate::preset::Comparison;
use crate::record::{TransactionRecord, TransactionTable};

/// Keep records with `start <= date <= end`, inclusive on both ends.
/// Calendar dates only, no timezone handling.
pub fn filter_date_range(
    table: &TransactionTable,
    start: NaiveDate,
    end: NaiveDate,
) -> TransactionTable {
    table
        .records()
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// A record kept by the keyword filter, with the keywords that matched it.
///
/// `matched` lists every keyword that is a case-insensitive substring of the
/// narration, in the keyword set's original order, not just the first hit.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub record: TransactionRecord,
    pub matched: Vec<String>,
}

impl KeywordMatch {
    /// The derived column value: matched keywords comma-joined.
    pub fn matched_keywords(&self) -> String {
        self.matched.join(", ")
    }
}

/// Keep records whose narration contains at least one keyword
/// (case-insensitive substring match). Keywords are expected lowercase.
pub fn filter_keyword(table: &TransactionTable, keywords: &[String]) -> Vec<KeywordMatch> {
    table
        .records()
        .iter()
        .filter_map(|r| {
            let narration = r.narration.to_lowercase();
            let matched: Vec<String> = keywords
                .iter()
                .filter(|k| narration.contains(k.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some(KeywordMatch {
                    record: r.clone(),
                    matched,
                })
            }
        })
        .collect()
}

/// Compare withdrawals and deposits as one unified amount axis.
///
/// `LessThan` carries a strictly-positive guard so the many records whose
/// opposite column is legitimately zero are not counted as matches;
/// `Equal`/`GreaterThan` do not guard. Returns the kept records and the
/// human-readable `comparison_text` (e.g. "greater than 500").
pub fn filter_amount(
    table: &TransactionTable,
    value: f64,
    comparison: Comparison,
) -> (TransactionTable, String) {
    let keep = |r: &TransactionRecord| match comparison {
        Comparison::Equal => r.withdrawal == value || r.deposit == value,
        Comparison::GreaterThan => r.withdrawal > value || r.deposit > value,
        Comparison::LessThan => {
            (r.withdrawal > 0.0 && r.withdrawal < value) || (r.deposit > 0.0 && r.deposit < value)
        }
    };

    let filtered = table
        .records()
        .iter()
        .filter(|r| keep(r))
        .cloned()
        .collect();
    (filtered, format!("{} {}", comparison.label(), value))
}
