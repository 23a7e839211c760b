//! Transaction record and table types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One parsed statement line item.
///
/// Exactly one of `withdrawal`/`deposit` is non-zero per record: the debit
/// marker on the source line classifies it as one or the other, never both.
/// Records are built once by the normalizer and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date (YYYY-MM-DD in serialized form)
    pub date: NaiveDate,
    /// Free-text description, trimmed of surrounding whitespace
    pub narration: String,
    /// Opaque reference token from the statement line
    pub reference: String,
    /// Debit amount; 0 when the line was a deposit
    pub withdrawal: f64,
    /// Credit amount; 0 when the line was a withdrawal
    pub deposit: f64,
    /// Running balance as stated on the source line
    pub balance: f64,
}

impl TransactionRecord {
    /// The single non-zero side of the record (0 for a zero-amount line).
    pub fn amount(&self) -> f64 {
        if self.withdrawal > 0.0 {
            self.withdrawal
        } else {
            self.deposit
        }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.withdrawal > 0.0
    }
}

/// Ordered sequence of records for one or more combined documents.
///
/// No identity beyond position; duplicates across documents are kept.
/// Serializes as a bare JSON array so stored tables round-trip losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionTable(Vec<TransactionRecord>);

impl TransactionTable {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate tables preserving within-table order; across-table order
    /// follows supply order. No sorting, no deduplication.
    pub fn concat(tables: impl IntoIterator<Item = TransactionTable>) -> TransactionTable {
        let mut out = Vec::new();
        for table in tables {
            out.extend(table.0);
        }
        TransactionTable(out)
    }
}

impl FromIterator<TransactionRecord> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TransactionTable {
    type Item = TransactionRecord;
    type IntoIter = std::vec::IntoIter<TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
