//! Raw tuple to typed record conversion.

use chrono::NaiveDate;
use ledgersift_core::TransactionRecord;

use crate::error::{ExtractError, Result};
use crate::pattern::RawRecord;

/// Statement date format, strict.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Debit marker, matched as a case-sensitive literal. `(Cr)`, `(DR)`, and
/// any other marker classify as a deposit. Compatibility behavior; do not
/// loosen without flagging it as a change.
const DEBIT_MARKER: &str = "(Dr)";

/// Convert one raw tuple into a typed record. Pure; the matcher makes bad
/// input unlikely but malformed dates/amounts still fail cleanly.
pub fn normalize(raw: &RawRecord) -> Result<TransactionRecord> {
    let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|source| {
        ExtractError::BadDate {
            value: raw.date.clone(),
            source,
        }
    })?;

    let amount = parse_amount(&raw.amount)?;
    let balance = parse_amount(&raw.balance)?;

    let is_withdrawal = raw.amount.contains(DEBIT_MARKER);
    let (withdrawal, deposit) = if is_withdrawal {
        (amount, 0.0)
    } else {
        (0.0, amount)
    };

    Ok(TransactionRecord {
        date,
        narration: raw.narration.trim().to_string(),
        reference: raw.reference.clone(),
        withdrawal,
        deposit,
        balance,
    })
}

/// Numeric portion before the parenthesized marker, thousands separators
/// stripped.
fn parse_amount(field: &str) -> Result<f64> {
    let numeric = field.split('(').next().unwrap_or(field).replace(',', "");
    numeric.parse().map_err(|_| ExtractError::BadAmount {
        value: field.to_string(),
    })
}
