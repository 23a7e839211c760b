//! Statement line matcher.
//!
//! One pattern applied to the whole text of a page, not line by line:
//! date, non-greedy narration, whitespace-free reference token, then two
//! amount fields of digits/commas/periods with a parenthesized `(Dr)`/`(Cr)`
//! style marker. The second amount is the running balance. A page with no
//! matches contributes no records.

use std::sync::LazyLock;

use regex::Regex;

/// The record pattern. Narration is non-greedy so it stops at the reference
/// token rather than swallowing the amount fields.
const RECORD_PATTERN: &str =
    r"(\d{2}-\d{2}-\d{4})\s+(.*?)\s+(\S+?)\s+([0-9,.]+\([DrC]+\))\s+([0-9,.]+\([DrC]+\))";

static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECORD_PATTERN).expect("record pattern compiles"));

/// One raw field tuple straight out of the matcher, not yet typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub date: String,
    pub narration: String,
    pub reference: String,
    pub amount: String,
    pub balance: String,
}

/// Scan one page's text for statement records.
pub fn match_page(text: &str) -> impl Iterator<Item = RawRecord> + '_ {
    RECORD_RE.captures_iter(text).map(|caps| RawRecord {
        date: caps[1].to_string(),
        narration: caps[2].to_string(),
        reference: caps[3].to_string(),
        amount: caps[4].to_string(),
        balance: caps[5].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_grocery_line() {
        let text = "01-03-2024  GROCERY STORE  REF1  1,500.00(Dr)  10,000.00(Cr)";
        let records: Vec<_> = match_page(text).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "01-03-2024");
        assert_eq!(records[0].narration, "GROCERY STORE");
        assert_eq!(records[0].reference, "REF1");
        assert_eq!(records[0].amount, "1,500.00(Dr)");
        assert_eq!(records[0].balance, "10,000.00(Cr)");
    }

    #[test]
    fn test_matches_across_lines_of_one_page() {
        let text = "HDFC BANK STATEMENT\n\
                    01-03-2024  GROCERY STORE  REF1  1,500.00(Dr)  10,000.00(Cr)\n\
                    Page footer text\n\
                    02-03-2024  MONTHLY SALARY CREDIT  NEFT42  50,000.00(Cr)  60,000.00(Cr)\n";
        let records: Vec<_> = match_page(text).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].narration, "MONTHLY SALARY CREDIT");
        assert_eq!(records[1].reference, "NEFT42");
    }

    #[test]
    fn test_narration_non_greedy() {
        // Multi-word narration must stop at the reference token, not eat it.
        let text = "05-03-2024  UPI TRANSFER TO LANDLORD MARCH  UPI990  12,000.00(Dr)  48,000.00(Cr)";
        let records: Vec<_> = match_page(text).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].narration, "UPI TRANSFER TO LANDLORD MARCH");
        assert_eq!(records[0].reference, "UPI990");
    }

    #[test]
    fn test_no_matches_on_prose_page() {
        let text = "This statement is issued for the period 01-03-2024 onwards.";
        assert_eq!(match_page(text).count(), 0);
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(match_page("").count(), 0);
    }
}
