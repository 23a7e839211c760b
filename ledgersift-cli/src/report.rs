//! Terminal report printing and the JSON report bundle.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ledgersift_core::AnalysisReport;
use serde::Serialize;

/// One analyzed preset in the JSON report bundle. The chart, when rendered,
/// is embedded base64-encoded; it is omitted entirely when there was nothing
/// to chart or rendering failed.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub preset: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
}

impl ReportEntry {
    pub fn new(preset: String, report: AnalysisReport, chart_png: Option<Vec<u8>>) -> Self {
        Self {
            preset,
            report,
            chart: chart_png.map(|png| BASE64.encode(png)),
        }
    }
}

/// Print one preset's report to stdout.
pub fn print_report(name: &str, report: &AnalysisReport) {
    println!("== {name} ==");
    if let Some(text) = &report.comparison_text {
        println!("Amounts {text}");
    }
    if let Some(keywords) = &report.keywords {
        println!("Keywords: {}", keywords.join(", "));
    }

    println!("Transactions:     {}", report.transaction_count);
    println!("Total withdrawal: {:.2}", report.total_withdrawal);
    println!("Total deposit:    {:.2}", report.total_deposit);
    println!("Net flow:         {:.2}", report.net_flow);

    if !report.transactions.is_empty() {
        println!("\nPreview (first {} rows):", report.transactions.len());
        for row in &report.transactions {
            let flow = if row.withdrawal > 0.0 {
                format!("-{:.2}", row.withdrawal)
            } else {
                format!("+{:.2}", row.deposit)
            };
            match &row.matched_keywords {
                Some(matched) => {
                    println!("  {}  {:>12}  {}  [{}]", row.date, flow, row.narration, matched)
                }
                None => println!("  {}  {:>12}  {}", row.date, flow, row.narration),
            }
        }
    }

    if let Some(stats) = &report.keyword_stats {
        println!("\nPer keyword:");
        for s in stats {
            println!(
                "  {}: count={} withdrawal={:.2} deposit={:.2}",
                s.keyword, s.count, s.withdrawal, s.deposit
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgersift_core::{AnalysisPreset, Comparison, TransactionRecord, TransactionTable, analyze};

    fn report() -> AnalysisReport {
        let table = TransactionTable::new(vec![TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            narration: "GROCERY STORE".to_string(),
            reference: "REF1".to_string(),
            withdrawal: 1500.0,
            deposit: 0.0,
            balance: 10000.0,
        }]);
        analyze(
            &table,
            &AnalysisPreset::AmountFilter {
                value: 1000.0,
                comparison: Comparison::GreaterThan,
            },
        )
    }

    #[test]
    fn test_entry_embeds_chart_as_base64() {
        let entry = ReportEntry::new("big".to_string(), report(), Some(vec![0x89, 0x50]));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["preset"], "big");
        // Flattened report fields sit at the top level.
        assert_eq!(json["transaction_count"], 1);
        assert_eq!(json["chart"], "iVA=");
    }

    #[test]
    fn test_entry_omits_absent_chart() {
        let entry = ReportEntry::new("big".to_string(), report(), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("chart").is_none());
    }
}
