//! Column sums and chart-ready groupings over filtered tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::chart::ChartSpec;
use crate::filter::KeywordMatch;
use crate::record::{TransactionRecord, TransactionTable};

/// Histogram bin count for amount-filter charts.
pub const HISTOGRAM_BINS: usize = 20;

/// Withdrawal/deposit column sums over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub count: usize,
    pub withdrawal: f64,
    pub deposit: f64,
}

impl Totals {
    pub fn over<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Totals {
        let mut totals = Totals::default();
        for r in records {
            totals.count += 1;
            totals.withdrawal += r.withdrawal;
            totals.deposit += r.deposit;
        }
        totals
    }

    pub fn net_flow(&self) -> f64 {
        self.deposit - self.withdrawal
    }
}

/// Withdrawal and deposit sums grouped by calendar day, days ascending.
/// `None` when there is nothing to chart.
pub fn daily_flow_spec(filtered: &TransactionTable) -> Option<ChartSpec> {
    if filtered.is_empty() {
        return None;
    }

    let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for r in filtered.records() {
        let entry = by_day.entry(r.date).or_default();
        entry.0 += r.withdrawal;
        entry.1 += r.deposit;
    }

    let mut categories = Vec::with_capacity(by_day.len());
    let mut withdrawals = Vec::with_capacity(by_day.len());
    let mut deposits = Vec::with_capacity(by_day.len());
    for (day, (w, d)) in by_day {
        categories.push(day.format("%Y-%m-%d").to_string());
        withdrawals.push(w);
        deposits.push(d);
    }

    Some(ChartSpec::GroupedBars {
        title: "Daily Transaction Flow".to_string(),
        x_label: "Date".to_string(),
        y_label: "Amount".to_string(),
        categories,
        withdrawals,
        deposits,
    })
}

/// Sums grouped by each row's matched-keyword string. A row that matched two
/// keywords forms its own `"a, b"` group. Groups in lexicographic order.
pub fn keyword_spec(matches: &[KeywordMatch]) -> Option<ChartSpec> {
    if matches.is_empty() {
        return None;
    }

    let mut by_keyword: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for m in matches {
        let entry = by_keyword.entry(m.matched_keywords()).or_default();
        entry.0 += m.record.withdrawal;
        entry.1 += m.record.deposit;
    }

    let mut categories = Vec::with_capacity(by_keyword.len());
    let mut withdrawals = Vec::with_capacity(by_keyword.len());
    let mut deposits = Vec::with_capacity(by_keyword.len());
    for (kw, (w, d)) in by_keyword {
        categories.push(kw);
        withdrawals.push(w);
        deposits.push(d);
    }

    Some(ChartSpec::GroupedBars {
        title: "Keyword Distribution".to_string(),
        x_label: "Keyword".to_string(),
        y_label: "Amount".to_string(),
        categories,
        withdrawals,
        deposits,
    })
}

/// Flat list of all positive withdrawal magnitudes followed by all positive
/// deposit magnitudes, rendered as a histogram with a marker at the
/// comparison value.
pub fn amount_histogram_spec(
    filtered: &TransactionTable,
    value: f64,
    comparison_text: &str,
) -> Option<ChartSpec> {
    let mut values: Vec<f64> = filtered
        .records()
        .iter()
        .filter(|r| r.withdrawal > 0.0)
        .map(|r| r.withdrawal)
        .collect();
    values.extend(
        filtered
            .records()
            .iter()
            .filter(|r| r.deposit > 0.0)
            .map(|r| r.deposit),
    );

    if values.is_empty() {
        return None;
    }

    Some(ChartSpec::Histogram {
        title: format!("Distribution of Transaction Amounts {comparison_text}"),
        x_label: "Amount".to_string(),
        y_label: "Frequency".to_string(),
        values,
        marker: value,
        marker_label: format!("Filter amount: {value}"),
        bins: HISTOGRAM_BINS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, narration: &str, withdrawal: f64, deposit: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::parse_from_str(date, "%d-%m-%Y").unwrap(),
            narration: narration.to_string(),
            reference: "REF".to_string(),
            withdrawal,
            deposit,
            balance: 0.0,
        }
    }

    #[test]
    fn test_totals_and_net_flow() {
        let table = TransactionTable::new(vec![
            record("01-03-2024", "A", 500.0, 0.0),
            record("02-03-2024", "B", 0.0, 2000.0),
            record("03-03-2024", "C", 300.0, 0.0),
        ]);

        let totals = Totals::over(table.records());
        assert_eq!(totals.count, 3);
        assert_eq!(totals.withdrawal, 800.0);
        assert_eq!(totals.deposit, 2000.0);
        assert_eq!(totals.net_flow(), 1200.0);
    }

    #[test]
    fn test_totals_empty() {
        let totals = Totals::over([]);
        assert_eq!(totals.count, 0);
        assert_eq!(totals.withdrawal, 0.0);
        assert_eq!(totals.deposit, 0.0);
        assert_eq!(totals.net_flow(), 0.0);
    }

    #[test]
    fn test_daily_flow_groups_by_day_ascending() {
        let table = TransactionTable::new(vec![
            record("02-03-2024", "LATER", 100.0, 0.0),
            record("01-03-2024", "EARLY A", 50.0, 0.0),
            record("01-03-2024", "EARLY B", 0.0, 500.0),
        ]);

        let spec = daily_flow_spec(&table).unwrap();
        match spec {
            ChartSpec::GroupedBars {
                categories,
                withdrawals,
                deposits,
                ..
            } => {
                assert_eq!(categories, vec!["2024-03-01", "2024-03-02"]);
                assert_eq!(withdrawals, vec![50.0, 100.0]);
                assert_eq!(deposits, vec![500.0, 0.0]);
            }
            other => panic!("expected grouped bars, got {other:?}"),
        }
    }

    #[test]
    fn test_daily_flow_empty_is_none() {
        assert_eq!(daily_flow_spec(&TransactionTable::default()), None);
    }

    #[test]
    fn test_keyword_spec_multi_keyword_row_forms_own_group() {
        let matches = vec![
            KeywordMatch {
                record: record("01-03-2024", "AMAZON SALARY", 0.0, 100.0),
                matched: vec!["salary".to_string(), "amazon".to_string()],
            },
            KeywordMatch {
                record: record("02-03-2024", "AMAZON PURCHASE", 250.0, 0.0),
                matched: vec!["amazon".to_string()],
            },
        ];

        let spec = keyword_spec(&matches).unwrap();
        match spec {
            ChartSpec::GroupedBars { categories, .. } => {
                assert_eq!(categories, vec!["amazon", "salary, amazon"]);
            }
            other => panic!("expected grouped bars, got {other:?}"),
        }
    }

    #[test]
    fn test_histogram_combines_positive_magnitudes() {
        let table = TransactionTable::new(vec![
            record("01-03-2024", "W", 1500.0, 0.0),
            record("02-03-2024", "D", 0.0, 2500.0),
        ]);

        let spec = amount_histogram_spec(&table, 1000.0, "greater than 1000").unwrap();
        match spec {
            ChartSpec::Histogram { values, marker, bins, .. } => {
                assert_eq!(values, vec![1500.0, 2500.0]);
                assert_eq!(marker, 1000.0);
                assert_eq!(bins, HISTOGRAM_BINS);
            }
            other => panic!("expected histogram, got {other:?}"),
        }
    }
}
