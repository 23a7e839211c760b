//! Preset analysis: filter, aggregate, and package one report per call.

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::aggregate::{Totals, amount_histogram_spec, daily_flow_spec, keyword_spec};
use crate::chart::ChartSpec;
use crate::filter::{KeywordMatch, filter_amount, filter_date_range, filter_keyword};
use crate::preset::AnalysisPreset;
use crate::record::{TransactionRecord, TransactionTable};

/// Maximum number of rows in the report preview.
pub const PREVIEW_ROWS: usize = 10;

/// Per-keyword aggregate over the keyword filter's matches.
///
/// A row counts toward every keyword its matched list contains, so a
/// multi-keyword row contributes to several stats entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub keyword: String,
    pub count: usize,
    pub withdrawal: f64,
    pub deposit: f64,
}

/// One preview row. The keyword variant drops `reference`/`balance` from its
/// output view and carries the derived `matched_keywords` column instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub date: NaiveDate,
    pub narration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub withdrawal: f64,
    pub deposit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_keywords: Option<String>,
}

impl PreviewRow {
    fn full(r: &TransactionRecord) -> Self {
        Self {
            date: r.date,
            narration: r.narration.clone(),
            reference: Some(r.reference.clone()),
            withdrawal: r.withdrawal,
            deposit: r.deposit,
            balance: Some(r.balance),
            matched_keywords: None,
        }
    }

    fn keyword_view(m: &KeywordMatch) -> Self {
        Self {
            date: m.record.date,
            narration: m.record.narration.clone(),
            reference: None,
            withdrawal: m.record.withdrawal,
            deposit: m.record.deposit,
            balance: None,
            matched_keywords: Some(m.matched_keywords()),
        }
    }
}

/// Output bundle of one analysis call.
///
/// Always well-formed: an empty filter result gives zero counts, an empty
/// preview, and no chart, never an absent report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub transaction_count: usize,
    pub total_withdrawal: f64,
    pub total_deposit: f64,
    /// `total_deposit - total_withdrawal`
    pub net_flow: f64,
    /// First 10 kept rows in table order
    pub transactions: Vec<PreviewRow>,
    /// Keyword variant only: the normalized keyword list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Keyword variant only; omitted when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_stats: Option<Vec<KeywordStat>>,
    /// Amount variant only, e.g. "greater than 500"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_text: Option<String>,
    /// What to chart; `None` when the filtered table was empty.
    /// Rendered separately; the serialized report never embeds the spec.
    #[serde(skip)]
    pub chart: Option<ChartSpec>,
}

impl AnalysisReport {
    fn from_totals(totals: Totals, transactions: Vec<PreviewRow>, chart: Option<ChartSpec>) -> Self {
        Self {
            transaction_count: totals.count,
            total_withdrawal: totals.withdrawal,
            total_deposit: totals.deposit,
            net_flow: totals.net_flow(),
            transactions,
            keywords: None,
            keyword_stats: None,
            comparison_text: None,
            chart,
        }
    }
}

/// Run one preset against a table.
pub fn analyze(table: &TransactionTable, preset: &AnalysisPreset) -> AnalysisReport {
    match preset {
        AnalysisPreset::DateRange { start, end } => {
            let filtered = filter_date_range(table, *start, *end);
            let totals = Totals::over(filtered.records());
            let chart = daily_flow_spec(&filtered);
            let preview = filtered
                .records()
                .iter()
                .take(PREVIEW_ROWS)
                .map(PreviewRow::full)
                .collect();
            AnalysisReport::from_totals(totals, preview, chart)
        }

        AnalysisPreset::KeywordSearch { keywords } => {
            let matches = filter_keyword(table, keywords);
            let totals = Totals::over(matches.iter().map(|m| &m.record));
            let chart = keyword_spec(&matches);
            let preview = matches
                .iter()
                .take(PREVIEW_ROWS)
                .map(PreviewRow::keyword_view)
                .collect();

            let stats = if matches.is_empty() {
                None
            } else {
                Some(keyword_stats(&matches, keywords))
            };

            let mut report = AnalysisReport::from_totals(totals, preview, chart);
            report.keywords = Some(keywords.clone());
            report.keyword_stats = stats;
            report
        }

        AnalysisPreset::AmountFilter { value, comparison } => {
            let (filtered, comparison_text) = filter_amount(table, *value, *comparison);
            let totals = Totals::over(filtered.records());
            let chart = amount_histogram_spec(&filtered, *value, &comparison_text);
            let preview = filtered
                .records()
                .iter()
                .take(PREVIEW_ROWS)
                .map(PreviewRow::full)
                .collect();

            let mut report = AnalysisReport::from_totals(totals, preview, chart);
            report.comparison_text = Some(comparison_text);
            report
        }
    }
}

/// Per-keyword stats in the keyword set's input order. A keyword no row
/// matched still gets an entry with zero count and sums.
fn keyword_stats(matches: &[KeywordMatch], keywords: &[String]) -> Vec<KeywordStat> {
    keywords
        .iter()
        .map(|keyword| {
            let rows = matches.iter().filter(|m| m.matched.contains(keyword));
            let totals = Totals::over(rows.map(|m| &m.record));
            KeywordStat {
                keyword: keyword.clone(),
                count: totals.count,
                withdrawal: totals.withdrawal,
                deposit: totals.deposit,
            }
        })
        .collect()
}
