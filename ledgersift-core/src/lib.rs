//! ledgersift-core: transaction table model, analysis presets, filters, and
//! the aggregation that turns a filtered table into a report.
//!
//! Everything here is pure and synchronous; document reading lives in
//! `ledgersift-extract` and chart rasterization in `ledgersift-charts`.

pub mod aggregate;
pub mod analysis;
pub mod chart;
pub mod filter;
pub mod preset;
pub mod record;

pub use analysis::{AnalysisReport, KeywordStat, PreviewRow, analyze};
pub use chart::ChartSpec;
pub use filter::{KeywordMatch, filter_amount, filter_date_range, filter_keyword};
pub use preset::{AnalysisPreset, Comparison};
pub use record::{TransactionRecord, TransactionTable};
