//! Chart specifications handed to the renderer.
//!
//! The core describes *what* to draw; rasterization is `ledgersift-charts`'
//! problem. A spec is only produced when there is something to draw — an
//! empty filter result yields no spec at all.

/// A chart the aggregator wants rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// One withdrawal/deposit bar pair per category.
    GroupedBars {
        title: String,
        x_label: String,
        y_label: String,
        categories: Vec<String>,
        withdrawals: Vec<f64>,
        deposits: Vec<f64>,
    },
    /// Frequency histogram over a flat value list with a vertical marker
    /// at the comparison value.
    Histogram {
        title: String,
        x_label: String,
        y_label: String,
        values: Vec<f64>,
        marker: f64,
        marker_label: String,
        bins: usize,
    },
}
