//! Analysis preset types
//!
//! Presets are supplied by the caller (preset files, a web form, a stored
//! configuration) and are immutable from the engine's perspective. The
//! comparison wire strings (`eq`/`lt`/`gt`) are part of the stored-preset
//! contract; anything else fails to parse and the caller skips the preset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Comparison mode for amount filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "gt")]
    GreaterThan,
}

impl Comparison {
    /// Parse a wire string. Returns `None` for unknown modes; callers treat
    /// that as "skip this preset", not as an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(Comparison::Equal),
            "lt" => Some(Comparison::LessThan),
            "gt" => Some(Comparison::GreaterThan),
            _ => None,
        }
    }

    /// Human-readable fragment used to build `comparison_text`.
    pub fn label(&self) -> &'static str {
        match self {
            Comparison::Equal => "equal to",
            Comparison::LessThan => "less than",
            Comparison::GreaterThan => "greater than",
        }
    }
}

/// A saved analysis configuration, one of three kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPreset {
    /// Keep records with `start <= date <= end`, inclusive on both ends.
    DateRange { start: NaiveDate, end: NaiveDate },
    /// Keep records whose narration contains at least one keyword
    /// (case-insensitive substring). Keywords are ordered, lowercase,
    /// trimmed, and non-empty; normalization happens at the preset boundary.
    KeywordSearch { keywords: Vec<String> },
    /// Keep records whose withdrawal or deposit passes the comparison.
    AmountFilter { value: f64, comparison: Comparison },
}

/// Split raw keyword text (`"amazon, flipkart"`) into the normalized list:
/// comma-separated, trimmed, lowercased, empties dropped, order kept.
pub fn normalize_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
