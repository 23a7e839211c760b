//! Preset file loading and name-based selection.
//!
//! `ledgersift.toml`-style files carry `[[preset]]` entries; resolution is
//! permissive: an entry that cannot be turned into a usable preset (unknown
//! kind, unknown comparison, empty keyword list, missing fields) is skipped
//! with a warning so the remaining presets still run.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledgersift_core::preset::{AnalysisPreset, Comparison, normalize_keywords};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default, rename = "preset")]
    presets: Vec<PresetEntry>,
}

/// Raw file entry before resolution. Only the fields relevant to its `kind`
/// need to be present.
#[derive(Debug, Deserialize)]
struct PresetEntry {
    name: String,
    kind: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    /// Comma-separated keyword text, normalized at this boundary
    keywords: Option<String>,
    value: Option<f64>,
    comparison: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedPreset {
    pub name: String,
    pub preset: AnalysisPreset,
}

/// Load and resolve a preset file, file order preserved.
pub fn load_presets(path: &Path) -> Result<Vec<NamedPreset>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading preset file {}", path.display()))?;
    let file: PresetFile = toml::from_str(&text)
        .with_context(|| format!("parsing preset file {}", path.display()))?;

    Ok(file.presets.iter().filter_map(resolve).collect())
}

fn resolve(entry: &PresetEntry) -> Option<NamedPreset> {
    let preset = match entry.kind.as_str() {
        "date_range" => match (entry.start, entry.end) {
            (Some(start), Some(end)) => AnalysisPreset::DateRange { start, end },
            _ => {
                warn!(preset = %entry.name, "date_range preset is missing start/end; skipping");
                return None;
            }
        },

        "keyword" => {
            let keywords = normalize_keywords(entry.keywords.as_deref().unwrap_or(""));
            if keywords.is_empty() {
                warn!(preset = %entry.name, "keyword preset has no usable keywords; skipping");
                return None;
            }
            AnalysisPreset::KeywordSearch { keywords }
        }

        "amount_filter" => {
            let Some(value) = entry.value else {
                warn!(preset = %entry.name, "amount_filter preset is missing value; skipping");
                return None;
            };
            let raw = entry.comparison.as_deref().unwrap_or("");
            // Unknown comparison modes are a silent no-op, not an error.
            let Some(comparison) = Comparison::parse(raw) else {
                warn!(preset = %entry.name, comparison = raw, "unknown comparison mode; skipping");
                return None;
            };
            AnalysisPreset::AmountFilter { value, comparison }
        }

        other => {
            warn!(preset = %entry.name, kind = other, "unknown preset kind; skipping");
            return None;
        }
    };

    Some(NamedPreset {
        name: entry.name.clone(),
        preset,
    })
}

/// Keep only the named presets, in the file's order. A selected name that
/// resolves to nothing is warned about per-preset and does not abort the rest.
pub fn select(presets: Vec<NamedPreset>, names: &str) -> Vec<NamedPreset> {
    let wanted: Vec<&str> = names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    for name in &wanted {
        if !presets.iter().any(|p| p.name == *name) {
            warn!(preset = %name, "selected preset not found in preset file");
        }
    }

    presets
        .into_iter()
        .filter(|p| wanted.iter().any(|n| *n == p.name))
        .collect()
}
