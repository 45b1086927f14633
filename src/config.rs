//! Settings for extraction, evaluation and icon resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::DatasetKind;
use crate::model::Filters;

/// Top-level settings file: `{"filters": {...}, "tracker": {...}, "extract": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub filters: Filters,
    pub tracker: TrackerConfig,
    pub extract: ExtractOptions,
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Orchestrator tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Minimum spacing between accepted evaluations.
    pub throttle_ms: u64,
    /// Half-width of the area query window, in degrees.
    pub area_buffer_deg: f64,
    /// Nearby signs kept after sorting.
    pub max_signs: usize,
    pub icons: IconConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { throttle_ms: 1000, area_buffer_deg: 0.05, max_signs: 10, icons: IconConfig::default() }
    }
}

/// Where sign icons live: `{base}/{prefix}{key}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub base: String,
    pub prefix: String,
    pub extension: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self { base: "/icons".into(), prefix: "merkki".into(), extension: "png".into() }
    }
}

impl IconConfig {
    pub fn url(&self, icon_key: &str) -> String {
        format!("{}/{}{}.{}", self.base.trim_end_matches('/'), self.prefix, icon_key, self.extension)
    }
}

/// Table names tried, in order, for each dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    pub restriction_tables: Vec<String>,
    pub sign_tables: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            restriction_tables: vec!["rajoitusalue_a".into()],
            sign_tables: vec!["vesiliikennemerkit".into()],
        }
    }
}

impl ExtractOptions {
    pub fn tables(&self, kind: DatasetKind) -> &[String] {
        match kind {
            DatasetKind::Restriction => &self.restriction_tables,
            DatasetKind::Sign => &self.sign_tables,
        }
    }
}
