use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub groups: Option<usize>,
    pub seed: Option<u64>,
    /// Vectorizer to use: "genre-era", "audio-profile"
    pub vectorizer: Option<String>,

    // Feature configs
    pub weights: Option<WeightsConfig>,
    pub clustering: Option<ClusteringConfig>,
    pub grouping: Option<GroupingConfig>,
}

/// Feature-group weights of the genre/era vectorizer.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WeightsConfig {
    pub year: Option<f64>,
    pub popularity: Option<f64>,
    pub genre: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ClusteringConfig {
    pub max_iterations: Option<usize>,
}

/// Group-count policy applied when no explicit group count is given.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct GroupingConfig {
    pub tracks_per_group: Option<usize>,
    pub min_groups: Option<usize>,
    pub max_groups: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
