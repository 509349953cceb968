mod file_config;

pub use file_config::{ClusteringConfig, FileConfig, GroupingConfig, WeightsConfig};

use crate::analysis::{ClusterParams, FeatureWeights};
use anyhow::{bail, Result};
use clap::ValueEnum;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub groups: Option<usize>,
    pub seed: Option<u64>,
    pub vectorizer: Option<VectorizerKind>,
}

/// Feature-vector strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VectorizerKind {
    /// Genre tags plus release era; works with any playlist export.
    #[default]
    GenreEra,
    /// Per-track acoustic attributes; needs audio columns in the export.
    AudioProfile,
}

/// Caller-side policy for picking a group count from playlist size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingPolicy {
    /// Target number of tracks per group.
    pub tracks_per_group: usize,
    pub min_groups: usize,
    pub max_groups: usize,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            tracks_per_group: 15,
            min_groups: 4,
            max_groups: 8,
        }
    }
}

impl GroupingPolicy {
    /// Suggested group count: one group per `tracks_per_group` tracks,
    /// bounded by `min_groups..=max_groups`. An empty playlist suggests
    /// zero groups.
    pub fn suggest_group_count(&self, track_count: usize) -> usize {
        if track_count == 0 {
            return 0;
        }
        (track_count / self.tracks_per_group)
            .max(self.min_groups)
            .min(self.max_groups)
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Explicit group count; `None` defers to the grouping policy.
    pub groups: Option<usize>,
    pub vectorizer: VectorizerKind,
    pub weights: FeatureWeights,
    pub cluster_params: ClusterParams,
    pub grouping: GroupingPolicy,
}

impl AppConfig {
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let groups = file.groups.or(cli.groups);
        if groups == Some(0) {
            bail!("groups must be at least 1");
        }

        let vectorizer = match file.vectorizer.as_deref() {
            Some(value) => parse_vectorizer(value)?,
            None => cli.vectorizer.unwrap_or_default(),
        };

        let weights_file = file.weights.unwrap_or_default();
        let weight_defaults = FeatureWeights::default();
        let weights = FeatureWeights {
            year: weights_file.year.unwrap_or(weight_defaults.year),
            popularity: weights_file
                .popularity
                .unwrap_or(weight_defaults.popularity),
            genre: weights_file.genre.unwrap_or(weight_defaults.genre),
        };
        if weights.year < 0.0 || weights.popularity < 0.0 || weights.genre < 0.0 {
            bail!("Feature weights must not be negative");
        }

        let clustering_file = file.clustering.unwrap_or_default();
        let max_iterations = clustering_file
            .max_iterations
            .unwrap_or(ClusterParams::default().max_iterations);
        if max_iterations == 0 {
            bail!("max_iterations must be at least 1");
        }
        let cluster_params = ClusterParams {
            max_iterations,
            seed: file.seed.or(cli.seed),
        };

        let grouping_file = file.grouping.unwrap_or_default();
        let grouping_defaults = GroupingPolicy::default();
        let grouping = GroupingPolicy {
            tracks_per_group: grouping_file
                .tracks_per_group
                .unwrap_or(grouping_defaults.tracks_per_group),
            min_groups: grouping_file
                .min_groups
                .unwrap_or(grouping_defaults.min_groups),
            max_groups: grouping_file
                .max_groups
                .unwrap_or(grouping_defaults.max_groups),
        };
        if grouping.tracks_per_group == 0 {
            bail!("tracks_per_group must be at least 1");
        }
        if grouping.min_groups == 0 || grouping.min_groups > grouping.max_groups {
            bail!(
                "Invalid group bounds: min {} max {}",
                grouping.min_groups,
                grouping.max_groups
            );
        }

        Ok(Self {
            groups,
            vectorizer,
            weights,
            cluster_params,
            grouping,
        })
    }
}

/// Parses a vectorizer name into VectorizerKind.
/// Uses clap's ValueEnum trait, so the TOML file accepts the same names as
/// the CLI.
fn parse_vectorizer(s: &str) -> Result<VectorizerKind> {
    VectorizerKind::from_str(s, true).map_err(|_| {
        anyhow::anyhow!("Unknown vectorizer {:?} (expected \"genre-era\" or \"audio-profile\")", s)
    })
}
