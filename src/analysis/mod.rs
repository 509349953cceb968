//! Playlist analysis pipeline: vectorize, cluster, label.
//!
//! [`analyze`] is the one entry point presentation code calls. The
//! submodules are public because each stage is useful on its own (the
//! vectorizers for inspecting feature space, the k-means engine for
//! clustering arbitrary vectors), but the pipeline is the supported path.

pub mod features;
pub mod kmeans;
pub mod labeling;
pub mod vocabulary;

pub use features::{
    create_vectorizer, AudioProfileVectorizer, FeatureWeights, GenreEraVectorizer, Vectorizer,
};
pub use kmeans::DEFAULT_MAX_ITERATIONS;

use crate::playlist::TrackRecord;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Knobs for one clustering run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Cap on assignment/recompute rounds.
    pub max_iterations: usize,
    /// Fixed seed for centroid initialization; `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            max_iterations: kmeans::DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("group count must be at least 1")]
    InvalidGroupCount,
}

/// A labeled group of tracks produced by the pipeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cluster {
    /// Final centroid in feature space.
    pub centroid: Vec<f64>,
    /// Member tracks, in input order.
    pub tracks: Vec<TrackRecord>,
    pub label: Option<String>,
}

/// Groups `tracks` into at most `k` labeled clusters.
///
/// Empty input yields an empty result. The returned clusters partition the
/// input: every track lands in exactly one cluster and no cluster is
/// empty, which also means fewer than `k` clusters can come back.
pub fn analyze(
    tracks: &[TrackRecord],
    k: usize,
    vectorizer: &dyn Vectorizer,
    params: &ClusterParams,
) -> Result<Vec<Cluster>, AnalysisError> {
    if k == 0 {
        return Err(AnalysisError::InvalidGroupCount);
    }
    if tracks.is_empty() {
        return Ok(Vec::new());
    }

    info!(
        "Clustering {} tracks into at most {} groups",
        tracks.len(),
        k
    );

    let vectors: Vec<Vec<f64>> = tracks
        .iter()
        .map(|track| vectorizer.vectorize(track))
        .collect();

    // Resolving an absent seed here instead of inside the engine means the
    // drawn value can be logged, so any run can be replayed afterwards.
    let seed = params.seed.unwrap_or_else(|| rand::rng().random());
    debug!("k-means centroid seed: {}", seed);

    let candidates = kmeans::cluster(&vectors, k, params.max_iterations, Some(seed));

    let clusters: Vec<Cluster> = candidates
        .into_iter()
        .filter(|candidate| !candidate.members.is_empty())
        .map(|candidate| {
            let members: Vec<TrackRecord> = candidate
                .members
                .iter()
                .map(|&index| tracks[index].clone())
                .collect();
            let label = labeling::label_cluster(&members);
            Cluster {
                centroid: candidate.centroid,
                tracks: members,
                label: Some(label),
            }
        })
        .collect();

    info!("Produced {} non-empty groups", clusters.len());
    Ok(clusters)
}
