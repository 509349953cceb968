//! Partition clustering over feature vectors.
//!
//! Plain k-means with k-means++ seeding. Centroid seeding is the only
//! randomized step in the whole pipeline, so a fixed seed reproduces a run
//! bit for bit. Everything downstream of seeding (assignment, recompute,
//! the tie rules) is deterministic on purpose.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Cap on assignment/recompute rounds when assignments keep oscillating.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// One cluster slot as produced by [`cluster`]. May be empty when input
/// vectors coincide; callers decide what empty slots mean.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCluster {
    /// Mean of the member vectors, or the seeded position if no vector
    /// was ever assigned.
    pub centroid: Vec<f64>,
    /// Indices into the input slice, in input order.
    pub members: Vec<usize>,
}

/// Runs k-means over `vectors`, returning one candidate per effective
/// cluster index. The effective cluster count is `k` clamped to the number
/// of vectors; an empty input or `k == 0` yields no clusters.
///
/// All vectors must share one dimensionality. `Some(seed)` makes the run
/// reproducible; `None` seeds from OS entropy.
pub fn cluster(
    vectors: &[Vec<f64>],
    k: usize,
    max_iterations: usize,
    seed: Option<u64>,
) -> Vec<CandidateCluster> {
    if vectors.is_empty() || k == 0 {
        return Vec::new();
    }
    let effective_k = k.min(vectors.len());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut centroids = init_centroids(vectors, effective_k, &mut rng);
    let mut assignments = assign_all(vectors, &centroids);

    for iteration in 0..max_iterations {
        recompute_centroids(vectors, &assignments, &mut centroids);
        let next = assign_all(vectors, &centroids);
        if next == assignments {
            debug!("k-means converged after {} iterations", iteration + 1);
            break;
        }
        assignments = next;
    }
    // Keep centroids in step with the final assignment, also when the
    // iteration cap cut the loop short.
    recompute_centroids(vectors, &assignments, &mut centroids);

    let mut clusters: Vec<CandidateCluster> = centroids
        .into_iter()
        .map(|centroid| CandidateCluster {
            centroid,
            members: Vec::new(),
        })
        .collect();
    for (index, &assignment) in assignments.iter().enumerate() {
        clusters[assignment].members.push(index);
    }
    clusters
}

/// Squared euclidean distance. Callers only ever compare distances or sum
/// them for sampling weights, so the square root is never needed.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// k-means++ seeding: first centroid uniform, each further centroid drawn
/// with probability proportional to its squared distance from the nearest
/// already-chosen centroid.
fn init_centroids(vectors: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    let first = rng.random_range(0..vectors.len());
    centroids.push(vectors[first].clone());

    while centroids.len() < k {
        let distances: Vec<f64> = vectors
            .iter()
            .map(|vector| {
                centroids
                    .iter()
                    .map(|centroid| squared_distance(vector, centroid))
                    .fold(f64::MAX, f64::min)
            })
            .collect();

        let total: f64 = distances.iter().sum();
        if total == 0.0 {
            // Every vector coincides with a chosen centroid; any pick works.
            let index = rng.random_range(0..vectors.len());
            centroids.push(vectors[index].clone());
            continue;
        }

        let threshold = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut selected = vectors.len() - 1;
        for (index, distance) in distances.iter().enumerate() {
            cumulative += distance;
            if cumulative >= threshold {
                selected = index;
                break;
            }
        }
        centroids.push(vectors[selected].clone());
    }

    centroids
}

fn assign_all(vectors: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    vectors
        .iter()
        .map(|vector| nearest_centroid(vector, centroids))
        .collect()
}

/// Index of the closest centroid. Exact distance ties go to the lower
/// index; the explicit loop with a strict comparison guarantees that,
/// where iterator min-by helpers would keep the last minimum instead.
fn nearest_centroid(vector: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = squared_distance(vector, &centroids[0]);
    for (index, centroid) in centroids.iter().enumerate().skip(1) {
        let distance = squared_distance(vector, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Moves each centroid to the mean of its assigned vectors. A centroid
/// whose cluster emptied keeps its previous position; drawing a fresh
/// random one here would make seeded runs non-reproducible.
fn recompute_centroids(vectors: &[Vec<f64>], assignments: &[usize], centroids: &mut [Vec<f64>]) {
    let dimensions = vectors[0].len();
    let mut sums = vec![vec![0.0; dimensions]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (vector, &assignment) in vectors.iter().zip(assignments) {
        counts[assignment] += 1;
        for (dimension, value) in vector.iter().enumerate() {
            sums[assignment][dimension] += value;
        }
    }

    for (index, sum) in sums.into_iter().enumerate() {
        if counts[index] > 0 {
            centroids[index] = sum
                .into_iter()
                .map(|value| value / counts[index] as f64)
                .collect();
        }
    }
}
