//! Seeded k-means clustering.
//!
//! k-means++ seeding over the input points followed by Lloyd
//! iterations. The RNG is seeded from the config, so the same inputs
//! always produce the same centroids.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_K: usize = 5;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansConfig {
    pub k: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    pub centroids: Vec<Vec<f64>>,

    /// Cluster index per input point.
    pub assignments: Vec<usize>,

    pub iterations: usize,
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest centroid. Ties go to the lowest index.
pub fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(point, centroid);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// k-means++ seeding. Once every point coincides with a chosen centroid,
/// the remaining seeds are drawn uniformly, so identical points still
/// yield `k` (duplicate) centroids.
fn seed_centroids(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| squared_distance(p, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            centroids.push(points[rng.gen_range(0..points.len())].clone());
            continue;
        }

        let target = rng.gen::<f64>() * total;
        let mut acc = 0.0;
        let mut chosen = None;
        for (idx, w) in weights.iter().enumerate() {
            acc += w;
            if *w > 0.0 && target < acc {
                chosen = Some(idx);
                break;
            }
        }
        // Float rounding can leave target == total; take the last weighted point.
        let idx = chosen
            .or_else(|| weights.iter().rposition(|w| *w > 0.0))
            .unwrap_or(0);
        centroids.push(points[idx].clone());
    }
    centroids
}

fn recompute_centroids(
    points: &[Vec<f64>],
    assignments: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let dims = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dims]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (point, cluster) in points.iter().zip(assignments) {
        counts[*cluster] += 1;
        for (s, x) in sums[*cluster].iter_mut().zip(point) {
            *s += x;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

/// Cluster `points` into at most `config.k` groups.
///
/// `k` is reduced to the number of points, so fewer reference decks than
/// `k` yield one centroid per deck. Identical points may share a centroid
/// value; assignment ties go to the lowest index. Empty input yields an
/// empty result.
pub fn kmeans(points: &[Vec<f64>], config: &KMeansConfig) -> KMeansResult {
    let k = config.k.min(points.len());
    if k == 0 {
        return KMeansResult {
            centroids: Vec::new(),
            assignments: Vec::new(),
            iterations: 0,
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut centroids = seed_centroids(points, k, &mut rng);
    let mut assignments: Vec<usize> = Vec::new();
    let mut iterations = 0;

    while iterations < config.max_iterations.max(1) {
        iterations += 1;
        let next: Vec<usize> = points
            .iter()
            .map(|p| nearest_centroid(p, &centroids).unwrap_or(0))
            .collect();

        if next == assignments {
            break;
        }
        assignments = next;
        centroids = recompute_centroids(points, &assignments, &centroids);
    }

    log::debug!(
        "k-means converged: k={}, points={}, iterations={}",
        centroids.len(),
        points.len(),
        iterations
    );

    KMeansResult {
        centroids,
        assignments,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.0],
            vec![10.0, 10.1],
        ]
    }

    #[test]
    fn test_two_blobs_separate() {
        let result = kmeans(&blobs(), &KMeansConfig { k: 2, ..Default::default() });
        assert_eq!(result.centroids.len(), 2);
        assert_eq!(result.assignments[0], result.assignments[1]);
        assert_eq!(result.assignments[0], result.assignments[2]);
        assert_eq!(result.assignments[3], result.assignments[4]);
        assert_ne!(result.assignments[0], result.assignments[3]);
    }

    #[test]
    fn test_k_reduced_to_point_count() {
        let points = vec![vec![0.0], vec![5.0], vec![9.0]];
        let result = kmeans(&points, &KMeansConfig::default());
        assert_eq!(result.centroids.len(), 3);
    }

    #[test]
    fn test_identical_points_keep_point_count() {
        let points = vec![vec![1.0, 1.0]; 3];
        let result = kmeans(&points, &KMeansConfig::default());
        assert_eq!(result.centroids.len(), 3);
        assert!(result.centroids.iter().all(|c| c == &vec![1.0, 1.0]));
        assert_eq!(result.assignments, vec![0, 0, 0]);
    }

    #[test]
    fn test_repeated_points_fill_k() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let result = kmeans(&points, &KMeansConfig::default());
        assert_eq!(result.centroids.len(), 3);
        assert!(result.centroids.contains(&vec![2.0, 2.0]));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let config = KMeansConfig { k: 3, ..Default::default() };
        assert_eq!(kmeans(&blobs(), &config), kmeans(&blobs(), &config));
    }

    #[test]
    fn test_empty_input() {
        let result = kmeans(&[], &KMeansConfig::default());
        assert!(result.centroids.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_nearest_centroid_ties_lowest_index() {
        let centroids = vec![vec![1.0], vec![-1.0]];
        assert_eq!(nearest_centroid(&[0.0], &centroids), Some(0));
        assert_eq!(nearest_centroid(&[-0.9], &centroids), Some(1));
        assert_eq!(nearest_centroid(&[0.0], &[]), None);
    }
}
