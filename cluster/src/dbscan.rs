use std::collections::VecDeque;

use featcov_vecsim::{check_dimensions, cosine_similarity_unchecked, IdentifiedVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::{Cluster, Clustering};
use crate::error::ClusterError;

/// Default neighbourhood radius: cosine distance 0.15, roughly 85% similarity.
pub const DEFAULT_EPSILON: f64 = 0.15;

/// Default minimum neighbourhood size (the point itself counts).
pub const DEFAULT_MIN_POINTS: usize = 2;

const UNDEFINED: i32 = 0;
const NOISE: i32 = -1;

/// Parameters for density clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParams {
    /// Maximum cosine distance (1 - cosine_similarity) for two points to be
    /// neighbours.
    pub epsilon: f64,

    /// Minimum points within `epsilon`, including the point itself, for a
    /// core point. With 1 every point is core and isolated points (zero
    /// vectors included) come back as singleton clusters.
    pub min_points: usize,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl DensityParams {
    fn validate(&self) -> Result<(), ClusterError> {
        if !(self.epsilon >= 0.0) {
            return Err(ClusterError::InvalidParameter {
                name: "epsilon",
                value: self.epsilon,
            });
        }
        if self.min_points == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "min_points",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Groups items with DBSCAN over cosine distance.
///
/// Clusters come back in discovery order. Noise points are listed in
/// [`Clustering::unclustered`] and never form a cluster of their own.
pub fn cluster_density(
    items: &[IdentifiedVector],
    params: &DensityParams,
) -> Result<Clustering, ClusterError> {
    params.validate()?;
    check_dimensions(items)?;

    let vectors: Vec<&[f32]> = items.iter().map(IdentifiedVector::as_slice).collect();
    let Labeling { labels, enqueued } = dbscan(&vectors, params.epsilon, params.min_points);

    let max_label = labels.iter().copied().filter(|&l| l > 0).max().unwrap_or(0);
    let mut groups: Vec<Vec<String>> = vec![Vec::new(); max_label as usize];
    let mut noise = Vec::new();
    for (item, &label) in items.iter().zip(&labels) {
        if label > 0 {
            groups[(label - 1) as usize].push(item.id.clone());
        } else {
            noise.push(item.id.clone());
        }
    }

    debug!(
        points = items.len(),
        clusters = groups.len(),
        noise = noise.len(),
        enqueued,
        epsilon = params.epsilon,
        min_points = params.min_points,
        "density clustering done"
    );

    Ok(Clustering {
        clusters: groups.into_iter().map(Cluster::new).collect(),
        unclustered: noise,
    })
}

/// Per-point labels: `NOISE`, or the 1-based cluster number in the order
/// clusters were started.
pub(crate) struct Labeling {
    pub labels: Vec<i32>,
    /// Points that went through the expansion queue. Never exceeds the
    /// number of points.
    pub enqueued: usize,
}

/// DBSCAN over cosine distance.
///
/// A point enters the expansion queue at most once over the whole run:
/// it is flagged when pushed and receives its final label when popped.
pub(crate) fn dbscan(vectors: &[&[f32]], eps: f64, min_pts: usize) -> Labeling {
    let n = vectors.len();
    let mut labels = vec![UNDEFINED; n];
    let mut queued = vec![false; n];
    let mut frontier = VecDeque::new();
    let mut enqueued = 0;
    let mut current = 0;

    for start in 0..n {
        if labels[start] != UNDEFINED {
            continue;
        }
        let reach = range_query(vectors, start, eps);
        if reach.len() < min_pts {
            labels[start] = NOISE;
            continue;
        }

        current += 1;
        labels[start] = current;
        enqueued += claim(&reach, &labels, &mut queued, &mut frontier);

        while let Some(p) = frontier.pop_front() {
            let border = labels[p] == NOISE;
            labels[p] = current;
            // Known non-core: joins, never expands.
            if border {
                continue;
            }
            let reach = range_query(vectors, p, eps);
            if reach.len() >= min_pts {
                enqueued += claim(&reach, &labels, &mut queued, &mut frontier);
            }
        }
    }

    Labeling { labels, enqueued }
}

/// Queues the unlabelled or noise points of `reach` not queued before.
fn claim(
    reach: &[usize],
    labels: &[i32],
    queued: &mut [bool],
    frontier: &mut VecDeque<usize>,
) -> usize {
    let mut added = 0;
    for &j in reach {
        if queued[j] || labels[j] > 0 {
            continue;
        }
        queued[j] = true;
        frontier.push_back(j);
        added += 1;
    }
    added
}

/// Indices within `eps` cosine distance of `vectors[idx]`. The point itself
/// always counts, zero vectors included.
fn range_query(vectors: &[&[f32]], idx: usize, eps: f64) -> Vec<usize> {
    let q = vectors[idx];
    (0..vectors.len())
        .filter(|&j| j == idx || 1.0 - cosine_similarity_unchecked(q, vectors[j]) <= eps)
        .collect()
}
