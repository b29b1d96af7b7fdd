//! PageRank and betweenness centrality over the dependency graph.
//!
//! PageRank operates on the *reverse* adjacency: an issue's rank flows from
//! the issues that depend on it, so a high rank means "many things would be
//! unblocked, transitively, if this issue mattered". Betweenness uses
//! Brandes' algorithm over the directed, unweighted forward graph and
//! measures how often an issue sits on shortest dependency paths.
//!
//! Both metrics are pure functions of the graph. All iteration happens by
//! stable node index, never hash-map order, so results are deterministic for
//! a fixed issue/edge ordering.

use crate::domain::IssueId;
use crate::graph::DependencyGraph;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Damping factor: probability of following a dependency edge rather than
/// restarting at a uniformly random issue.
const DAMPING: f64 = 0.85;

/// Convergence threshold on the maximum per-node rank change.
const CONVERGENCE_EPSILON: f64 = 1e-6;

/// Iteration cap when convergence is slow.
const MAX_ITERATIONS: usize = 100;

/// Centrality scores per issue.
///
/// `pagerank` is non-negative and sums to 1 across all issues; `betweenness`
/// is normalized to `[0, 1]`. Issues with no edges score the uniform
/// PageRank floor and zero betweenness.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CentralityResult {
    /// PageRank score per issue id.
    pub pagerank: HashMap<IssueId, f64>,

    /// Betweenness centrality per issue id.
    pub betweenness: HashMap<IssueId, f64>,
}

impl CentralityResult {
    /// PageRank score for an id, 0 if unknown.
    pub fn pagerank_of(&self, id: &IssueId) -> f64 {
        self.pagerank.get(id).copied().unwrap_or(0.0)
    }

    /// Betweenness score for an id, 0 if unknown.
    pub fn betweenness_of(&self, id: &IssueId) -> f64 {
        self.betweenness.get(id).copied().unwrap_or(0.0)
    }
}

/// Compute PageRank and betweenness centrality for a dependency graph.
///
/// Pure function: no state persists between calls. An empty graph yields
/// empty maps.
pub fn compute_centrality(graph: &DependencyGraph) -> CentralityResult {
    if graph.is_empty() {
        return CentralityResult::default();
    }

    let forward = graph.forward_adjacency(None);
    let reverse = graph.reverse_adjacency(None);

    let pagerank = pagerank_scores(&forward, &reverse);
    let betweenness = betweenness_scores(&forward);

    let ids = graph.ids();
    CentralityResult {
        pagerank: ids.iter().cloned().zip(pagerank).collect(),
        betweenness: ids.iter().cloned().zip(betweenness).collect(),
    }
}

/// Power iteration with uniform redistribution of dangling rank mass.
///
/// Issues with no outgoing (non-self) edges would leak rank out of the
/// system; their mass is spread uniformly across all N issues each
/// iteration. The final vector is renormalized so ranks sum to exactly 1.
fn pagerank_scores(forward: &[Vec<usize>], reverse: &[Vec<usize>]) -> Vec<f64> {
    let n = forward.len();
    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;

    let out_degree: Vec<usize> = forward.iter().map(Vec::len).collect();
    let base = (1.0 - DAMPING) / n_f;
    let mut ranks = vec![1.0 / n_f; n];

    for iteration in 0..MAX_ITERATIONS {
        let dangling_mass: f64 = (0..n)
            .filter(|&v| out_degree[v] == 0)
            .map(|v| ranks[v])
            .sum();
        let dangling_share = DAMPING * dangling_mass / n_f;

        let mut next = vec![0.0; n];
        let mut max_delta = 0.0f64;
        for v in 0..n {
            let mut rank = base + dangling_share;
            for &u in &reverse[v] {
                #[allow(clippy::cast_precision_loss)]
                let share = ranks[u] / out_degree[u] as f64;
                rank += DAMPING * share;
            }
            max_delta = max_delta.max((rank - ranks[v]).abs());
            next[v] = rank;
        }
        ranks = next;

        if max_delta < CONVERGENCE_EPSILON {
            tracing::debug!(iteration, "pagerank converged");
            break;
        }
    }

    let total: f64 = ranks.iter().sum();
    if total > 0.0 {
        for rank in &mut ranks {
            *rank /= total;
        }
    }
    ranks
}

/// Brandes' algorithm: one BFS pass per source accumulating pair
/// dependencies, normalized by (N-1)(N-2) for a directed graph so scores lie
/// in `[0, 1]`. Graphs with fewer than three nodes have no interior vertex
/// on any path and score uniformly zero.
fn betweenness_scores(forward: &[Vec<usize>]) -> Vec<f64> {
    let n = forward.len();
    let mut scores = vec![0.0; n];
    if n < 3 {
        return scores;
    }

    for source in 0..n {
        // Nodes in order of non-decreasing distance from the source.
        let mut stack: Vec<usize> = Vec::new();
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut num_paths = vec![0.0f64; n];
        num_paths[source] = 1.0;
        let mut distance = vec![-1i64; n];
        distance[source] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &forward[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    num_paths[w] += num_paths[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies backwards from the farthest nodes.
        let mut dependency = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                dependency[v] += (num_paths[v] / num_paths[w]) * (1.0 + dependency[w]);
            }
            if w != source {
                scores[w] += dependency[w];
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let norm = ((n - 1) * (n - 2)) as f64;
    for score in &mut scores {
        *score /= norm;
    }
    scores
}
