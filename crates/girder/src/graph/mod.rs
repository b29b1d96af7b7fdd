//! Dependency graph construction over an issue snapshot.
//!
//! The graph is a derived, read-only view: it is rebuilt fresh for every
//! computation and never mutated in place.
//!
//! # Graph Representation and Edge Direction Convention
//!
//! The graph uses petgraph's `DiGraph` with edges directed from
//! **dependent to dependency** (source -> target means source depends on
//! target). Nodes carry [`IssueId`] values and are added in input order, so
//! node indices are stable for a fixed snapshot ordering - several consumers
//! rely on this for deterministic iteration.
//!
//! # Sanitization
//!
//! Construction silently filters, in this order:
//!
//! - **duplicate issue ids**: the first record wins; later records contribute
//!   no node and their edges are ignored
//! - **dangling edges**: targets absent from the snapshot
//! - **self-loops**: an issue depending on itself contributes no path and no
//!   force, so it never enters the adjacency
//! - **duplicate edges**: at most one edge per (owner, target, kind) triple,
//!   so duplicates cannot double-count in centrality or force magnitude
//!
//! None of these raise an error; the filtering is deterministic and must stay
//! that way for output parity across runs.

use crate::domain::{DependencyKind, Issue, IssueId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Read-only dependency graph derived from one snapshot.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Dependency graph using petgraph.
    ///
    /// Nodes contain `IssueId` values, edges contain `DependencyKind`.
    /// Edge direction: source (dependent) -> target (dependency).
    graph: DiGraph<IssueId, DependencyKind>,

    /// Mapping from IssueId to graph NodeIndex.
    node_map: HashMap<IssueId, NodeIndex>,

    /// Issue ids in input order. `ids[i]` is the id of node index `i`.
    ids: Vec<IssueId>,
}

impl DependencyGraph {
    /// Build the graph for a snapshot, applying the module-level
    /// sanitization rules.
    pub fn build(issues: &[Issue]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<IssueId, NodeIndex> = HashMap::new();
        let mut ids = Vec::with_capacity(issues.len());
        let mut accepted = vec![false; issues.len()];

        for (i, issue) in issues.iter().enumerate() {
            if node_map.contains_key(&issue.id) {
                continue;
            }
            let idx = graph.add_node(issue.id.clone());
            node_map.insert(issue.id.clone(), idx);
            ids.push(issue.id.clone());
            accepted[i] = true;
        }

        let mut seen: HashSet<(NodeIndex, NodeIndex, DependencyKind)> = HashSet::new();
        for (i, issue) in issues.iter().enumerate() {
            if !accepted[i] {
                continue;
            }
            let from = node_map[&issue.id];
            for dep in &issue.dependencies {
                let Some(&to) = node_map.get(&dep.depends_on_id) else {
                    continue;
                };
                if to == from {
                    continue;
                }
                if !seen.insert((from, to, dep.kind)) {
                    continue;
                }
                graph.add_edge(from, to, dep.kind);
            }
        }

        tracing::debug!(
            nodes = ids.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        Self {
            graph,
            node_map,
            ids,
        }
    }

    /// Number of issues in the graph.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of surviving (sanitized) edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the snapshot was empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Issue ids in input order; the position of an id is its stable node
    /// index.
    pub fn ids(&self) -> &[IssueId] {
        &self.ids
    }

    /// Stable node index for an id, if the issue exists in the snapshot.
    pub fn index_of(&self, id: &IssueId) -> Option<usize> {
        self.node_map.get(id).map(|idx| idx.index())
    }

    /// Forward adjacency by stable node index: `adj[v]` lists the
    /// dependencies of `v`, in edge insertion order. Restricted to `kind`
    /// when given.
    pub fn forward_adjacency(&self, kind: Option<DependencyKind>) -> Vec<Vec<usize>> {
        self.adjacency(Direction::Outgoing, kind)
    }

    /// Reverse adjacency by stable node index: `adj[v]` lists the dependents
    /// of `v`, in edge insertion order. Restricted to `kind` when given.
    pub fn reverse_adjacency(&self, kind: Option<DependencyKind>) -> Vec<Vec<usize>> {
        self.adjacency(Direction::Incoming, kind)
    }

    fn adjacency(&self, direction: Direction, kind: Option<DependencyKind>) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.ids.len()];
        for edge in self.graph.edge_references() {
            if let Some(k) = kind {
                if *edge.weight() != k {
                    continue;
                }
            }
            match direction {
                Direction::Outgoing => adj[edge.source().index()].push(edge.target().index()),
                Direction::Incoming => adj[edge.target().index()].push(edge.source().index()),
            }
        }
        adj
    }

    /// Undirected connected component label per node, both edge kinds.
    ///
    /// Labels are renumbered contiguously from 0 in order of each
    /// component's earliest node index, so component numbering follows the
    /// input ordering of the snapshot.
    pub fn components(&self) -> Vec<usize> {
        let mut uf: UnionFind<usize> = UnionFind::new(self.ids.len());
        for edge in self.graph.edge_references() {
            uf.union(edge.source().index(), edge.target().index());
        }
        let labeling = uf.into_labeling();

        let mut renumber: HashMap<usize, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(labeling.len());
        for representative in labeling {
            let next = renumber.len();
            let label = *renumber.entry(representative).or_insert(next);
            labels.push(label);
        }
        labels
    }
}
