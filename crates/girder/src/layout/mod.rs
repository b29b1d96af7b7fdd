//! Force-directed layout for dependency graph visualization.
//!
//! A Fruchterman-Reingold style simulation with simulated annealing: all
//! node pairs repel, edges attract, displacement is capped by a temperature
//! that cools geometrically each sweep. The random scatter of initial
//! positions comes from an explicit [`rand_chacha::ChaCha8Rng`] seeded per
//! call, so a fixed snapshot ordering and seed reproduce coordinates
//! byte-for-byte.
//!
//! Consumers render nodes in list order; the final node list is sorted by
//! ascending PageRank so higher-ranked nodes are drawn last and sit on top.
//! That ordering is part of the contract, not an implementation detail.

mod force;

pub use force::compute_force_layout;

use crate::domain::{DependencyKind, IssueId, IssueStatus};
use crate::error::{Error, Result};
use serde::Serialize;

pub(crate) const DEFAULT_ITERATIONS: i32 = 300;
pub(crate) const DEFAULT_REPEL_FORCE: f64 = 8000.0;
pub(crate) const DEFAULT_ATTRACT_FORCE: f64 = 0.015;
pub(crate) const DEFAULT_DAMPING: f64 = 0.85;
pub(crate) const DEFAULT_MIN_NODE_SIZE: f64 = 24.0;
pub(crate) const DEFAULT_MAX_NODE_SIZE: f64 = 60.0;
pub(crate) const DEFAULT_SEED: u64 = 42;

/// Geometric cooling factor applied to the annealing temperature after each
/// full sweep.
pub(crate) const COOLING_FACTOR: f64 = 0.97;

/// Padding added on every side of the final bounding box.
pub(crate) const CANVAS_PADDING: f64 = 100.0;

/// Vertical space reserved at the top of the canvas for a header region.
pub(crate) const HEADER_HEIGHT: f64 = 100.0;

/// Minimum canvas side length.
pub(crate) const MIN_CANVAS_SIZE: f64 = 800.0;

/// Configuration for the force simulation.
///
/// Numeric fields follow a zero-means-default convention: a field left at
/// zero (or `None` for the seed) takes the documented default, while
/// negative values are rejected as configuration errors rather than
/// silently coerced.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Number of simulation iterations (default 300).
    pub iterations: i32,

    /// Node repulsion strength (default 8000).
    pub repel_force: f64,

    /// Edge attraction strength (default 0.015).
    pub attract_force: f64,

    /// Velocity damping factor (default 0.85).
    pub damping: f64,

    /// Minimum node radius (default 24).
    pub min_node_size: f64,

    /// Maximum node radius (default 60).
    pub max_node_size: f64,

    /// RNG seed for initial node placement (default 42).
    pub seed: Option<u64>,

    /// Layout title, copied verbatim into the output.
    pub title: String,

    /// Snapshot content hash, copied verbatim into the output. See
    /// [`crate::fingerprint::snapshot_fingerprint`].
    pub data_hash: String,
}

/// Validated simulation parameters with defaults applied.
pub(crate) struct ResolvedOptions {
    pub(crate) iterations: usize,
    pub(crate) repel_force: f64,
    pub(crate) attract_force: f64,
    pub(crate) damping: f64,
    pub(crate) min_node_size: f64,
    pub(crate) max_node_size: f64,
    pub(crate) seed: u64,
}

impl LayoutOptions {
    pub(crate) fn resolve(&self) -> Result<ResolvedOptions> {
        if self.iterations < 0 {
            return Err(Error::InvalidOption(format!(
                "iterations must be non-negative, got {}",
                self.iterations
            )));
        }
        for (name, value) in [
            ("repel_force", self.repel_force),
            ("attract_force", self.attract_force),
            ("damping", self.damping),
            ("min_node_size", self.min_node_size),
            ("max_node_size", self.max_node_size),
        ] {
            if value < 0.0 {
                return Err(Error::InvalidOption(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        let min_node_size = default_if_zero(self.min_node_size, DEFAULT_MIN_NODE_SIZE);
        let max_node_size = default_if_zero(self.max_node_size, DEFAULT_MAX_NODE_SIZE);
        if min_node_size > max_node_size {
            return Err(Error::InvalidOption(format!(
                "min_node_size ({min_node_size}) exceeds max_node_size ({max_node_size})"
            )));
        }

        #[allow(clippy::cast_sign_loss)]
        let iterations = if self.iterations == 0 {
            DEFAULT_ITERATIONS as usize
        } else {
            self.iterations as usize
        };

        Ok(ResolvedOptions {
            iterations,
            repel_force: default_if_zero(self.repel_force, DEFAULT_REPEL_FORCE),
            attract_force: default_if_zero(self.attract_force, DEFAULT_ATTRACT_FORCE),
            damping: default_if_zero(self.damping, DEFAULT_DAMPING),
            min_node_size,
            max_node_size,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

fn default_if_zero(value: f64, default: f64) -> f64 {
    if value == 0.0 { default } else { value }
}

/// A positioned node in the computed layout.
///
/// Velocity is internal to the simulation and not exposed; positions are
/// only meaningful within one computed layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    /// Issue id.
    pub id: IssueId,

    /// Issue title.
    pub title: String,

    /// Issue status, for styling by renderers.
    pub status: IssueStatus,

    /// Issue priority.
    pub priority: u8,

    /// PageRank score used for sizing and draw order.
    pub pagerank: f64,

    /// Final x coordinate of the node center.
    pub x: f64,

    /// Final y coordinate of the node center.
    pub y: f64,

    /// Rendering radius, interpolated from structural importance.
    pub radius: f64,
}

/// A rendered edge in the layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutEdge {
    /// Owning (dependent) issue.
    pub from: IssueId,

    /// Target (dependency) issue.
    pub to: IssueId,

    /// Dependency kind, for styling by renderers.
    pub kind: DependencyKind,
}

/// The computed force-directed layout.
#[derive(Debug, Clone, Serialize)]
pub struct ForceLayout {
    /// Nodes sorted by ascending PageRank (draw-order contract: later nodes
    /// render on top).
    pub nodes: Vec<LayoutNode>,

    /// Deduplicated edges whose endpoints exist in the snapshot.
    pub edges: Vec<LayoutEdge>,

    /// Canvas width.
    pub width: f64,

    /// Canvas height, including the header region.
    pub height: f64,

    /// Horizontal canvas center.
    pub center_x: f64,

    /// Vertical canvas center.
    pub center_y: f64,

    /// Minimum x of the canvas (always 0 after normalization).
    pub min_x: f64,

    /// Maximum x of the canvas.
    pub max_x: f64,

    /// Minimum y of the canvas (always 0 after normalization).
    pub min_y: f64,

    /// Maximum y of the canvas.
    pub max_y: f64,

    /// Title passed through from [`LayoutOptions`].
    pub title: String,

    /// Data hash passed through from [`LayoutOptions`].
    pub data_hash: String,

    /// Highest-PageRank issue, if the snapshot is non-empty and any rank is
    /// positive.
    pub top_node: Option<IssueId>,

    /// PageRank of `top_node` (0 when absent).
    pub top_node_rank: f64,
}

impl ForceLayout {
    /// Find a node by id.
    pub fn node(&self, id: &IssueId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}
