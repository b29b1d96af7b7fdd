//! Girder - graph analytics and layout engine for issue dependency snapshots.
//!
//! Girder takes a snapshot of issues linked by typed dependency edges and
//! derives three read-only artifacts:
//!
//! - [`CentralityResult`]: structural importance metrics (PageRank and
//!   betweenness centrality) over the dependency graph.
//! - [`ExecutionPlan`]: what can be worked on right now, grouped into
//!   independent parallel tracks and ranked by downstream impact.
//! - [`ForceLayout`]: a deterministic 2D force-directed placement of the
//!   graph for visualization.
//!
//! The engine is pure and synchronous: every call recomputes from the full
//! snapshot, owns its working set for the duration of the call, and retains
//! nothing afterwards. Malformed input (dangling edges, self-loops, duplicate
//! edges or ids) is sanitized deterministically rather than rejected; the only
//! error surface is layout configuration validation.
//!
//! Rendering, report formatting, issue storage, and CLI parsing are the
//! caller's responsibility. Downstream consumers treat all three outputs as
//! read-only values.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod layout;

pub use analysis::centrality::{CentralityResult, compute_centrality};
pub use analysis::plan::{ExecutionPlan, PlanItem, PlanSummary, Track, build_execution_plan};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use layout::{ForceLayout, LayoutEdge, LayoutNode, LayoutOptions, compute_force_layout};
