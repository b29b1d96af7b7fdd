//! Graph analytics: centrality metrics and the execution planner.

pub mod centrality;
pub mod plan;
