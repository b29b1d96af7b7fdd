//! Execution planning: actionability, impact, and parallel track scheduling.
//!
//! The planner answers "what can be worked on right now?". An issue is
//! actionable when it is open or in progress and every live `Blocks`
//! dependency points at a closed issue. Actionable issues are grouped into
//! tracks: undirected connected components of the full dependency graph
//! (both edge kinds), so issues sharing any dependency lineage are scheduled
//! together while disjoint subgraphs are guaranteed parallelizable.
//!
//! All orderings are fully deterministic. Items within a track sort by
//! priority, then descending unblock count, then creation time, then id;
//! tracks sort the one holding the globally highest-impact item first, then
//! by most urgent priority, then by track number.

use crate::analysis::centrality::CentralityResult;
use crate::domain::{DependencyKind, Issue, IssueId, IssueStatus};
use crate::graph::DependencyGraph;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// One actionable issue within a track.
#[derive(Debug, Clone, Serialize)]
pub struct PlanItem {
    /// Issue id.
    pub id: IssueId,

    /// Issue priority (0 = critical, 4 = backlog).
    pub priority: u8,

    /// Issue title.
    pub title: String,

    /// Not-yet-closed issues transitively freed by completing this one,
    /// in snapshot order.
    pub unblocks: Vec<IssueId>,
}

/// A maximal group of actionable issues connected through any dependency
/// lineage. Distinct tracks can be worked fully in parallel.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    /// Track identifier, `track-N`.
    pub id: String,

    /// Human-readable description of the track. Presentation detail; the
    /// grouping rule is the contract.
    pub reason: String,

    /// Actionable issues in this track, in scheduling order.
    pub items: Vec<PlanItem>,
}

/// Plan-wide summary naming the single highest-impact actionable issue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanSummary {
    /// The actionable issue with the largest unblock count, if any issue is
    /// actionable at all.
    pub highest_impact: Option<IssueId>,

    /// Short description of why that issue leads the plan.
    pub impact_reason: String,

    /// Number of issues the highest-impact issue would unblock.
    pub unblocks_count: usize,
}

/// A concrete execution plan over one snapshot.
///
/// A plan with zero tracks is a valid state, not an error: all work is
/// blocked or complete.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    /// Parallel tracks, highest-impact first.
    pub tracks: Vec<Track>,

    /// Plan-wide summary.
    pub summary: PlanSummary,
}

/// Build an execution plan for a snapshot.
///
/// Pure function: the dependency graph is rebuilt from the issue list and
/// nothing is cached across calls. `centrality` feeds the per-track hub
/// description only; scheduling order never depends on it.
pub fn build_execution_plan(issues: &[Issue], centrality: &CentralityResult) -> ExecutionPlan {
    let graph = DependencyGraph::build(issues);
    if graph.is_empty() {
        return ExecutionPlan {
            tracks: Vec::new(),
            summary: PlanSummary::default(),
        };
    }

    // First record wins for duplicate ids, matching graph sanitization.
    let mut by_id: HashMap<&IssueId, &Issue> = HashMap::new();
    for issue in issues {
        by_id.entry(&issue.id).or_insert(issue);
    }

    let ids = graph.ids();
    let status_of: Vec<IssueStatus> = ids.iter().map(|id| by_id[id].status).collect();
    let blocks_forward = graph.forward_adjacency(Some(DependencyKind::Blocks));
    let blocks_reverse = graph.reverse_adjacency(Some(DependencyKind::Blocks));

    let actionable: Vec<bool> = (0..ids.len())
        .map(|v| {
            matches!(status_of[v], IssueStatus::Open | IssueStatus::InProgress)
                && blocks_forward[v]
                    .iter()
                    .all(|&target| status_of[target] == IssueStatus::Closed)
        })
        .collect();

    let components = graph.components();

    // Group actionable issues by component, keeping component numbering
    // (and hence track numbering) in snapshot order.
    let mut track_members: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut track_of_component: HashMap<usize, usize> = HashMap::new();
    for v in 0..ids.len() {
        if !actionable[v] {
            continue;
        }
        let next = track_members.len();
        let slot = *track_of_component.entry(components[v]).or_insert(next);
        if slot == track_members.len() {
            track_members.push((components[v], Vec::new()));
        }
        track_members[slot].1.push(v);
    }

    let mut tracks: Vec<TrackDraft> = track_members
        .into_iter()
        .enumerate()
        .map(|(number, (_, members))| {
            let mut items: Vec<ItemDraft> = members
                .into_iter()
                .map(|v| {
                    let issue = by_id[&ids[v]];
                    ItemDraft {
                        created_at: issue.created_at,
                        item: PlanItem {
                            id: issue.id.clone(),
                            priority: issue.priority,
                            title: issue.title.clone(),
                            unblocks: unblock_set(v, &blocks_reverse, &status_of)
                                .into_iter()
                                .map(|u| ids[u].clone())
                                .collect(),
                        },
                    }
                })
                .collect();

            items.sort_by(|a, b| {
                a.item
                    .priority
                    .cmp(&b.item.priority)
                    .then(b.item.unblocks.len().cmp(&a.item.unblocks.len()))
                    .then(a.created_at.cmp(&b.created_at))
                    .then(a.item.id.cmp(&b.item.id))
            });

            TrackDraft {
                number: number + 1,
                min_priority: items.iter().map(|i| i.item.priority).min().unwrap_or(u8::MAX),
                items: items.into_iter().map(|i| i.item).collect(),
            }
        })
        .collect();

    // Highest impact across all tracks: largest unblock count, ties broken
    // by priority, then id.
    let summary = summarize(&tracks);

    // Track order: the one holding the highest-impact item first, then most
    // urgent minimum priority, then track number.
    let leader = summary.highest_impact.clone();
    tracks.sort_by(|a, b| {
        let a_leads = a.contains(leader.as_ref());
        let b_leads = b.contains(leader.as_ref());
        b_leads
            .cmp(&a_leads)
            .then(a.min_priority.cmp(&b.min_priority))
            .then(a.number.cmp(&b.number))
    });

    let tracks: Vec<Track> = tracks
        .into_iter()
        .map(|draft| draft.into_track(centrality))
        .collect();

    tracing::debug!(
        tracks = tracks.len(),
        actionable = tracks.iter().map(|t| t.items.len()).sum::<usize>(),
        "built execution plan"
    );

    ExecutionPlan { tracks, summary }
}

/// Issues transitively freed by completing `v`: BFS over reverse `Blocks`
/// edges, neither collecting nor traversing closed issues (a closed
/// dependent is already satisfied and propagates nothing).
fn unblock_set(v: usize, blocks_reverse: &[Vec<usize>], status_of: &[IssueStatus]) -> Vec<usize> {
    let mut visited = vec![false; status_of.len()];
    visited[v] = true;
    let mut found = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(v);

    while let Some(current) = queue.pop_front() {
        for &dependent in &blocks_reverse[current] {
            if visited[dependent] || status_of[dependent] == IssueStatus::Closed {
                continue;
            }
            visited[dependent] = true;
            found.push(dependent);
            queue.push_back(dependent);
        }
    }

    found.sort_unstable();
    found
}

struct ItemDraft {
    created_at: DateTime<Utc>,
    item: PlanItem,
}

struct TrackDraft {
    number: usize,
    min_priority: u8,
    items: Vec<PlanItem>,
}

impl TrackDraft {
    fn contains(&self, id: Option<&IssueId>) -> bool {
        id.is_some_and(|id| self.items.iter().any(|item| &item.id == id))
    }

    fn into_track(self, centrality: &CentralityResult) -> Track {
        // The track's structural hub: highest PageRank among its items,
        // ties by id.
        let hub = self
            .items
            .iter()
            .map(|item| &item.id)
            .max_by(|a, b| {
                centrality
                    .pagerank_of(a)
                    .total_cmp(&centrality.pagerank_of(b))
                    .then_with(|| b.cmp(a))
            })
            .cloned();

        let noun = if self.items.len() == 1 { "item" } else { "items" };
        let reason = match hub {
            Some(hub) => format!("{} actionable {noun}; hub {hub}", self.items.len()),
            None => format!("{} actionable {noun}", self.items.len()),
        };

        Track {
            id: format!("track-{}", self.number),
            reason,
            items: self.items,
        }
    }
}

fn summarize(tracks: &[TrackDraft]) -> PlanSummary {
    let mut best: Option<&PlanItem> = None;
    for track in tracks {
        for item in &track.items {
            let better = match best {
                None => true,
                Some(current) => item
                    .unblocks
                    .len()
                    .cmp(&current.unblocks.len())
                    .then(current.priority.cmp(&item.priority))
                    .then(current.id.cmp(&item.id))
                    .is_gt(),
            };
            if better {
                best = Some(item);
            }
        }
    }

    match best {
        None => PlanSummary::default(),
        Some(item) => {
            let count = item.unblocks.len();
            let noun = if count == 1 { "issue" } else { "issues" };
            PlanSummary {
                highest_impact: Some(item.id.clone()),
                impact_reason: format!("unblocks {count} dependent {noun}"),
                unblocks_count: count,
            }
        }
    }
}
