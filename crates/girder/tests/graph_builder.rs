//! Integration tests for dependency graph construction and sanitization.

mod common;

use common::{blocks, issue, related};
use girder::domain::{DependencyKind, IssueId, IssueStatus};
use girder::graph::DependencyGraph;

#[test]
fn nodes_follow_input_order() {
    let issues = vec![
        issue("b", IssueStatus::Open, 2),
        issue("a", IssueStatus::Open, 2),
        issue("c", IssueStatus::Open, 2),
    ];
    let graph = DependencyGraph::build(&issues);

    assert_eq!(graph.node_count(), 3);
    let ids: Vec<&str> = graph.ids().iter().map(IssueId::as_str).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(graph.index_of(&IssueId::new("a")), Some(1));
    assert_eq!(graph.index_of(&IssueId::new("missing")), None);
}

#[test]
fn dangling_edges_are_filtered() {
    let issues = vec![blocks(issue("a", IssueStatus::Open, 2), "ghost")];
    let graph = DependencyGraph::build(&issues);

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn self_loops_are_filtered() {
    let issues = vec![blocks(issue("a", IssueStatus::Open, 2), "a")];
    let graph = DependencyGraph::build(&issues);

    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn duplicate_edges_are_deduplicated_per_kind() {
    let a = blocks(
        blocks(related(issue("a", IssueStatus::Open, 2), "b"), "b"),
        "b",
    );
    let issues = vec![a, issue("b", IssueStatus::Open, 2)];
    let graph = DependencyGraph::build(&issues);

    // One Blocks edge and one Related edge survive.
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(
        graph.forward_adjacency(Some(DependencyKind::Blocks))[0],
        vec![1]
    );
    assert_eq!(
        graph.forward_adjacency(Some(DependencyKind::Related))[0],
        vec![1]
    );
}

#[test]
fn duplicate_issue_ids_keep_first_record() {
    let issues = vec![
        issue("a", IssueStatus::Open, 2),
        blocks(issue("a", IssueStatus::Closed, 0), "b"),
        issue("b", IssueStatus::Open, 2),
    ];
    let graph = DependencyGraph::build(&issues);

    assert_eq!(graph.node_count(), 2);
    // The later duplicate's edges are ignored.
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn reverse_adjacency_mirrors_forward() {
    let issues = vec![
        blocks(issue("a", IssueStatus::Open, 2), "b"),
        issue("b", IssueStatus::Open, 2),
    ];
    let graph = DependencyGraph::build(&issues);

    assert_eq!(graph.forward_adjacency(None)[0], vec![1]);
    assert_eq!(graph.reverse_adjacency(None)[1], vec![0]);
    assert!(graph.forward_adjacency(None)[1].is_empty());
}

#[test]
fn components_span_both_edge_kinds() {
    let issues = vec![
        blocks(issue("a", IssueStatus::Open, 2), "b"),
        related(issue("b", IssueStatus::Open, 2), "c"),
        issue("c", IssueStatus::Open, 2),
        issue("d", IssueStatus::Open, 2),
    ];
    let graph = DependencyGraph::build(&issues);

    let labels = graph.components();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_ne!(labels[0], labels[3]);
    // Numbering follows input order.
    assert_eq!(labels[0], 0);
    assert_eq!(labels[3], 1);
}

#[test]
fn empty_snapshot_builds_empty_graph() {
    let graph = DependencyGraph::build(&[]);
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.components().is_empty());
}
