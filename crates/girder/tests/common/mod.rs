//! Shared fixtures for girder integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use girder::domain::{Dependency, DependencyKind, Issue, IssueId, IssueStatus};

/// Build a bare issue with a fixed creation date.
pub fn issue(id: &str, status: IssueStatus, priority: u8) -> Issue {
    Issue {
        id: IssueId::new(id),
        title: format!("Issue {id}"),
        status,
        priority,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        dependencies: vec![],
    }
}

/// Append a dependency edge to an issue.
pub fn with_dep(mut issue: Issue, target: &str, kind: DependencyKind) -> Issue {
    issue.dependencies.push(Dependency {
        depends_on_id: IssueId::new(target),
        kind,
    });
    issue
}

/// Append a `Blocks` dependency.
pub fn blocks(issue: Issue, target: &str) -> Issue {
    with_dep(issue, target, DependencyKind::Blocks)
}

/// Append a `Related` dependency.
pub fn related(issue: Issue, target: &str) -> Issue {
    with_dep(issue, target, DependencyKind::Related)
}

/// Shift the creation date to a given day of January 2026, for tiebreak
/// tests.
pub fn created_on(mut issue: Issue, day: u32) -> Issue {
    issue.created_at = Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap();
    issue
}

/// Install a tracing subscriber honoring `RUST_LOG`; safe to call from
/// multiple tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
