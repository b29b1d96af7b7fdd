//! Content fingerprint for issue snapshots.
//!
//! Collaborators label derived artifacts (layouts, reports) with a hash of
//! the snapshot they were computed from; this module provides the canonical
//! producer so every consumer agrees on it. The fingerprint covers each
//! issue's identity, status, priority, update time, and dependency edges,
//! in input order - anything that can change a derived artifact.

use crate::domain::Issue;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Number of hex characters kept from the digest; enough for a label,
/// short enough to render in a header.
const FINGERPRINT_LEN: usize = 16;

/// Compute a stable hex fingerprint for a snapshot.
///
/// Suitable for [`crate::layout::LayoutOptions::data_hash`]. Deterministic
/// for a fixed issue ordering; the empty snapshot has a well-defined
/// fingerprint too.
pub fn snapshot_fingerprint(issues: &[Issue]) -> String {
    let mut hasher = Sha256::new();
    for issue in issues {
        hasher.update(issue.id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(issue.status.as_str().as_bytes());
        hasher.update([issue.priority]);
        hasher.update(issue.updated_at.to_rfc3339().as_bytes());
        for dep in &issue.dependencies {
            hasher.update(dep.depends_on_id.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(dep.kind.as_str().as_bytes());
        }
        hasher.update([0xffu8]);
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, DependencyKind, IssueId, IssueStatus};
    use chrono::{TimeZone, Utc};

    fn issue(id: &str) -> Issue {
        Issue {
            id: IssueId::new(id),
            title: format!("Issue {id}"),
            status: IssueStatus::Open,
            priority: 2,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
            dependencies: vec![],
        }
    }

    #[test]
    fn identical_snapshots_agree() {
        let a = vec![issue("g-1"), issue("g-2")];
        let b = vec![issue("g-1"), issue("g-2")];
        assert_eq!(snapshot_fingerprint(&a), snapshot_fingerprint(&b));
    }

    #[test]
    fn status_change_alters_fingerprint() {
        let a = vec![issue("g-1")];
        let mut b = vec![issue("g-1")];
        b[0].status = IssueStatus::Closed;
        assert_ne!(snapshot_fingerprint(&a), snapshot_fingerprint(&b));
    }

    #[test]
    fn added_edge_alters_fingerprint() {
        let a = vec![issue("g-1"), issue("g-2")];
        let mut b = vec![issue("g-1"), issue("g-2")];
        b[0].dependencies.push(Dependency {
            depends_on_id: IssueId::new("g-2"),
            kind: DependencyKind::Blocks,
        });
        assert_ne!(snapshot_fingerprint(&a), snapshot_fingerprint(&b));
    }

    #[test]
    fn fingerprint_is_label_sized() {
        assert_eq!(snapshot_fingerprint(&[]).len(), FINGERPRINT_LEN);
    }
}
