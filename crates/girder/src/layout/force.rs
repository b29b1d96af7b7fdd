//! The force simulation itself.

use super::{
    CANVAS_PADDING, COOLING_FACTOR, ForceLayout, HEADER_HEIGHT, LayoutEdge, LayoutNode,
    LayoutOptions, MIN_CANVAS_SIZE,
};
use crate::analysis::centrality::CentralityResult;
use crate::domain::{DependencyKind, Issue, IssueId};
use crate::error::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

/// Run the force-directed layout for a snapshot.
///
/// Pure function of its inputs: a fixed issue/edge ordering, centrality
/// result, and options (including seed) reproduce bit-identical
/// coordinates. Malformed edges are sanitized exactly as the dependency
/// graph does; the only error is an invalid option (negative values, or an
/// inverted radius range).
pub fn compute_force_layout(
    issues: &[Issue],
    centrality: &CentralityResult,
    options: LayoutOptions,
) -> Result<ForceLayout> {
    let resolved = options.resolve()?;

    // First record wins for duplicate ids, matching graph sanitization.
    let mut snapshot: Vec<&Issue> = Vec::with_capacity(issues.len());
    let mut index_of: HashMap<&IssueId, usize> = HashMap::new();
    for issue in issues {
        if index_of.contains_key(&issue.id) {
            continue;
        }
        index_of.insert(&issue.id, snapshot.len());
        snapshot.push(issue);
    }
    let n = snapshot.len();

    if n == 0 {
        return Ok(empty_layout(options.title, options.data_hash));
    }

    #[allow(clippy::cast_precision_loss)]
    let canvas_size = MIN_CANVAS_SIZE.max((n as f64).sqrt() * 200.0);

    let max_pagerank = snapshot
        .iter()
        .map(|issue| centrality.pagerank_of(&issue.id))
        .fold(0.0f64, f64::max);
    let pagerank_scale = if max_pagerank == 0.0 { 1.0 } else { max_pagerank };

    // Highest-ranked issue; strict comparison keeps the first on ties.
    let mut top_node: Option<IssueId> = None;
    let mut top_node_rank = 0.0f64;
    for issue in &snapshot {
        let rank = centrality.pagerank_of(&issue.id);
        if rank > top_node_rank {
            top_node_rank = rank;
            top_node = Some(issue.id.clone());
        }
    }

    // Initial scatter within the central 80% of the canvas, x then y per
    // node in snapshot order.
    let mut rng = ChaCha8Rng::seed_from_u64(resolved.seed);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let mut radii = Vec::with_capacity(n);
    for issue in &snapshot {
        let pagerank = centrality.pagerank_of(&issue.id);
        let importance =
            pagerank / pagerank_scale * 0.7 + centrality.betweenness_of(&issue.id) * 0.3;
        radii.push(
            resolved.min_node_size
                + importance * (resolved.max_node_size - resolved.min_node_size),
        );
        xs.push(canvas_size / 2.0 + (rng.random::<f64>() - 0.5) * canvas_size * 0.8);
        ys.push(canvas_size / 2.0 + (rng.random::<f64>() - 0.5) * canvas_size * 0.8);
    }

    // Rendered edges: deduped, endpoints must exist. Self-loops stay in the
    // list (renderers may draw them) but exert no force.
    let mut edges: Vec<LayoutEdge> = Vec::new();
    let mut springs: Vec<(usize, usize)> = Vec::new();
    let mut seen: HashSet<(usize, usize, DependencyKind)> = HashSet::new();
    for issue in &snapshot {
        let from = index_of[&issue.id];
        for dep in &issue.dependencies {
            let Some(&to) = index_of.get(&dep.depends_on_id) else {
                continue;
            };
            if !seen.insert((from, to, dep.kind)) {
                continue;
            }
            edges.push(LayoutEdge {
                from: issue.id.clone(),
                to: dep.depends_on_id.clone(),
                kind: dep.kind,
            });
            if from != to {
                springs.push((from, to));
            }
        }
    }

    let mut vxs = vec![0.0f64; n];
    let mut vys = vec![0.0f64; n];
    let mut temperature = canvas_size / 2.0;

    for _ in 0..resolved.iterations {
        for v in 0..n {
            vxs[v] = 0.0;
            vys[v] = 0.0;
        }

        // Repulsion between every ordered pair of distinct nodes.
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = xs[i] - xs[j];
                let dy = ys[i] - ys[j];
                let dist = (dx * dx + dy * dy).sqrt().max(1.0);
                let force = resolved.repel_force / (dist * dist);
                vxs[i] += dx / dist * force;
                vys[i] += dy / dist * force;
            }
        }

        // Spring attraction along edges, pulling both endpoints together.
        for &(a, b) in &springs {
            let dx = xs[b] - xs[a];
            let dy = ys[b] - ys[a];
            let dist = (dx * dx + dy * dy).sqrt().max(1.0);
            let force = dist * resolved.attract_force;
            vxs[a] += dx / dist * force;
            vys[a] += dy / dist * force;
            vxs[b] -= dx / dist * force;
            vys[b] -= dy / dist * force;
        }

        // Clamp displacement to the annealing temperature, damp, apply.
        for v in 0..n {
            let displacement = (vxs[v] * vxs[v] + vys[v] * vys[v]).sqrt();
            if displacement > temperature {
                vxs[v] = vxs[v] / displacement * temperature;
                vys[v] = vys[v] / displacement * temperature;
            }
            vxs[v] *= resolved.damping;
            vys[v] *= resolved.damping;
            xs[v] += vxs[v];
            ys[v] += vys[v];
        }

        temperature *= COOLING_FACTOR;
    }

    // Bounding box over node extents, padded on every side.
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for v in 0..n {
        min_x = min_x.min(xs[v] - radii[v]);
        max_x = max_x.max(xs[v] + radii[v]);
        min_y = min_y.min(ys[v] - radii[v]);
        max_y = max_y.max(ys[v] + radii[v]);
    }
    min_x -= CANVAS_PADDING;
    min_y -= CANVAS_PADDING;
    max_x += CANVAS_PADDING;
    max_y += CANVAS_PADDING;

    let width = max_x - min_x;
    let height = max_y - min_y + HEADER_HEIGHT;

    let mut nodes: Vec<LayoutNode> = snapshot
        .iter()
        .enumerate()
        .map(|(v, issue)| LayoutNode {
            id: issue.id.clone(),
            title: issue.title.clone(),
            status: issue.status,
            priority: issue.priority,
            pagerank: centrality.pagerank_of(&issue.id),
            x: xs[v] - min_x,
            y: ys[v] - min_y + HEADER_HEIGHT,
            radius: radii[v],
        })
        .collect();

    // Draw-order contract: ascending PageRank so high-rank nodes render on
    // top; id tiebreak keeps the order total.
    nodes.sort_by(|a, b| a.pagerank.total_cmp(&b.pagerank).then_with(|| a.id.cmp(&b.id)));

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        width,
        height,
        "computed force layout"
    );

    Ok(ForceLayout {
        nodes,
        edges,
        width,
        height,
        center_x: width / 2.0,
        center_y: height / 2.0,
        min_x: 0.0,
        max_x: width,
        min_y: 0.0,
        max_y: height,
        title: options.title,
        data_hash: options.data_hash,
        top_node,
        top_node_rank,
    })
}

/// Layout for an empty snapshot: no nodes or edges, canvas at the minimum
/// side length plus the header band.
fn empty_layout(title: String, data_hash: String) -> ForceLayout {
    let width = MIN_CANVAS_SIZE;
    let height = MIN_CANVAS_SIZE + HEADER_HEIGHT;
    ForceLayout {
        nodes: Vec::new(),
        edges: Vec::new(),
        width,
        height,
        center_x: width / 2.0,
        center_y: height / 2.0,
        min_x: 0.0,
        max_x: width,
        min_y: 0.0,
        max_y: height,
        title,
        data_hash,
        top_node: None,
        top_node_rank: 0.0,
    }
}
