use super::graph::CollaborationGraph;
use crate::identity::{IdentityId, IdentityTable};
use crate::model::{IdentityMetric, NetworkIndices};
use std::collections::HashMap;

pub fn identity_metrics(
    graph: &CollaborationGraph,
    projects: &HashMap<IdentityId, u32>,
    identities: &IdentityTable,
) -> Vec<IdentityMetric> {
    let mut order: Vec<IdentityId> = Vec::new();
    let mut degree: HashMap<IdentityId, u32> = HashMap::new();

    for edge in graph.edges() {
        for id in [edge.from, edge.to] {
            let count = degree.entry(id).or_insert_with(|| {
                order.push(id);
                0
            });
            *count += 1;
        }
    }

    let mut rows: Vec<IdentityMetric> = order
        .into_iter()
        .map(|id| IdentityMetric {
            identity: identities.display(id).to_string(),
            projects_count: projects.get(&id).copied().unwrap_or(0),
            connections_count: degree[&id],
        })
        .collect();
    rows.sort_by(|a, b| b.connections_count.cmp(&a.connections_count));
    rows
}

pub fn network_indices(rows: &[IdentityMetric]) -> NetworkIndices {
    let connections: Vec<u32> = rows.iter().map(|r| r.connections_count).collect();
    let projects: Vec<u32> = rows.iter().map(|r| r.projects_count).collect();
    NetworkIndices {
        c_index: generalized_h_index(&connections),
        p_index: generalized_h_index(&projects),
    }
}

/// h-index variant anchored at rank 0.
///
/// Walking the values in descending order, the first rank equal to its value
/// wins; if a value drops below its rank the previous rank wins. A walk that
/// never stops yields 0.
pub fn generalized_h_index(values: &[u32]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    for (rank, &value) in sorted.iter().enumerate() {
        let value = value as usize;
        if value == rank {
            return rank;
        }
        if value < rank {
            return rank - 1;
        }
    }
    0
}
