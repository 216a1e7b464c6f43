use super::index::ProjectContributors;
use crate::identity::{IdentityId, IdentityTable};
use crate::model::EdgeRow;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationEdge {
    pub from: IdentityId,
    pub to: IdentityId,
    pub weight: u32,
    projects: HashSet<String>,
}

impl CollaborationEdge {
    fn new(from: IdentityId, to: IdentityId, project: &str) -> Self {
        Self {
            from,
            to,
            weight: 1,
            projects: HashSet::from([project.to_string()]),
        }
    }

    fn add_project(&mut self, project: &str) {
        if self.projects.insert(project.to_string()) {
            self.weight += 1;
        }
    }

    #[cfg(test)]
    pub fn connects(&self, a: IdentityId, b: IdentityId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollaborationGraph {
    edges: Vec<CollaborationEdge>,
    keys: HashMap<(IdentityId, IdentityId), usize>,
}

impl CollaborationGraph {
    pub fn build(index: &[ProjectContributors]) -> Self {
        let mut graph = Self::default();
        for project in index {
            for &a in &project.contributors {
                for &b in &project.contributors {
                    if a != b {
                        graph.connect(a, b, &project.project);
                    }
                }
            }
        }
        graph
    }

    fn connect(&mut self, a: IdentityId, b: IdentityId, project: &str) {
        let existing = self
            .keys
            .get(&(a, b))
            .or_else(|| self.keys.get(&(b, a)))
            .copied();
        match existing {
            Some(pos) => self.edges[pos].add_project(project),
            None => {
                self.keys.insert((a, b), self.edges.len());
                self.edges.push(CollaborationEdge::new(a, b, project));
            }
        }
    }

    pub fn edges(&self) -> &[CollaborationEdge] {
        &self.edges
    }

    pub fn edge(&self, a: IdentityId, b: IdentityId) -> Option<&CollaborationEdge> {
        self.keys
            .get(&(a, b))
            .or_else(|| self.keys.get(&(b, a)))
            .map(|pos| &self.edges[*pos])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn rows(&self, identities: &IdentityTable) -> Vec<EdgeRow> {
        let mut rows: Vec<EdgeRow> = self
            .edges
            .iter()
            .map(|e| EdgeRow {
                from: identities.display(e.from).to_string(),
                to: identities.display(e.to).to_string(),
                weight: e.weight,
            })
            .collect();
        rows.sort_by(|a, b| b.weight.cmp(&a.weight));
        rows
    }
}
