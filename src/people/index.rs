use crate::identity::{IdentityId, IdentityTable};
use crate::model::ContributorProjectLink;
use crate::window::RecencyWindow;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContributors {
    pub project: String,
    pub contributors: Vec<IdentityId>,
}

/// A link counts when its latest commit date falls inside the window, so two
/// people are credited as collaborating even if their commits to the shared
/// project were far apart.
pub fn project_contributors(
    links: &[ContributorProjectLink],
    identities: &mut IdentityTable,
    window: &RecencyWindow,
    days: i64,
) -> Vec<ProjectContributors> {
    let mut projects: Vec<ProjectContributors> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for link in links {
        if !window.is_recent(&link.latest_commit_date, days) {
            continue;
        }
        let id = identities.intern(&link.contributor);
        let pos = *positions.entry(link.project.as_str()).or_insert_with(|| {
            projects.push(ProjectContributors {
                project: link.project.clone(),
                contributors: Vec::new(),
            });
            projects.len() - 1
        });
        let entry = &mut projects[pos];
        if !entry.contributors.contains(&id) {
            entry.contributors.push(id);
        }
    }

    projects
}

pub fn projects_per_identity(index: &[ProjectContributors]) -> HashMap<IdentityId, u32> {
    let mut counts: HashMap<IdentityId, u32> = HashMap::new();
    for project in index {
        for id in &project.contributors {
            *counts.entry(*id).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::tests::{link, today};
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_first_seen_order_and_drops_stale_links() {
        let links = vec![
            link("b@x.com", "Beta", "2024-06-20"),
            link("a@x.com", "Alpha", "2024-06-25"),
            link("c@x.com", "Beta", "2023-01-01"),
            link("a@x.com", "Beta", "2024-06-01"),
        ];
        let mut ids = IdentityTable::new();
        let index = project_contributors(&links, &mut ids, &today(), 30);

        let names: Vec<_> = index.iter().map(|p| p.project.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
        let beta: Vec<_> = index[0].contributors.iter().map(|id| ids.display(*id)).collect();
        assert_eq!(beta, vec!["b@x.com", "a@x.com"]);
    }

    #[test]
    fn duplicate_and_case_variant_links_collapse() {
        let links = vec![
            link("a@x.com", "Alpha", "2024-06-25"),
            link("A@X.com", "Alpha", "2024-06-25"),
            link("a@x.com", "Alpha", "2024-06-25"),
        ];
        let mut ids = IdentityTable::new();
        let index = project_contributors(&links, &mut ids, &today(), 30);
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].contributors.len(), 1);
    }

    #[test]
    fn counts_projects_per_identity() {
        let links = vec![
            link("a@x.com", "Alpha", "2024-06-25"),
            link("a@x.com", "Beta", "2024-06-25"),
            link("b@x.com", "Beta", "2024-06-25"),
        ];
        let mut ids = IdentityTable::new();
        let index = project_contributors(&links, &mut ids, &today(), 30);
        let counts = projects_per_identity(&index);
        assert_eq!(counts[&ids.lookup("a@x.com").unwrap()], 2);
        assert_eq!(counts[&ids.lookup("b@x.com").unwrap()], 1);
    }
}
