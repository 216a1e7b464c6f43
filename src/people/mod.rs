pub mod exec;
pub mod graph;
pub mod index;
pub mod metrics;
pub mod output;

pub use exec::exec;
pub use graph::{CollaborationEdge, CollaborationGraph};
pub use index::{project_contributors, projects_per_identity, ProjectContributors};
pub use metrics::{generalized_h_index, identity_metrics, network_indices};

use crate::identity::IdentityTable;
use crate::model::{ContributorProjectLink, PeopleWindow};
use crate::window::RecencyWindow;

pub fn people_window(
    links: &[ContributorProjectLink],
    identities: &mut IdentityTable,
    window: &RecencyWindow,
    days: i64,
) -> PeopleWindow {
    let index = project_contributors(links, identities, window, days);
    let graph = CollaborationGraph::build(&index);
    let identity_rows = identity_metrics(&graph, &projects_per_identity(&index), identities);
    let indices = network_indices(&identity_rows);

    tracing::debug!(
        days,
        projects = index.len(),
        edges = graph.len(),
        c_index = indices.c_index,
        p_index = indices.p_index,
        "built collaboration graph"
    );

    PeopleWindow {
        days,
        edges: graph.rows(identities),
        indices,
        identities: identity_rows,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    pub(crate) fn today() -> RecencyWindow {
        RecencyWindow::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    pub(crate) fn link(email: &str, project: &str, latest: &str) -> ContributorProjectLink {
        ContributorProjectLink {
            contributor: email.to_string(),
            project: project.to_string(),
            total_commits: 1,
            commits_30_days: 0,
            commits_90_days: 0,
            latest_commit_date: latest.to_string(),
            first_commit_date: latest.to_string(),
            commits_this_year: 0,
            commits_per_year: Default::default(),
        }
    }

    #[test]
    fn windows_are_independent() {
        let links = vec![
            link("a@x.com", "Alpha", "2024-06-20"),
            link("b@x.com", "Alpha", "2024-06-20"),
            link("a@x.com", "Beta", "2024-03-01"),
            link("b@x.com", "Beta", "2024-03-01"),
        ];
        let mut ids = IdentityTable::new();
        let w30 = people_window(&links, &mut ids, &today(), 30);
        let w180 = people_window(&links, &mut ids, &today(), 180);

        assert_eq!(w30.edges[0].weight, 1);
        assert_eq!(w180.edges[0].weight, 2);
        assert_eq!(w30.identities[0].projects_count, 1);
        assert_eq!(w180.identities[0].projects_count, 2);
    }

    #[test]
    fn empty_input_yields_empty_window() {
        let mut ids = IdentityTable::new();
        let w = people_window(&[], &mut ids, &today(), 90);
        assert!(w.edges.is_empty());
        assert!(w.identities.is_empty());
        assert_eq!(w.indices.c_index, 0);
        assert_eq!(w.indices.p_index, 0);
    }
}
